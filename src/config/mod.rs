#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use file::FileConfig;

/// Public mock practitioner listing used as the default data source.
pub const DEFAULT_ENDPOINT: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
