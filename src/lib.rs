pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{FileConfig, DEFAULT_ENDPOINT};

pub use crate::core::session::{NavigationHistory, Session};
pub use crate::core::source::{DirectoryLoader, HttpDirectorySource};
pub use domain::model::{
    ConsultationMode, DirectoryView, Phase, Practitioner, QueryState, RawRecord, SortKey,
};
pub use domain::ports::{ConfigProvider, DirectorySource, RenderSurface};
pub use utils::error::{DirectoryError, Result};
