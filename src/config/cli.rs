use crate::config::DEFAULT_ENDPOINT;
use crate::core::suggest::DEFAULT_SUGGESTION_LIMIT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-directory")]
#[command(about = "Browse, filter and sort a remote practitioner listing")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Initial address string to hydrate the filters from, e.g.
    /// "?consultation=In+Clinic&sort=fees".
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub suggestion_limit: usize,

    /// Optional TOML file; its values fill in anything not given on
    /// the command line.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the hydrated result list once and exit instead of
    /// starting the interactive browse loop.
    #[arg(long)]
    pub once: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn initial_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_positive_number("suggestion_limit", self.suggestion_limit, 1)?;
        Ok(())
    }
}
