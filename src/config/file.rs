use crate::config::DEFAULT_ENDPOINT;
use crate::core::suggest::DEFAULT_SUGGESTION_LIMIT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML configuration, the file-based alternative to command-line
/// flags:
///
/// ```toml
/// [source]
/// endpoint = "https://example.com/listing.json"
///
/// [browse]
/// initial_query = "?sort=fees"
/// suggestion_limit = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub source: SourceSection,
    pub browse: Option<BrowseSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseSection {
    pub initial_query: Option<String>,
    pub suggestion_limit: Option<usize>,
}

impl FileConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| DirectoryError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            source: SourceSection {
                endpoint: DEFAULT_ENDPOINT.to_string(),
            },
            browse: None,
        }
    }
}

impl ConfigProvider for FileConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn initial_query(&self) -> Option<&str> {
        self.browse
            .as_ref()
            .and_then(|b| b.initial_query.as_deref())
    }

    fn suggestion_limit(&self) -> usize {
        self.browse
            .as_ref()
            .and_then(|b| b.suggestion_limit)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_positive_number(
            "browse.suggestion_limit",
            self.suggestion_limit(),
            1,
        )?;
        Ok(())
    }
}
