use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Directory endpoint returned status {status}")]
    EndpointStatusError { status: u16 },

    #[error("Unrecognized payload shape: {detail}")]
    UnrecognizedPayloadError { detail: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DirectoryError {
    /// True for the failure class that warrants a manual retry prompt
    /// (network/status/payload problems on the single fetch).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DirectoryError::HttpError(_)
                | DirectoryError::EndpointStatusError { .. }
                | DirectoryError::UnrecognizedPayloadError { .. }
                | DirectoryError::SerializationError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
