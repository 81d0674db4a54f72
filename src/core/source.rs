use crate::core::payload;
use crate::core::{normalize, session::Session};
use crate::domain::model::RawRecord;
use crate::domain::ports::DirectorySource;
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the practitioner listing from its HTTP endpoint. Carries no
/// retry or timeout policy of its own: a retry is a fresh `fetch` call
/// initiated by the caller.
pub struct HttpDirectorySource {
    client: Client,
    endpoint: String,
}

impl HttpDirectorySource {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        tracing::debug!("Requesting directory listing from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("Directory response status: {}", status);
        if !status.is_success() {
            return Err(DirectoryError::EndpointStatusError {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let records = payload::into_records(payload::detect_shape(body))?;
        tracing::debug!("Received {} raw records", records.len());
        Ok(records)
    }
}

/// Load lifecycle for one session: fetch, normalize, hydrate from the
/// optional initial address. Failure is terminal for the attempt; the
/// caller decides whether to call `load` again.
pub struct DirectoryLoader<S: DirectorySource> {
    source: S,
}

impl<S: DirectorySource> DirectoryLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn load(&self, initial_address: Option<&str>) -> Result<Session> {
        let raw = self.source.fetch().await?;
        let entities = normalize::normalize_all(&raw);
        tracing::info!("Loaded {} practitioners", entities.len());

        let session = match initial_address {
            Some(address) => Session::with_initial_address(entities, address),
            None => Session::new(entities),
        };
        Ok(session)
    }
}
