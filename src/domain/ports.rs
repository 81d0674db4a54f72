use crate::domain::model::{DirectoryView, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where raw practitioner records come from. One fetch per call; a
/// retry is a fresh call, never a resumption.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawRecord>>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn initial_query(&self) -> Option<&str>;
    fn suggestion_limit(&self) -> usize;
}

/// Anything that can draw one frame of the directory. The engine never
/// draws; it hands a fully derived view to this port.
pub trait RenderSurface {
    fn render(&mut self, view: &DirectoryView);
}
