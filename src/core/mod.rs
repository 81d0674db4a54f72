pub mod address;
pub mod normalize;
pub mod payload;
pub mod pipeline;
pub mod session;
pub mod source;
pub mod suggest;

pub use crate::domain::model::{
    ConsultationMode, DirectoryView, Phase, Practitioner, QueryState, RawRecord, SortKey,
};
pub use crate::domain::ports::{ConfigProvider, DirectorySource, RenderSurface};
pub use crate::utils::error::Result;
