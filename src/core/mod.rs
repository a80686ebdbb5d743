pub mod export;
pub mod format;
pub mod render;
pub mod session;

pub use crate::domain::model::{SearchRequest, SearchResult, SummaryRequest, SummaryResponse};
pub use crate::domain::ports::{Clipboard, SearchApi, Storage};
pub use crate::utils::error::Result;
