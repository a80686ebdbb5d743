use crate::domain::model::{
    HealthStatus, SearchRequest, SearchResponse, SummaryRequest, SummaryResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote search/summary backend.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Never fails; transport problems map to `HealthStatus::Offline`.
    async fn health(&self) -> HealthStatus;
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
    async fn generate_summary(&self, request: &SummaryRequest) -> Result<SummaryResponse>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}
