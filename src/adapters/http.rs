use crate::domain::model::{
    HealthResponse, HealthStatus, SearchRequest, SearchResponse, SummaryRequest, SummaryResponse,
};
use crate::domain::ports::SearchApi;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("exa-search/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed client for the search backend.
#[derive(Debug, Clone)]
pub struct HttpSearchApi {
    base_url: String,
    client: Client,
}

impl HttpSearchApi {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        tracing::debug!("POST {} -> {}", url, response.status());
        Ok(response)
    }
}

fn status_text(response: &Response) -> String {
    let status = response.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn health(&self) -> HealthStatus {
        let url = self.endpoint("/health");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                return HealthStatus::Offline;
            }
        };

        // 非 JSON 的回應視同離線
        match response.json::<HealthResponse>().await {
            Ok(body) => HealthStatus::from_response(&body),
            Err(e) => {
                tracing::warn!("Health check returned unreadable body: {}", e);
                HealthStatus::Offline
            }
        }
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        tracing::info!(
            "Searching for {:?} ({} results, type {})",
            request.query,
            request.num_results,
            request.search_type
        );
        let response = self.post_json("/api/v1/search", request).await?;

        if !response.status().is_success() {
            return Err(ClientError::ApiStatusError {
                status: response.status().as_u16(),
                message: format!("Search failed: {}", status_text(&response)),
            });
        }

        let body: SearchResponse = response.json().await?;
        tracing::info!("Search returned {} results", body.results.len());
        Ok(body)
    }

    async fn generate_summary(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
        tracing::info!("Requesting summary of {} pages", request.urls.len());
        let response = self.post_json("/api/v1/generate-summary", request).await?;

        let status = response.status();
        if !status.is_success() {
            // 後端錯誤格式為 {"detail": "..."}
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string));
            return Err(ClientError::ApiStatusError {
                status: status.as_u16(),
                message: detail.unwrap_or_else(|| "Summary generation failed".to_string()),
            });
        }

        let body: SummaryResponse = response.json().await?;
        tracing::debug!(
            "Summary has {} key points and {} sources",
            body.key_points().len(),
            body.sources.len()
        );
        Ok(body)
    }
}
