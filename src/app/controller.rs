use crate::core::export::{export_filename, ExportedSummary};
use crate::core::session::Session;
use crate::domain::model::HealthStatus;
use crate::domain::ports::{Clipboard, SearchApi, Storage};
use crate::utils::error::{ClientError, Result};
use chrono::Utc;

/// Outcome of a user action that talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was sent (blank query, selection out of bounds).
    Skipped,
    Done,
    /// The request failed; the session now shows the error view.
    Failed(String),
}

/// Drives a [`Session`] against the backend, storage and clipboard.
pub struct Controller<A: SearchApi, S: Storage> {
    api: A,
    storage: S,
    clipboard: Box<dyn Clipboard>,
    pub session: Session,
}

impl<A: SearchApi, S: Storage> Controller<A, S> {
    pub fn new(api: A, storage: S, clipboard: Box<dyn Clipboard>, session: Session) -> Self {
        Self {
            api,
            storage,
            clipboard,
            session,
        }
    }

    pub async fn check_health(&self) -> HealthStatus {
        let status = self.api.health().await;
        tracing::info!("API status: {}", status.label());
        status
    }

    pub async fn search(&mut self, query: &str) -> Outcome {
        let query = query.trim();
        if query.is_empty() {
            return Outcome::Skipped;
        }

        let request = self.session.options.build_request(query);
        self.session.set_query(query);
        self.session.begin_loading("Searching...");

        match self.api.search(&request).await {
            Ok(response) => {
                self.session.show_results(response.results);
                Outcome::Done
            }
            Err(e) => {
                tracing::error!("Search error: {}", e);
                let message = non_empty_or(e.user_friendly_message(), "Search failed. Please try again.");
                self.session.show_error(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    pub async fn generate_summary(&mut self) -> Outcome {
        let Some(request) = self.session.summary_request() else {
            tracing::debug!("Summary skipped: {}", self.session.selection_label());
            return Outcome::Skipped;
        };

        self.session.begin_loading("Generating AI summary...");

        match self.api.generate_summary(&request).await {
            Ok(summary) => {
                self.session.show_summary(summary);
                Outcome::Done
            }
            Err(e) => {
                tracing::error!("Summary generation error: {}", e);
                let message = non_empty_or(
                    e.user_friendly_message(),
                    "Failed to generate summary. Please try again.",
                );
                self.session.show_error(message.clone());
                Outcome::Failed(message)
            }
        }
    }

    /// Writes the current summary as JSON and returns the written path.
    pub async fn export_summary(&self) -> Result<String> {
        let summary = self
            .session
            .summary()
            .ok_or_else(|| ClientError::validation("No summary to export"))?;

        let now = Utc::now();
        let document = ExportedSummary::from_response(summary, now);
        let data = serde_json::to_vec_pretty(&document)?;
        let path = self.storage.write_file(&export_filename(now), &data).await?;
        tracing::info!("Exported summary to {}", path);
        Ok(path)
    }

    /// Copies the summary text. Failures are logged and reported as `false`.
    pub fn copy_summary(&mut self) -> bool {
        let Some(summary) = self.session.summary() else {
            return false;
        };
        let text = summary.summary.clone();
        match self.clipboard.set_text(&text) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to copy: {}", e);
                false
            }
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::View;
    use crate::domain::model::{
        SearchRequest, SearchResponse, SearchResult, SummaryRequest, SummaryResponse,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeApi {
        search_calls: Arc<Mutex<Vec<SearchRequest>>>,
        summary_calls: Arc<Mutex<Vec<SummaryRequest>>>,
        fail_summary: bool,
    }

    #[async_trait]
    impl SearchApi for FakeApi {
        async fn health(&self) -> HealthStatus {
            HealthStatus::Limited
        }

        async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
            self.search_calls.lock().unwrap().push(request.clone());
            let results = (0..7)
                .map(|i| SearchResult {
                    title: Some(format!("Page {}", i)),
                    url: format!("https://site.example/{}", i),
                    score: None,
                    author: None,
                    published_date: None,
                    text: None,
                })
                .collect();
            Ok(SearchResponse { results })
        }

        async fn generate_summary(&self, request: &SummaryRequest) -> Result<SummaryResponse> {
            self.summary_calls.lock().unwrap().push(request.clone());
            if self.fail_summary {
                return Err(ClientError::ApiStatusError {
                    status: 500,
                    message: "Summary generation failed".to_string(),
                });
            }
            Ok(SummaryResponse {
                summary: "Combined view".to_string(),
                key_points: None,
                sources: vec![],
            })
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemoryStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_string(), data.to_vec());
            Ok(format!("mem://{}", path))
        }
    }

    struct RecordingClipboard(Arc<Mutex<Option<String>>>);

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            *self.0.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Err(ClientError::ClipboardError {
                message: "no display".to_string(),
            })
        }
    }

    fn controller(api: FakeApi) -> (Controller<FakeApi, MemoryStorage>, Arc<Mutex<Option<String>>>) {
        let copied = Arc::new(Mutex::new(None));
        let controller = Controller::new(
            api,
            MemoryStorage::default(),
            Box::new(RecordingClipboard(copied.clone())),
            Session::default(),
        );
        (controller, copied)
    }

    #[test]
    fn test_blank_query_sends_nothing() {
        let api = FakeApi::default();
        let (mut controller, _) = controller(api.clone());

        let outcome = tokio_test::block_on(controller.search("   "));

        assert_eq!(outcome, Outcome::Skipped);
        assert!(api.search_calls.lock().unwrap().is_empty());
        assert_eq!(controller.session.view(), &View::Search);
    }

    #[tokio::test]
    async fn test_search_then_summary_flow() {
        let api = FakeApi::default();
        let (mut controller, copied) = controller(api.clone());

        assert_eq!(controller.search("  llm eval  ").await, Outcome::Done);
        assert_eq!(api.search_calls.lock().unwrap()[0].query, "llm eval");
        assert_eq!(controller.session.view(), &View::Results);

        controller.session.select(2).unwrap();
        controller.session.select(4).unwrap();
        assert_eq!(controller.generate_summary().await, Outcome::Done);

        let calls = api.summary_calls.lock().unwrap().clone();
        assert_eq!(calls[0].query, "llm eval");
        assert_eq!(
            calls[0].urls,
            vec!["https://site.example/2", "https://site.example/4"]
        );
        assert_eq!(controller.session.view(), &View::Summary);

        assert!(controller.copy_summary());
        assert_eq!(copied.lock().unwrap().as_deref(), Some("Combined view"));

        let path = controller.export_summary().await.unwrap();
        assert!(path.starts_with("mem://exa-summary-"));
    }

    #[tokio::test]
    async fn test_summary_skipped_over_limit() {
        let api = FakeApi::default();
        let (mut controller, _) = controller(api.clone());
        controller.search("q").await;
        for i in 0..6 {
            controller.session.select(i).unwrap();
        }

        assert_eq!(controller.generate_summary().await, Outcome::Skipped);
        assert!(api.summary_calls.lock().unwrap().is_empty());
        assert_eq!(controller.session.view(), &View::Results);
    }

    #[tokio::test]
    async fn test_summary_failure_shows_error() {
        let api = FakeApi {
            fail_summary: true,
            ..FakeApi::default()
        };
        let (mut controller, _) = controller(api);
        controller.search("q").await;
        controller.session.select(0).unwrap();

        let outcome = controller.generate_summary().await;

        assert_eq!(
            outcome,
            Outcome::Failed("Summary generation failed".to_string())
        );
        assert_eq!(
            controller.session.view(),
            &View::Error("Summary generation failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_copy_failure_keeps_summary_view() {
        let mut controller = Controller::new(
            FakeApi::default(),
            MemoryStorage::default(),
            Box::new(FailingClipboard),
            Session::default(),
        );
        controller.search("q").await;
        controller.session.select(0).unwrap();
        controller.generate_summary().await;

        assert!(!controller.copy_summary());
        assert_eq!(controller.session.view(), &View::Summary);
        assert!(controller.session.summary().is_some());
    }

    #[tokio::test]
    async fn test_export_without_summary_is_rejected() {
        let (controller, _) = controller(FakeApi::default());
        assert!(controller.export_summary().await.is_err());
    }
}
