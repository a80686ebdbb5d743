use crate::core::format::plural_results;
use crate::domain::model::{
    SearchRequest, SearchResult, SearchType, SummaryRequest, SummaryResponse,
    DEFAULT_NUM_RESULTS, MAX_SELECTION,
};
use crate::utils::error::{ClientError, Result};

/// The one visible section of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Search,
    Results,
    Summary,
    Loading(String),
    Error(String),
}

/// Search options ("advanced options").
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub num_results: u32,
    pub search_type: SearchType,
    pub include_domains: Option<Vec<String>>,
    pub exclude_domains: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num_results: DEFAULT_NUM_RESULTS,
            search_type: SearchType::default(),
            include_domains: None,
            exclude_domains: None,
        }
    }
}

impl SearchOptions {
    pub fn build_request(&self, query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            num_results: self.num_results,
            search_type: self.search_type,
            include_domains: self.include_domains.clone(),
            exclude_domains: self.exclude_domains.clone(),
        }
    }
}

/// Transient client state: visible view, last results and the selection.
#[derive(Debug, Clone)]
pub struct Session {
    view: View,
    query: String,
    results: Vec<SearchResult>,
    // insertion order is the order URLs are sent for summarizing
    selected: Vec<usize>,
    summary: Option<SummaryResponse>,
    pub options: SearchOptions,
    pub options_open: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl Session {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            view: View::Search,
            query: String::new(),
            results: Vec::new(),
            selected: Vec::new(),
            summary: None,
            options,
            options_open: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn summary(&self) -> Option<&SummaryResponse> {
        self.summary.as_ref()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn toggle_options(&mut self) -> bool {
        self.options_open = !self.options_open;
        self.options_open
    }

    pub fn begin_loading(&mut self, text: impl Into<String>) {
        self.view = View::Loading(text.into());
    }

    /// Records the query being searched; used later for the summary request.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    pub fn show_results(&mut self, results: Vec<SearchResult>) {
        self.results = results;
        self.selected.clear();
        self.summary = None;
        self.view = View::Results;
    }

    pub fn results_header(&self) -> String {
        format!("{} results for \"{}\"", self.results.len(), self.query)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.results.len() {
            return Err(ClientError::validation(format!(
                "No result #{} (there are {} results)",
                index + 1,
                self.results.len()
            )));
        }
        Ok(())
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if !self.selected.contains(&index) {
            self.selected.push(index);
        }
        Ok(())
    }

    pub fn deselect(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.selected.retain(|i| *i != index);
        Ok(())
    }

    /// Returns whether the result is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        if self.is_selected(index) {
            self.deselect(index)?;
            Ok(false)
        } else {
            self.select(index)?;
            Ok(true)
        }
    }

    pub fn selection_label(&self) -> String {
        let count = self.selected.len();
        let mut label = format!("{} {} selected", count, plural_results(count));
        if count > MAX_SELECTION {
            label.push_str(&format!(" (max {})", MAX_SELECTION));
        }
        label
    }

    pub fn can_summarize(&self) -> bool {
        let count = self.selected.len();
        count > 0 && count <= MAX_SELECTION
    }

    pub fn selected_urls(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|i| self.results.get(*i))
            .map(|r| r.url.clone())
            .collect()
    }

    /// `None` unless the selection holds between one and five results.
    pub fn summary_request(&self) -> Option<SummaryRequest> {
        if !self.can_summarize() {
            return None;
        }
        Some(SummaryRequest {
            urls: self.selected_urls(),
            query: self.query.trim().to_string(),
        })
    }

    pub fn show_summary(&mut self, summary: SummaryResponse) {
        self.summary = Some(summary);
        self.view = View::Summary;
    }

    pub fn close_summary(&mut self) {
        if self.view == View::Summary {
            self.view = View::Results;
        }
    }

    /// Escape: summary goes back to results, results go back to a fresh search.
    pub fn back(&mut self) {
        match self.view {
            View::Summary => self.view = View::Results,
            View::Results => self.reset(),
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.view = View::Search;
        self.results.clear();
        self.selected.clear();
        self.summary = None;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.view = View::Error(message.into());
    }

    pub fn retry(&mut self) {
        if matches!(self.view, View::Error(_)) {
            self.view = View::Search;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> SearchResult {
        SearchResult {
            title: Some(format!("Result {}", n)),
            url: format!("https://example.com/{}", n),
            score: None,
            author: None,
            published_date: None,
            text: None,
        }
    }

    fn session_with(n: usize) -> Session {
        let mut session = Session::default();
        session.set_query("  rust ownership ");
        session.show_results((0..n).map(result).collect());
        session
    }

    #[test]
    fn test_show_results_switches_view_and_clears_selection() {
        let mut session = session_with(3);
        session.select(1).unwrap();

        session.show_results(vec![result(9)]);

        assert_eq!(session.view(), &View::Results);
        assert_eq!(session.selection_count(), 0);
        assert_eq!(session.results_header(), "1 results for \"rust ownership\"");
    }

    #[test]
    fn test_selection_label_pluralization() {
        let mut session = session_with(8);
        assert_eq!(session.selection_label(), "0 results selected");
        session.select(0).unwrap();
        assert_eq!(session.selection_label(), "1 result selected");
        session.select(1).unwrap();
        assert_eq!(session.selection_label(), "2 results selected");
    }

    #[test]
    fn test_six_selected_disables_summary() {
        let mut session = session_with(8);
        for i in 0..5 {
            session.select(i).unwrap();
        }
        assert!(session.can_summarize());

        session.select(5).unwrap();
        assert!(!session.can_summarize());
        assert_eq!(session.selection_label(), "6 results selected (max 5)");
        assert!(session.summary_request().is_none());
    }

    #[test]
    fn test_empty_selection_cannot_summarize() {
        let session = session_with(3);
        assert!(!session.can_summarize());
        assert!(session.summary_request().is_none());
    }

    #[test]
    fn test_summary_request_keeps_selection_order() {
        let mut session = session_with(5);
        session.select(3).unwrap();
        session.select(0).unwrap();
        session.select(3).unwrap();

        let request = session.summary_request().unwrap();
        assert_eq!(
            request.urls,
            vec!["https://example.com/3", "https://example.com/0"]
        );
        assert_eq!(request.query, "rust ownership");
    }

    #[test]
    fn test_toggle_and_out_of_range() {
        let mut session = session_with(2);
        assert!(session.toggle(1).unwrap());
        assert!(!session.toggle(1).unwrap());
        assert!(session.toggle(2).is_err());
        assert!(session.select(7).is_err());
    }

    #[test]
    fn test_back_navigation() {
        let mut session = session_with(2);
        session.select(0).unwrap();
        session.show_summary(SummaryResponse {
            summary: "s".to_string(),
            key_points: None,
            sources: vec![],
        });
        assert_eq!(session.view(), &View::Summary);

        session.back();
        assert_eq!(session.view(), &View::Results);
        assert_eq!(session.selection_count(), 1);

        session.back();
        assert_eq!(session.view(), &View::Search);
        assert!(session.results().is_empty());
        assert_eq!(session.selection_count(), 0);

        // no-op on the search view
        session.back();
        assert_eq!(session.view(), &View::Search);
    }

    #[test]
    fn test_close_summary_returns_to_results() {
        let mut session = session_with(2);
        session.select(1).unwrap();

        // no summary open yet
        session.close_summary();
        assert_eq!(session.view(), &View::Results);

        session.show_summary(SummaryResponse {
            summary: "s".to_string(),
            key_points: None,
            sources: vec![],
        });
        session.close_summary();
        assert_eq!(session.view(), &View::Results);
        assert_eq!(session.selection_count(), 1);
        assert!(session.summary().is_some());

        session.show_error("boom");
        session.close_summary();
        assert_eq!(session.view(), &View::Error("boom".to_string()));
    }

    #[test]
    fn test_error_then_retry_returns_to_search() {
        let mut session = Session::default();
        session.begin_loading("Searching...");
        assert_eq!(session.view(), &View::Loading("Searching...".to_string()));

        session.show_error("Search failed: Bad Gateway");
        session.retry();
        assert_eq!(session.view(), &View::Search);
    }

    #[test]
    fn test_build_request_from_options() {
        let options = SearchOptions {
            num_results: 4,
            search_type: SearchType::Neural,
            include_domains: Some(vec!["arxiv.org".to_string()]),
            exclude_domains: None,
        };
        let request = options.build_request("transformers");
        assert_eq!(request.num_results, 4);
        assert_eq!(request.search_type, SearchType::Neural);
        assert_eq!(request.include_domains.as_deref(), Some(&["arxiv.org".to_string()][..]));
    }
}
