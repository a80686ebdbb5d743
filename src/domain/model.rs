use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_NUM_RESULTS: u32 = 10;

/// Upper bound on pages sent to the summary endpoint.
pub const MAX_SELECTION: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Auto,
    Neural,
    Keyword,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Auto => "auto",
            SearchType::Neural => "neural",
            SearchType::Keyword => "keyword",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SearchType::Auto),
            "neural" => Ok(SearchType::Neural),
            "keyword" => Ok(SearchType::Keyword),
            other => Err(format!(
                "unknown search type '{}', expected auto, neural or keyword",
                other
            )),
        }
    }
}

/// Body of `POST /api/v1/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub num_results: u32,
    pub search_type: SearchType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exclude_domains: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Body of `POST /api/v1/generate-summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub urls: Vec<String>,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub scraped_successfully: bool,
}

impl SourceInfo {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    #[serde(default)]
    pub key_points: Option<Vec<String>>,
    #[serde(default)]
    pub sources: Vec<SourceInfo>,
}

impl SummaryResponse {
    pub fn key_points(&self) -> &[String] {
        self.key_points.as_deref().unwrap_or(&[])
    }
}

/// Raw body of `GET /health`; only `status` is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Online,
    Limited,
    Offline,
}

impl HealthStatus {
    pub fn from_response(response: &HealthResponse) -> Self {
        match response.status.as_deref() {
            Some("healthy") => HealthStatus::Online,
            _ => HealthStatus::Limited,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Online => "API Online",
            HealthStatus::Limited => "Limited",
            HealthStatus::Offline => "Offline",
        }
    }
}

/// Splits a comma-separated domain list, trimming and dropping blanks.
/// Returns `None` when nothing remains so the field is left out of the request.
pub fn parse_domain_list(raw: &str) -> Option<Vec<String>> {
    let domains: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();
    if domains.is_empty() {
        None
    } else {
        Some(domains)
    }
}

/// Falls back to the default result count when the input is blank, not a
/// number, or zero.
pub fn parse_num_results(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_NUM_RESULTS)
}
