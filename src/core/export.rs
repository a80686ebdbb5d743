use crate::domain::model::SummaryResponse;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSource {
    pub title: String,
    pub url: String,
}

/// Document written by `export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSummary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub sources: Vec<ExportedSource>,
    pub generated_at: String,
}

impl ExportedSummary {
    pub fn from_response(response: &SummaryResponse, generated_at: DateTime<Utc>) -> Self {
        Self {
            summary: response.summary.clone(),
            key_points: response.key_points().to_vec(),
            sources: response
                .sources
                .iter()
                .map(|s| ExportedSource {
                    title: s.display_title().to_string(),
                    url: s.url.clone(),
                })
                .collect(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub fn export_filename(at: DateTime<Utc>) -> String {
    format!("exa-summary-{}.json", at.timestamp_millis())
}
