//! Plain-text rendering of the client views.

use crate::core::format::{format_date, format_score, paragraphs};
use crate::core::session::{Session, View};
use crate::domain::model::{HealthStatus, SearchResult, SummaryResponse};
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────";

pub fn render_health(status: HealthStatus) -> String {
    let dot = match status {
        HealthStatus::Online => "●",
        HealthStatus::Limited => "◐",
        HealthStatus::Offline => "○",
    };
    format!("{} {}", dot, status.label())
}

pub fn render_result_card(result: &SearchResult, index: usize, selected: bool) -> String {
    let mut out = String::new();
    let marker = if selected { "[x]" } else { "[ ]" };
    let title = result
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or("Untitled");

    let _ = write!(out, "{} {:>2}. {}", marker, index + 1, title);
    if let Some(score) = format_score(result.score) {
        let _ = write!(out, "  ({})", score);
    }
    let _ = write!(out, "\n       {}", result.url);

    let mut meta = Vec::new();
    if let Some(author) = result.author.as_deref().filter(|a| !a.is_empty()) {
        meta.push(format!("👤 {}", author));
    }
    if let Some(date) = result.published_date.as_deref().filter(|d| !d.is_empty()) {
        meta.push(format!("📅 {}", format_date(date)));
    }
    if !meta.is_empty() {
        let _ = write!(out, "\n       {}", meta.join("   "));
    }
    out
}

pub fn render_results(session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", session.results_header());
    let _ = writeln!(out, "{}", RULE);
    for (index, result) in session.results().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}",
            render_result_card(result, index, session.is_selected(index))
        );
    }
    let _ = writeln!(out, "{}", RULE);
    let _ = write!(out, "{}", session.selection_label());
    if session.can_summarize() {
        out.push_str("  ·  `summarize` to generate an AI summary");
    }
    out
}

pub fn render_summary(summary: &SummaryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Summary");
    let _ = writeln!(out, "{}", RULE);
    for paragraph in paragraphs(&summary.summary) {
        let _ = writeln!(out, "{}\n", paragraph);
    }

    let key_points = summary.key_points();
    if !key_points.is_empty() {
        let _ = writeln!(out, "Key points");
        for point in key_points {
            let _ = writeln!(out, "  • {}", point);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Sources");
    for source in &summary.sources {
        let icon = if source.scraped_successfully { "✓" } else { "⚠" };
        let _ = write!(out, "  {} {}", icon, source.display_title());
        if !source.scraped_successfully {
            out.push_str("  (Failed to scrape)");
        }
        let _ = writeln!(out, "\n      {}", source.url);
    }
    out.trim_end().to_string()
}

fn render_options(session: &Session) -> String {
    let options = &session.options;
    let list = |domains: &Option<Vec<String>>| {
        domains
            .as_ref()
            .map(|d| d.join(", "))
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "  num results: {}\n  search type: {}\n  include domains: {}\n  exclude domains: {}",
        options.num_results,
        options.search_type,
        list(&options.include_domains),
        list(&options.exclude_domains)
    )
}

/// Renders whichever view is currently visible.
pub fn render_view(session: &Session) -> String {
    match session.view() {
        View::Search => {
            let mut out = String::from("Search the web. Type `/your query` or `search your query`.");
            if session.options_open {
                out.push_str("\nAdvanced options (`set <option> <value>`):\n");
                out.push_str(&render_options(session));
            }
            out
        }
        View::Results => render_results(session),
        View::Summary => match session.summary() {
            Some(summary) => render_summary(summary),
            None => String::new(),
        },
        View::Loading(text) => format!("⏳ {}", text),
        View::Error(message) => format!("❌ {}\n   `retry` to start a new search", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SourceInfo;

    fn sample_result() -> SearchResult {
        SearchResult {
            title: Some("Understanding Ownership".to_string()),
            url: "https://doc.rust-lang.org/book/ch04-00.html".to_string(),
            score: Some(0.912),
            author: Some("Steve Klabnik".to_string()),
            published_date: Some("2024-03-02T00:00:00.000Z".to_string()),
            text: None,
        }
    }

    #[test]
    fn test_result_card_full() {
        let card = render_result_card(&sample_result(), 0, true);
        assert!(card.starts_with("[x]  1. Understanding Ownership  (91%)"));
        assert!(card.contains("https://doc.rust-lang.org/book/ch04-00.html"));
        assert!(card.contains("👤 Steve Klabnik"));
        assert!(card.contains("📅 Mar 2, 2024"));
    }

    #[test]
    fn test_result_card_minimal() {
        let result = SearchResult {
            title: None,
            url: "https://example.com".to_string(),
            score: Some(0.0),
            author: None,
            published_date: None,
            text: None,
        };
        let card = render_result_card(&result, 11, false);
        assert!(card.starts_with("[ ] 12. Untitled\n"));
        assert!(!card.contains('%'));
        assert!(!card.contains("👤"));
        assert!(!card.contains("📅"));
    }

    #[test]
    fn test_summary_sections() {
        let summary = SummaryResponse {
            summary: "Para one.\n\nPara two.".to_string(),
            key_points: Some(vec!["Borrowing".to_string()]),
            sources: vec![
                SourceInfo {
                    url: "https://a.example".to_string(),
                    title: Some("A".to_string()),
                    scraped_successfully: true,
                },
                SourceInfo {
                    url: "https://b.example".to_string(),
                    title: None,
                    scraped_successfully: false,
                },
            ],
        };
        let text = render_summary(&summary);
        assert!(text.contains("Para one.\n\nPara two."));
        assert!(text.contains("Key points\n  • Borrowing"));
        assert!(text.contains("✓ A"));
        assert!(text.contains("⚠ https://b.example  (Failed to scrape)"));
    }

    #[test]
    fn test_summary_without_key_points_hides_section() {
        let summary = SummaryResponse {
            summary: "Only text".to_string(),
            key_points: Some(vec![]),
            sources: vec![],
        };
        assert!(!render_summary(&summary).contains("Key points"));
    }

    #[test]
    fn test_error_view() {
        let mut session = Session::default();
        session.show_error("Search failed: Not Found");
        assert!(render_view(&session).starts_with("❌ Search failed: Not Found"));
    }
}
