use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats a published date as `Jan 5, 2024`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// and plain `YYYY-MM-DD` dates. Anything else is returned unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Whole-number relevance percentage; `None` for a missing or zero score.
pub fn format_score(score: Option<f64>) -> Option<String> {
    match score {
        Some(s) if s != 0.0 && s.is_finite() => Some(format!("{}%", (s * 100.0).round() as i64)),
        _ => None,
    }
}

/// Splits summary text into paragraphs on blank lines.
pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn plural_results(count: usize) -> &'static str {
    if count == 1 {
        "result"
    } else {
        "results"
    }
}
