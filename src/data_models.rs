use std::fmt::Write;

use thiserror::Error;

/// A user query as accepted by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub start_index: u32,
}

impl SearchQuery {
    /// Returns `None` for an empty query; the start index is clamped to 1.
    pub fn new(text: impl Into<String>, start_index: i64) -> Option<SearchQuery> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }
        let start_index = start_index.clamp(1, u32::MAX as i64) as u32;
        Some(SearchQuery { text, start_index })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultItem {
    pub title: String,
    pub link: String,
    pub display_link: String,
    /// Raw markup from the API, rendered unescaped.
    pub html_formatted_url: String,
    pub snippet: String,
    /// Raw markup with `<br>` markers removed.
    pub html_snippet: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultPage {
    pub total_results: u64,
    pub formatted_total_results: String,
    pub search_time: f64,
    pub formatted_search_time: String,
    pub items: Vec<SearchResultItem>,
    /// Start index echoed back by the API, not the one we asked for.
    pub start_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchErrorItem {
    pub message: String,
    pub reason: String,
}

/// Structured failure reported by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{assembled_message}")]
pub struct SearchError {
    pub status: u16,
    pub message: String,
    pub assembled_message: String,
    pub errors: Vec<SearchErrorItem>,
}

impl SearchError {
    pub fn new(status: u16, message: String, errors: Vec<SearchErrorItem>) -> SearchError {
        let assembled_message = assemble_message(status, &message, &errors);
        SearchError {
            status,
            message,
            assembled_message,
            errors,
        }
    }

    /// Used when the error body carried no structured detail at all.
    pub fn from_raw_body(status: u16, body: &str) -> SearchError {
        SearchError {
            status,
            message: String::new(),
            assembled_message: format!(
                "search api: got HTTP response code {status} with body: {body}"
            ),
            errors: Vec::new(),
        }
    }

    pub fn reasons(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.reason.as_str())
    }
}

fn assemble_message(status: u16, message: &str, errors: &[SearchErrorItem]) -> String {
    let mut buf = format!("search api: Error {status}: {message}");
    match errors {
        [] => buf.trim_end().to_string(),
        [only] if only.message == message => {
            let _ = write!(buf, ", {}", only.reason);
            buf
        }
        _ => {
            buf.push_str("\nMore details:\n");
            for e in errors {
                let _ = writeln!(buf, "Reason: {}, Message: {}", e.reason, e.message);
            }
            buf
        }
    }
}
