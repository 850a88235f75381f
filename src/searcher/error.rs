//! Error types for the search adapter.

use thiserror::Error;

use crate::data_models::SearchError;

/// Errors that can occur when querying the search API.
#[derive(Debug, Error)]
pub enum SearcherError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request failed before a complete response was received
    /// (DNS, connection refused, timeout, truncated body).
    #[error("failed to request search api: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(SearchError),

    /// The success body did not match the expected envelope.
    #[error("failed to decode search result: {0}")]
    Decode(#[source] serde_json::Error),
}

impl SearcherError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SearcherError::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SearcherError::Transport(e) if e.is_timeout())
    }

    pub fn is_api(&self) -> bool {
        matches!(self, SearcherError::Api(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, SearcherError::Decode(_))
    }

    /// The structured API error, if this failure carries one.
    pub fn search_error(&self) -> Option<&SearchError> {
        match self {
            SearcherError::Api(e) => Some(e),
            _ => None,
        }
    }
}
