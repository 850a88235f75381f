//! Client for the Google Custom Search JSON API.
//!
//! One [`Searcher`] is built at startup and shared by every request. It holds
//! only immutable credentials and a pooled `reqwest::Client`, so concurrent
//! calls need no locking.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, instrument, trace};

use crate::data_models::SearchResultPage;

pub mod error;
pub(crate) mod types;

pub use error::SearcherError;
use types::{ApiSearchResponse, parse_error_body};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Clone)]
pub struct Searcher {
    http_client: Client,
    api_key: String,
    engine_id: String,
    base_url: String,
    timeout: Duration,
}

impl Searcher {
    pub fn new(
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Searcher, SearcherError> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        // A zero timeout means no timeout at all.
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| SearcherError::ClientBuild(e.without_url()))?;

        Ok(Searcher {
            http_client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Points the searcher at another endpoint (a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Searcher {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn search(&self, query: &str) -> Result<SearchResultPage, SearcherError> {
        self.search_from(query, 1).await
    }

    /// Fetches one page of results starting at the 1-based `start_index`.
    ///
    /// Issues exactly one request. The returned page carries the start index
    /// echoed by the API rather than `start_index`.
    #[instrument(skip(self), fields(engine = %self.engine_id))]
    pub async fn search_from(
        &self,
        query: &str,
        start_index: u32,
    ) -> Result<SearchResultPage, SearcherError> {
        let start_index = start_index.max(1);
        let start = start_index.to_string();

        debug!(url = %self.base_url, "sending search request");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("start", start.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the API key.
                let e = e.without_url();
                if e.is_timeout() {
                    error!(timeout = ?self.timeout, "search request timed out");
                } else {
                    error!(error = %e, "network error during search request");
                }
                SearcherError::Transport(e)
            })?;

        let status = response.status();
        debug!(status = %status, "received response from search api");

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(error = %e, "failed to read response body");
            SearcherError::Transport(e)
        })?;
        trace!(body = %body, "response body");

        if !status.is_success() {
            let err = parse_error_body(status.as_u16(), &body);
            error!(status = status.as_u16(), error = %err, "search api returned an error");
            return Err(SearcherError::Api(err));
        }

        let envelope: ApiSearchResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "failed to parse search response");
            SearcherError::Decode(e)
        })?;

        let page = envelope.into_page(start_index);
        debug!(
            result_count = page.items.len(),
            start_index = page.start_index,
            "search completed"
        );
        Ok(page)
    }
}
