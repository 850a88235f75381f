use serde::Deserialize;

use crate::data_models::SearchQuery;

/// Query string of the search endpoint: `/?q=<text>&start=<n>`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    // Kept as text so a malformed value falls back to 1 instead of a 400.
    #[serde(default)]
    pub start: Option<String>,
}

impl SearchParams {
    pub fn start_index(&self) -> i64 {
        self.start
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(1)
    }

    /// `None` when there is nothing to search for.
    pub fn into_search_query(self) -> Option<SearchQuery> {
        let start_index = self.start_index();
        SearchQuery::new(self.q?, start_index)
    }
}
