//! Wire shapes of the Custom Search JSON API.

use serde::{Deserialize, Deserializer};

use crate::data_models::{SearchError, SearchErrorItem, SearchResultItem, SearchResultPage};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiSearchResponse {
    #[serde(default)]
    items: Vec<ApiResultItem>,
    #[serde(default)]
    search_information: ApiSearchInformation,
    #[serde(default)]
    queries: ApiQueries,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResultItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    display_link: String,
    #[serde(default)]
    html_formatted_url: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    html_snippet: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSearchInformation {
    #[serde(default, deserialize_with = "lenient_u64")]
    total_results: u64,
    #[serde(default)]
    formatted_total_results: String,
    #[serde(default)]
    search_time: f64,
    #[serde(default)]
    formatted_search_time: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiQueries {
    #[serde(default)]
    request: Vec<ApiQuery>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiQuery {
    #[serde(default, deserialize_with = "lenient_u64_opt")]
    start_index: Option<u64>,
}

/// The API encodes 64-bit counts as JSON strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Int64Repr {
    Number(u64),
    Text(String),
}

impl Int64Repr {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Int64Repr::Number(n) => Ok(n),
            Int64Repr::Text(s) => s
                .parse()
                .map_err(|_| E::custom(format!("invalid integer string {s:?}"))),
        }
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Int64Repr::deserialize(deserializer)?.into_u64()
}

fn lenient_u64_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Int64Repr>::deserialize(deserializer)?
        .map(Int64Repr::into_u64)
        .transpose()
}

impl ApiSearchResponse {
    /// `requested_start` is only used when the API did not echo a start index.
    pub(crate) fn into_page(self, requested_start: u32) -> SearchResultPage {
        let start_index = self
            .queries
            .request
            .first()
            .and_then(|q| q.start_index)
            .map(|s| s.min(u32::MAX as u64) as u32)
            .unwrap_or(requested_start);

        let items = self
            .items
            .into_iter()
            .map(|item| SearchResultItem {
                title: item.title,
                link: item.link,
                display_link: item.display_link,
                html_formatted_url: item.html_formatted_url,
                snippet: item.snippet,
                html_snippet: item.html_snippet.replace("<br>", ""),
            })
            .collect();

        let info = self.search_information;
        SearchResultPage {
            total_results: info.total_results,
            formatted_total_results: info.formatted_total_results,
            search_time: info.search_time,
            formatted_search_time: info.formatted_search_time,
            items,
            start_index,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorItem {
    #[serde(default)]
    message: String,
    #[serde(default)]
    reason: String,
}

/// Builds a [`SearchError`] from a non-success response body. Accepts the
/// `{"error": {...}}` envelope as well as a bare `{message, errors}` object.
pub(crate) fn parse_error_body(status: u16, body: &str) -> SearchError {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|env| env.error)
        .or_else(|_| serde_json::from_str::<ApiErrorBody>(body));

    match parsed {
        Ok(err) if !err.message.is_empty() || !err.errors.is_empty() => {
            let errors = err
                .errors
                .into_iter()
                .map(|e| SearchErrorItem {
                    message: e.message,
                    reason: e.reason,
                })
                .collect();
            SearchError::new(status, err.message, errors)
        }
        _ => SearchError::from_raw_body(status, body),
    }
}
