use std::time::Duration;

use gsr::searcher::{Searcher, SearcherError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_helpers {
    use super::*;

    pub const SEARCH_PATH: &str = "/customsearch/v1";

    pub fn searcher_for(server: &MockServer) -> Searcher {
        Searcher::new("test-key", "test-engine", Duration::from_secs(2))
            .unwrap()
            .with_base_url(format!("{}{}", server.uri(), SEARCH_PATH))
    }

    pub fn three_item_response(start_index: u32) -> serde_json::Value {
        json!({
            "kind": "customsearch#search",
            "queries": {
                "request": [{"totalResults": "42", "count": 3, "startIndex": start_index}]
            },
            "searchInformation": {
                "searchTime": 0.318,
                "formattedSearchTime": "0.32",
                "totalResults": "42",
                "formattedTotalResults": "42"
            },
            "items": [
                {
                    "title": "Rust Programming Language",
                    "link": "https://www.rust-lang.org/",
                    "displayLink": "www.rust-lang.org",
                    "htmlFormattedUrl": "https://www.<b>rust</b>-lang.org/",
                    "snippet": "A language empowering everyone.",
                    "htmlSnippet": "A language empowering<br> everyone."
                },
                {
                    "title": "The Rust Book",
                    "link": "https://doc.rust-lang.org/book/",
                    "displayLink": "doc.rust-lang.org",
                    "htmlFormattedUrl": "https://doc.<b>rust</b>-lang.org/book/",
                    "snippet": "An introductory book.",
                    "htmlSnippet": "An introductory <b>book</b>."
                },
                {
                    "title": "crates.io",
                    "link": "https://crates.io/",
                    "displayLink": "crates.io",
                    "htmlFormattedUrl": "https://crates.io/",
                    "snippet": "The Rust community's crate registry.",
                    "htmlSnippet": "The <b>Rust</b> community&#39;s crate registry."
                }
            ]
        })
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_search_maps_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-engine"))
        .and(query_param("q", "rust lang & more"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_item_response(11)))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let page = searcher.search_from("rust lang & more", 11).await.unwrap();

    assert_eq!(page.total_results, 42);
    assert_eq!(page.formatted_total_results, "42");
    assert_eq!(page.formatted_search_time, "0.32");
    assert!((page.search_time - 0.318).abs() < f64::EPSILON);
    assert_eq!(page.start_index, 11);

    let titles: Vec<&str> = page.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Rust Programming Language", "The Rust Book", "crates.io"]
    );
    assert_eq!(page.items[0].display_link, "www.rust-lang.org");
    assert_eq!(page.items[0].html_snippet, "A language empowering everyone.");
    assert_eq!(page.items[1].html_snippet, "An introductory <b>book</b>.");
    assert_eq!(
        page.items[1].html_formatted_url,
        "https://doc.<b>rust</b>-lang.org/book/"
    );
}

#[tokio::test]
async fn test_start_index_comes_from_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_item_response(21)))
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let page = searcher.search_from("rust", 25).await.unwrap();
    assert_eq!(page.start_index, 21);
}

#[tokio::test]
async fn test_search_starts_at_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_item_response(1)))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let page = searcher.search("rust").await.unwrap();
    assert_eq!(page.start_index, 1);
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn test_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queries": {"request": [{"startIndex": 1}]},
            "searchInformation": {
                "searchTime": 0.1,
                "formattedSearchTime": "0.10",
                "totalResults": "0",
                "formattedTotalResults": "0"
            }
        })))
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let page = searcher.search("zzqxjv").await.unwrap();
    assert_eq!(page.total_results, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_api_error_is_structured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "API key invalid",
                "errors": [{
                    "message": "API key not valid. Please pass a valid API key.",
                    "domain": "global",
                    "reason": "keyInvalid"
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let err = searcher.search("rust").await.unwrap_err();

    assert!(err.is_api());
    assert!(!err.is_transport());
    let api = err.search_error().unwrap();
    assert_eq!(api.status, 403);
    assert_eq!(api.message, "API key invalid");
    assert_eq!(api.errors.len(), 1);
    assert_eq!(api.errors[0].reason, "keyInvalid");
}

#[tokio::test]
async fn test_bare_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API key invalid",
            "errors": [{"message": "API key invalid", "reason": "keyInvalid"}]
        })))
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let err = searcher.search("rust").await.unwrap_err();
    let api = err.search_error().unwrap();
    assert_eq!(api.reasons().collect::<Vec<_>>(), vec!["keyInvalid"]);
    assert_eq!(err.to_string(), "search api: Error 403: API key invalid, keyInvalid");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"items\": [oops"))
        .mount(&server)
        .await;

    let searcher = searcher_for(&server);
    let err = searcher.search("rust").await.unwrap_err();
    assert!(err.is_decode(), "unexpected error: {err:?}");
    assert!(err.search_error().is_none());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Nothing listens on port 1.
    let searcher = Searcher::new("key", "engine", Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:1/customsearch/v1");

    let err = searcher.search("rust").await.unwrap_err();
    assert!(matches!(err, SearcherError::Transport(_)));
    assert!(err.search_error().is_none());
}

#[tokio::test]
async fn test_transport_error_hides_api_key() {
    let searcher = Searcher::new("SECRET-KEY-123", "engine", Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:1/customsearch/v1");

    let err = searcher.search("rust").await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.to_string().contains("SECRET-KEY-123"), "{err}");
    assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_zero_timeout_waits_for_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(three_item_response(1))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let searcher = Searcher::new("key", "engine", Duration::ZERO)
        .unwrap()
        .with_base_url(format!("{}{}", server.uri(), SEARCH_PATH));

    let page = searcher.search("rust").await.unwrap();
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(three_item_response(1))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let searcher = Searcher::new("SECRET-KEY-123", "engine", Duration::from_millis(100))
        .unwrap()
        .with_base_url(format!("{}{}", server.uri(), SEARCH_PATH));

    let err = searcher.search("rust").await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.is_timeout());
    assert!(!err.to_string().contains("SECRET-KEY-123"));
}
