//! HTML views rendered by the search endpoint. Templates live under
//! `templates/` and are compiled into the binary.

use askama::Template;
use url::form_urlencoded;

use crate::data_models::{SearchErrorItem, SearchResultPage};
use crate::pagination::{PageMetadata, is_same_page, page_to_start_index};
use crate::searcher::SearcherError;

/// Landing page shown when no query was given.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub message: String,
    pub details: Vec<SearchErrorItem>,
}

impl From<&SearcherError> for ErrorView {
    fn from(err: &SearcherError) -> Self {
        match err.search_error() {
            Some(api) => ErrorView {
                message: api.assembled_message.clone(),
                details: api.errors.clone(),
            },
            None => ErrorView {
                message: err.to_string(),
                details: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchView {
    pub query: String,
    pub current_page: u32,
    pub pages: Vec<PageLink>,
    pub result: SearchResultPage,
}

impl SearchView {
    pub fn new(query: String, result: SearchResultPage) -> SearchView {
        let meta = PageMetadata::from_start_index(result.start_index);
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let pages = meta
            .pages
            .iter()
            .map(|&number| {
                let start = page_to_start_index(number);
                PageLink {
                    number,
                    href: format!("/?q={encoded}&start={start}"),
                    active: is_same_page(result.start_index, number),
                }
            })
            .collect();

        SearchView {
            query,
            current_page: meta.current_page,
            pages,
            result,
        }
    }
}
