use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info};

use crate::views::{ErrorView, IndexView, SearchView};

use super::AppState;
use super::models::SearchParams;

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    // No query string: show the landing page
    let Some(query) = params.into_search_query() else {
        return render(StatusCode::OK, &IndexView {});
    };

    info!(query = %query.text, start_index = query.start_index, "search");

    match state
        .searcher
        .search_from(&query.text, query.start_index)
        .await
    {
        Ok(result) => render(StatusCode::OK, &SearchView::new(query.text, result)),
        Err(e) => {
            error!(error = %e, query = %query.text, "search failed");
            render(StatusCode::BAD_GATEWAY, &ErrorView::from(&e))
        }
    }
}

fn render<T: Template>(status: StatusCode, view: &T) -> Response {
    match view.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
