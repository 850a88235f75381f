use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::searcher::Searcher;

pub mod handlers;
pub mod models;

/// Dependencies shared by every request, built once at startup.
pub struct AppState {
    pub searcher: Searcher,
}

impl AppState {
    pub fn new(searcher: Searcher) -> Self {
        Self { searcher }
    }
}

pub fn create_router(state: Arc<AppState>, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::search_handler))
        .with_state(state)
        // Static assets referenced by the templates
        .nest_service("/public", ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
