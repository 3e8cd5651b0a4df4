use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeFile;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(&state.config.server.index_page))
        .route("/process", post(handlers::process_article))
        .route("/api/health", get(handlers::health_check))
}
