pub mod config_manager;
pub mod detect;
pub mod error;
pub mod handlers;
pub mod inference_service;
pub mod model_pool;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod summarize;
pub mod translate;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
