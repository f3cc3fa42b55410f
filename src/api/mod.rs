use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::langflow::LangflowClient;

pub mod handlers;
pub mod models;

/// Shared, read-only state for the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub langflow: LangflowClient,
    /// Appended to every query before it goes to the flow.
    pub query_suffix: String,
}

pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/query", post(handlers::query_handler))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
