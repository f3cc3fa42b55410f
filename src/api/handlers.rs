use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use crate::error::AppError;

use super::AppState;
use super::models::{QueryRequest, ServerResponse};

pub async fn query_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<ServerResponse>, AppError> {
    let Json(request) = request?;

    if request.query.trim().is_empty() {
        return Err(AppError::BadRequest("Query cannot be empty".to_string()));
    }
    tracing::info!("Received query: {}", request.query);

    let input = format!("{}{}", request.query.trim(), state.query_suffix);
    let payload = state.langflow.search(&input).await?;
    tracing::info!(
        "Answering with {} products and {} recipes",
        payload.products.len(),
        payload.recipes.len()
    );

    Ok(Json(ServerResponse::from_payload(&payload)?))
}
