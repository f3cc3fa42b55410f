use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::models::ServerResponse;

/// Everything that can go wrong between pressing submit and seeing cards.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query cannot be empty.")]
    EmptyQuery,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! Status: {0}")]
    HttpStatus(u16),

    /// Message reported by the server in the `error` field.
    #[error("{0}")]
    Server(String),

    #[error("No JSON data found in the response")]
    NoJsonData,

    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Unexpected response format")]
    UnexpectedShape,
}

impl SearchError {
    /// The single line shown in the error area.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyQuery => self.to_string(),
            other => format!(
                "Error: {other}. Please check your network connection and try again."
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum LangflowError {
    #[error("APPLICATION_TOKEN is not configured")]
    MissingToken,

    #[error("{0} is not configured")]
    MissingFlowId(&'static str),

    #[error("invalid Langflow URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication failed. Please check your application token.")]
    Unauthorized,

    #[error("API endpoint not found. Please check your Langflow ID and Flow ID.")]
    FlowNotFound,

    #[error("Langflow API returned status {0}")]
    Status(u16),

    #[error("Invalid response format from server")]
    InvalidResponse,

    #[error("Unexpected response format from Langflow API")]
    UnexpectedFormat,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upstream(#[from] LangflowError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(
                LangflowError::MissingToken
                | LangflowError::MissingFlowId(_)
                | LangflowError::InvalidUrl(_),
            ) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!("Error processing query: {self}");
        (status, Json(ServerResponse::failure(self.to_string()))).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
