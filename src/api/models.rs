use serde::{Deserialize, Serialize};

use crate::data_models::ResultPayload;
use crate::error::SearchError;
use crate::extractor::wrap_payload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    /// Trims the raw input; whitespace-only queries are rejected.
    pub fn new(raw: &str) -> Result<QueryRequest, SearchError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(QueryRequest {
            query: query.to_string(),
        })
    }
}

/// Body of `POST /query`: either `results.text.data.text` holding a fenced
/// JSON block, or a top-level `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsEnvelope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsEnvelope {
    pub text: TextEnvelope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEnvelope {
    pub data: TextData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
}

impl ServerResponse {
    pub fn from_text(text: impl Into<String>) -> ServerResponse {
        ServerResponse {
            error: None,
            results: Some(ResultsEnvelope {
                text: TextEnvelope {
                    data: TextData { text: text.into() },
                },
            }),
        }
    }

    pub fn from_payload(payload: &ResultPayload) -> Result<ServerResponse, serde_json::Error> {
        Ok(ServerResponse::from_text(wrap_payload(payload)?))
    }

    pub fn failure(message: impl Into<String>) -> ServerResponse {
        ServerResponse {
            error: Some(message.into()),
            results: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.results.as_ref().map(|r| r.text.data.text.as_str())
    }
}
