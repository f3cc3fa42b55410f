use reqwest::Url;
use std::future::Future;

use crate::api::models::{QueryRequest, ServerResponse};
use crate::data_models::ResultPayload;
use crate::error::SearchError;
use crate::extractor::extract_payload;

/// The one outbound call a submit makes.
pub trait QueryClient: Send + Sync {
    fn send(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<ServerResponse, SearchError>> + Send;
}

/// Posts the query as JSON to the search endpoint.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpQueryClient {
    pub fn new(endpoint: Url) -> HttpQueryClient {
        HttpQueryClient {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl QueryClient for HttpQueryClient {
    async fn send(&self, request: &QueryRequest) -> Result<ServerResponse, SearchError> {
        tracing::info!("Sending query to {}", self.endpoint);
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = res.status();
        tracing::debug!("Response received: {status}");
        if !status.is_success() {
            // prefer the server's own message when it sent one
            let body = res.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ServerResponse>(&body) {
                Ok(ServerResponse {
                    error: Some(message),
                    ..
                }) => SearchError::Server(message),
                _ => SearchError::HttpStatus(status.as_u16()),
            });
        }

        Ok(res.json::<ServerResponse>().await?)
    }
}

/// Turns a decoded response into the payload to render, parsing the fenced
/// block exactly once.
pub fn payload_from_response(response: ServerResponse) -> Result<ResultPayload, SearchError> {
    if let Some(message) = response.error {
        return Err(SearchError::Server(message));
    }
    let text = response
        .text()
        .ok_or(SearchError::UnexpectedShape)?;
    let payload = extract_payload(text)?;
    tracing::debug!(
        "Parsed payload: {} products, {} recipes",
        payload.products.len(),
        payload.recipes.len()
    );
    Ok(payload)
}
