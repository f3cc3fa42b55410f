use reqwest::{StatusCode, Url};
use serde_json::{Value, json};
use std::time::Duration;

use crate::data_models::ResultPayload;
use crate::error::LangflowError;
use crate::extractor::fenced_block;

#[derive(Debug, Clone)]
pub struct LangflowSettings {
    pub base_api_url: String,
    pub langflow_id: String,
    pub flow_id: String,
    pub application_token: Option<String>,
    pub timeout: Duration,
}

/// Runs a hosted Langflow flow and pulls the product/recipe payload out of
/// its chat output.
#[derive(Debug, Clone)]
pub struct LangflowClient {
    http: reqwest::Client,
    run_url: Url,
    token: String,
}

impl LangflowClient {
    pub fn new(settings: &LangflowSettings) -> Result<LangflowClient, LangflowError> {
        let token = settings
            .application_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(LangflowError::MissingToken)?
            .to_string();
        let langflow_id = required_id(&settings.langflow_id, "LANGFLOW_ID")?;
        let flow_id = required_id(&settings.flow_id, "FLOW_ID")?;

        let raw = format!(
            "{}/lf/{}/api/v1/run/{}?stream=false",
            settings.base_api_url.trim_end_matches('/'),
            langflow_id,
            flow_id
        );
        let run_url = Url::parse(&raw).map_err(|e| LangflowError::InvalidUrl(format!("{raw}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        tracing::info!("Initialized LangflowClient with API URL: {run_url}");
        Ok(LangflowClient {
            http,
            run_url,
            token,
        })
    }

    pub fn run_url(&self) -> &Url {
        &self.run_url
    }

    /// Raw flow response.
    pub async fn run(&self, input_value: &str) -> Result<Value, LangflowError> {
        let body = json!({
            "input_value": input_value,
            "output_type": "chat",
            "input_type": "chat",
            "tweaks": {},
        });

        tracing::info!("Sending request to Langflow API with input: {input_value}");
        let res = self
            .http
            .post(self.run_url.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        tracing::info!("Response status code: {status}");
        match status {
            StatusCode::UNAUTHORIZED => return Err(LangflowError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(LangflowError::FlowNotFound),
            s if !s.is_success() => return Err(LangflowError::Status(s.as_u16())),
            _ => {}
        }

        let text = res.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Invalid JSON response: {e}");
            LangflowError::InvalidResponse
        })
    }

    /// Runs the flow and returns its deduplicated payload.
    pub async fn search(&self, input_value: &str) -> Result<ResultPayload, LangflowError> {
        let response = self.run(input_value).await?;
        let mut payload = payload_from_flow_output(&response)?;
        payload.dedup();
        Ok(payload)
    }
}

fn required_id<'a>(value: &'a str, name: &'static str) -> Result<&'a str, LangflowError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LangflowError::MissingFlowId(name));
    }
    Ok(value)
}

/// Reads `outputs[0].outputs[0]` of a flow run. The agent's answer is either a
/// chat text with a fenced JSON block, or already the payload object.
pub fn payload_from_flow_output(response: &Value) -> Result<ResultPayload, LangflowError> {
    let output = response
        .pointer("/outputs/0/outputs/0")
        .ok_or(LangflowError::UnexpectedFormat)?;

    if let Some(text) = output
        .pointer("/results/text/data/text")
        .or_else(|| output.pointer("/results/message/text"))
        .and_then(Value::as_str)
    {
        let block = fenced_block(text).ok_or(LangflowError::UnexpectedFormat)?;
        return serde_json::from_str(block).map_err(|e| {
            tracing::warn!("Flow returned malformed JSON block: {e}");
            LangflowError::UnexpectedFormat
        });
    }

    let has_payload_keys = output.as_object().is_some_and(|obj| {
        obj.keys().any(|k| {
            matches!(
                k.as_str(),
                "products" | "Products" | "product" | "Product" | "recipes" | "Recipes" | "recipe" | "Recipe"
            )
        })
    });
    if !has_payload_keys {
        return Err(LangflowError::UnexpectedFormat);
    }
    serde_json::from_value(output.clone()).map_err(|e| {
        tracing::warn!("Flow output is not a valid payload: {e}");
        LangflowError::UnexpectedFormat
    })
}
