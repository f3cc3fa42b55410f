use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::langflow::LangflowSettings;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        base_api_url: get_env_or_default("BASE_API_URL", "https://api.langflow.astra.datastax.com"),
        langflow_id: get_env_or_default("LANGFLOW_ID", ""),
        flow_id: get_env_or_default("FLOW_ID", ""),
        application_token: get_env_opt("APPLICATION_TOKEN"),
        bind_addr: get_env_or_default("BIND_ADDR", "0.0.0.0:5000"),
        static_dir: get_env_or_default("STATIC_DIR", "static"),
        query_suffix: get_env_or_default("QUERY_SUFFIX", " and provide output in JSON Format"),
        request_timeout_secs: get_env_parsed("REQUEST_TIMEOUT_SECS", 500),
        query_endpoint: get_env_or_default("QUERY_ENDPOINT", "http://localhost:5000/query"),
    }
});

pub struct Config {
    pub base_api_url: String,
    pub langflow_id: String,
    pub flow_id: String,
    pub application_token: Option<String>,
    pub bind_addr: String,
    pub static_dir: String,
    pub query_suffix: String,
    pub request_timeout_secs: u64,
    pub query_endpoint: String,
}

impl Config {
    /// Settings for the upstream flow runner, detached from the global so
    /// callers and tests can build their own.
    pub fn langflow_settings(&self) -> LangflowSettings {
        LangflowSettings {
            base_api_url: self.base_api_url.clone(),
            langflow_id: self.langflow_id.clone(),
            flow_id: self.flow_id.clone(),
            application_token: self.application_token.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => default,
    }
}
