//! HTTP completion client for a locally running model server.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{CompletionApi, InferenceEngine, InferenceError};
use crate::config::InferenceConfig;

/// Forwards prompts to a completion server over HTTP.
pub struct HttpCompletionEngine {
    client: Client,
    api: CompletionApi,
    endpoint: String,
}

impl HttpCompletionEngine {
    pub fn new(
        api: CompletionApi,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            api,
            endpoint,
        })
    }

    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        Self::new(
            config.api,
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn completion_url(&self) -> String {
        match self.api {
            CompletionApi::OpenAi => format!("{}/v1/completions", self.endpoint),
            CompletionApi::LlamaCpp => format!("{}/completion", self.endpoint),
        }
    }

    fn completion_body(&self, prompt: &str, max_tokens: u32) -> serde_json::Value {
        match self.api {
            CompletionApi::OpenAi => json!({ "prompt": prompt, "max_tokens": max_tokens }),
            CompletionApi::LlamaCpp => json!({ "prompt": prompt, "n_predict": max_tokens }),
        }
    }
}

/// Turn a non-2xx response into [`InferenceError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, InferenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(InferenceError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl InferenceEngine for HttpCompletionEngine {
    fn name(&self) -> &str {
        self.api.as_str()
    }

    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<serde_json::Value, InferenceError> {
        let url = self.completion_url();
        debug!(url = %url, prompt_len = prompt.len(), max_tokens, "sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&self.completion_body(prompt, max_tokens))
            .send()
            .await?;
        let response = check_status(response).await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| InferenceError::Decode(e.to_string()))
    }

    async fn health(&self) -> Result<(), InferenceError> {
        let response = self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await?;
        check_status(response).await.map(|_| ())
    }
}
