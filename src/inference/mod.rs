//! Inference invocation.
//!
//! Provides the [`InferenceEngine`] trait the request path calls into, and an
//! HTTP implementation ([`http::HttpCompletionEngine`]) for local completion
//! servers such as llama.cpp's `llama-server`. The engine is created via
//! [`create_engine`] from configuration.

pub mod http;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::InferenceConfig;

/// A language-model runtime that turns a prompt into a completion.
///
/// The returned JSON is the engine's native result and is passed on to
/// clients untouched.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Short label used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Generate at most `max_tokens` tokens for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<serde_json::Value, InferenceError>;

    /// Check that the engine is reachable and ready.
    async fn health(&self) -> Result<(), InferenceError> {
        Ok(())
    }
}

/// Wire protocol spoken by the completion server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum CompletionApi {
    /// `POST /v1/completions` with `{prompt, max_tokens}`.
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    /// `POST /completion` with `{prompt, n_predict}`.
    #[serde(rename = "llama-cpp")]
    LlamaCpp,
}

impl CompletionApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::LlamaCpp => "llama-cpp",
        }
    }
}

impl std::fmt::Display for CompletionApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference engine returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("inference engine returned an unreadable body: {0}")]
    Decode(String),
}

/// Create the configured inference engine.
pub fn create_engine(config: &InferenceConfig) -> anyhow::Result<Arc<dyn InferenceEngine>> {
    let engine = http::HttpCompletionEngine::from_config(config)?;
    tracing::info!(
        api = %config.api,
        endpoint = %config.endpoint,
        "inference engine configured"
    );
    Ok(Arc::new(engine))
}
