//! The request pipeline: relevance filter → prompt composer → inference.
//!
//! [`Predictor`] owns every dependency a request needs. It is built once at
//! startup and shared read-only between handlers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::facts::{FactMatcher, FactStore};
use crate::inference::{InferenceEngine, InferenceError};
use crate::prompt::PromptContext;

/// Body of `POST /predict`. Missing fields are treated as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub prompt: String,
    pub sys_msg: String,
}

impl PredictRequest {
    pub fn new(prompt: impl Into<String>, sys_msg: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            sys_msg: sys_msg.into(),
        }
    }
}

/// Body returned by `POST /predict`: the engine's result, verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub response: serde_json::Value,
}

/// A composed prompt and how many facts went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub prompt: String,
    pub fact_count: usize,
}

pub struct Predictor {
    facts: Arc<FactStore>,
    matcher: Arc<dyn FactMatcher>,
    engine: Arc<dyn InferenceEngine>,
    max_tokens: u32,
}

impl Predictor {
    pub fn new(
        facts: Arc<FactStore>,
        matcher: Arc<dyn FactMatcher>,
        engine: Arc<dyn InferenceEngine>,
        max_tokens: u32,
    ) -> Self {
        Self {
            facts,
            matcher,
            engine,
            max_tokens,
        }
    }

    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    pub fn engine(&self) -> &dyn InferenceEngine {
        self.engine.as_ref()
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Retrieve facts for the request and build the instruction string.
    pub fn compose(&self, request: &PredictRequest) -> ComposedPrompt {
        let retrieved = self
            .facts
            .relevant_facts(&request.prompt, self.matcher.as_ref());
        let fact_count = retrieved.len();
        let prompt = PromptContext::new(&request.sys_msg, retrieved, &request.prompt).render();
        ComposedPrompt { prompt, fact_count }
    }

    /// Run the whole pipeline for one request.
    pub async fn predict(
        &self,
        request: &PredictRequest,
    ) -> Result<serde_json::Value, InferenceError> {
        let composed = self.compose(request);
        info!(
            facts = composed.fact_count,
            prompt_len = composed.prompt.len(),
            engine = self.engine.name(),
            "prompt composed"
        );
        self.engine.generate(&composed.prompt, self.max_tokens).await
    }
}
