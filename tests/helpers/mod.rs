#![allow(dead_code)]

use async_trait::async_trait;
use lore::facts::{FactRecord, FactStore, SubstringMatcher};
use lore::inference::{InferenceEngine, InferenceError};
use lore::predict::Predictor;
use std::sync::{Arc, Mutex};

/// Build a fact store from `(keywords, fact)` pairs.
pub fn store(records: &[(&[&str], &str)]) -> FactStore {
    FactStore::new(
        records
            .iter()
            .map(|(keywords, fact)| FactRecord::new(keywords.iter().copied(), *fact)),
    )
    .unwrap()
}

/// Engine double that records prompts and returns a canned completion.
#[derive(Default)]
pub struct FakeEngine {
    pub prompts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl FakeEngine {
    pub fn failing() -> Self {
        Self {
            prompts: Mutex::default(),
            fail: true,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<serde_json::Value, InferenceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(InferenceError::Decode("engine exploded".into()));
        }
        Ok(serde_json::json!({
            "object": "text_completion",
            "choices": [{ "text": "Because dogs bark.", "index": 0 }],
            "usage": { "completion_tokens": 4, "max_tokens": max_tokens },
        }))
    }
}

/// A predictor over `facts` with substring matching and the given engine.
pub fn predictor(facts: FactStore, engine: Arc<FakeEngine>) -> Predictor {
    Predictor::new(Arc::new(facts), Arc::new(SubstringMatcher), engine, 1000)
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_app(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
