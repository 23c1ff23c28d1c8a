//! Fact-augmented prompting for local language models.
//!
//! Lore is a small HTTP service that sits in front of a local completion
//! server. For every request it picks the facts whose keywords appear in the
//! user's prompt, folds them into the system message, wraps everything in the
//! Llama-2 chat template and forwards the result to the model.
//!
//! # Request flow
//!
//! ```text
//! POST /predict → FactStore::relevant → PromptContext::render → InferenceEngine::generate
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`facts`]: Fact store, validation, and pluggable keyword matching
//! - [`prompt`]: System-message augmentation and the instruction template
//! - [`inference`]: Engine trait and the HTTP completion client
//! - [`predict`]: The per-request pipeline tying the above together
//! - [`server`]: Axum router and server entry point

pub mod config;
pub mod facts;
pub mod inference;
pub mod predict;
pub mod prompt;
pub mod server;
