use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::facts::MatchStrategy;
use crate::inference::CompletionApi;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LoreConfig {
    pub server: ServerConfig,
    pub facts: FactsConfig,
    pub inference: InferenceConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FactsConfig {
    /// TOML or JSON fact file. `None` uses the built-in facts.
    pub path: Option<String>,
    pub matching: MatchStrategy,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InferenceConfig {
    pub api: CompletionApi,
    pub endpoint: String,
    /// Fixed generation bound applied to every request.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub url: String,
    pub cache_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5002,
            log_level: "info".into(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api: CompletionApi::default(),
            endpoint: "http://127.0.0.1:8080".into(),
            max_tokens: 1000,
            timeout_secs: 120,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let cache_dir = default_lore_dir()
            .join("models")
            .to_string_lossy()
            .into_owned();
        Self {
            name: "llama-2-7b-chat.Q2_K.gguf".into(),
            url: "https://huggingface.co/TheBloke/Llama-2-7B-Chat-GGUF/resolve/main/llama-2-7b-chat.Q2_K.gguf"
                .into(),
            cache_dir,
        }
    }
}

/// Returns `~/.lore/`
pub fn default_lore_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lore")
}

/// Returns the default config file path: `~/.lore/config.toml`
pub fn default_config_path() -> PathBuf {
    default_lore_dir().join("config.toml")
}

impl LoreConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            LoreConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (LORE_HOST, LORE_PORT, LORE_LOG_LEVEL, LORE_FACTS, LORE_ENGINE_URL, LORE_MAX_TOKENS).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LORE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("LORE_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("LORE_PORT is not a port number: {val}"))?;
        }
        if let Ok(val) = std::env::var("LORE_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("LORE_FACTS") {
            self.facts.path = Some(val);
        }
        if let Ok(val) = std::env::var("LORE_ENGINE_URL") {
            self.inference.endpoint = val;
        }
        if let Ok(val) = std::env::var("LORE_MAX_TOKENS") {
            self.inference.max_tokens = val
                .parse()
                .with_context(|| format!("LORE_MAX_TOKENS is not a number: {val}"))?;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolved fact file path, expanding `~` if needed.
    pub fn resolved_facts_path(&self) -> Option<PathBuf> {
        self.facts.path.as_deref().map(expand_tilde)
    }

    /// Full path of the configured model file inside the cache directory.
    pub fn resolved_model_path(&self) -> PathBuf {
        expand_tilde(&self.model.cache_dir).join(&self.model.name)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
