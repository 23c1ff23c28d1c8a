//! Fact type definitions.
//!
//! [`FactRecord`] is the definition shape found in fact files and in code.
//! [`Fact`] is a validated, normalized record owned by a
//! [`FactStore`](super::FactStore); it can only be built through store
//! construction, so every `Fact` in the process has at least one non-empty,
//! lowercase keyword.

use serde::{Deserialize, Serialize};

/// A fact as written by a human: `{ keywords: [..], fact: ".." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRecord {
    pub keywords: Vec<String>,
    pub fact: String,
}

impl FactRecord {
    pub fn new<K, S>(keywords: K, fact: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            fact: fact.into(),
        }
    }
}

/// A validated fact. Immutable for the lifetime of its store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    keywords: Vec<String>,
    text: String,
}

impl Fact {
    /// Normalize and validate a record. `index` is the record's position in
    /// its source and is only used for error reporting.
    pub(crate) fn from_record(index: usize, record: FactRecord) -> Result<Self, FactStoreError> {
        if record.fact.trim().is_empty() {
            return Err(FactStoreError::EmptyFact { index });
        }
        if record.keywords.is_empty() {
            return Err(FactStoreError::NoKeywords { index });
        }

        let mut keywords: Vec<String> = Vec::with_capacity(record.keywords.len());
        for raw in &record.keywords {
            // Surrounding spaces are kept: `" cat "` must not match "category".
            let keyword = raw.to_lowercase();
            if keyword.trim().is_empty() {
                return Err(FactStoreError::EmptyKeyword { index });
            }
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }

        Ok(Self {
            keywords,
            text: record.fact,
        })
    }

    /// Lowercase, deduplicated keywords in definition order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Errors raised while building a [`FactStore`](super::FactStore).
#[derive(Debug, thiserror::Error)]
pub enum FactStoreError {
    #[error("fact #{index} has an empty keyword")]
    EmptyKeyword { index: usize },

    #[error("fact #{index} has no keywords")]
    NoKeywords { index: usize },

    #[error("fact #{index} has empty text (facts without text are refused at load)")]
    EmptyFact { index: usize },

    #[error("failed to read fact file {}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML facts from {origin}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON facts from {origin}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported fact file {} (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: std::path::PathBuf },
}
