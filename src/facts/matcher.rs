//! Matching strategies deciding whether a fact applies to a query.

use serde::Deserialize;
use std::sync::Arc;

use super::types::Fact;

/// Decides whether a fact is relevant to a query.
///
/// `query` is already lowercased by the caller; fact keywords are lowercase
/// by construction.
pub trait FactMatcher: Send + Sync {
    fn matches(&self, fact: &Fact, query: &str) -> bool;
}

/// A fact matches when any keyword occurs anywhere in the query.
/// `"cat"` matches `"category"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl FactMatcher for SubstringMatcher {
    fn matches(&self, fact: &Fact, query: &str) -> bool {
        fact.keywords().iter().any(|k| query.contains(k.as_str()))
    }
}

/// A fact matches when a keyword equals a whole word of the query, or for
/// multi-word keywords, a run of consecutive words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeWordMatcher;

impl FactMatcher for WholeWordMatcher {
    fn matches(&self, fact: &Fact, query: &str) -> bool {
        let words = tokenize(query);
        fact.keywords().iter().any(|keyword| {
            let needle = tokenize(keyword);
            !needle.is_empty() && words.windows(needle.len()).any(|w| w == needle.as_slice())
        })
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Configurable choice of [`FactMatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum MatchStrategy {
    #[default]
    #[serde(rename = "substring")]
    Substring,
    #[serde(rename = "word")]
    WholeWord,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::WholeWord => "word",
        }
    }

    pub fn matcher(&self) -> Arc<dyn FactMatcher> {
        match self {
            Self::Substring => Arc::new(SubstringMatcher),
            Self::WholeWord => Arc::new(WholeWordMatcher),
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
