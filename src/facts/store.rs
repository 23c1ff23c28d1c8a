//! The in-memory fact store and its relevance filter.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use super::matcher::FactMatcher;
use super::types::{Fact, FactRecord, FactStoreError};

const BUILTIN_FACTS: &str = include_str!("builtin_facts.toml");

/// Top-level layout of a TOML fact file (`[[facts]]` tables).
#[derive(Debug, Deserialize)]
struct FactFile {
    #[serde(default)]
    facts: Vec<FactRecord>,
}

/// Read-only, ordered collection of validated facts.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: Vec<Fact>,
}

impl FactStore {
    /// Validate and normalize `records`, keeping their order.
    pub fn new(records: impl IntoIterator<Item = FactRecord>) -> Result<Self, FactStoreError> {
        let facts = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Fact::from_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { facts })
    }

    /// The facts compiled into the binary.
    pub fn builtin() -> Result<Self, FactStoreError> {
        Self::from_toml_str(BUILTIN_FACTS, "built-in facts")
    }

    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, FactStoreError> {
        let file: FactFile = toml::from_str(contents).map_err(|source| FactStoreError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        Self::new(file.facts)
    }

    /// Parse a JSON array of `{"keywords": [..], "fact": ".."}` records.
    pub fn from_json_str(contents: &str, origin: &str) -> Result<Self, FactStoreError> {
        let records: Vec<FactRecord> =
            serde_json::from_str(contents).map_err(|source| FactStoreError::Json {
                origin: origin.to_string(),
                source,
            })?;
        Self::new(records)
    }

    /// Load a fact file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FactStoreError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str, &str) -> Result<Self, FactStoreError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(FactStoreError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let contents = std::fs::read_to_string(path).map_err(|source| FactStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = parse(&contents, &path.display().to_string())?;
        debug!(path = %path.display(), facts = store.len(), "fact file parsed");
        Ok(store)
    }

    /// Load from `path` when given, otherwise fall back to the built-in facts.
    pub fn open(path: Option<&Path>) -> Result<Self, FactStoreError> {
        let store = match path {
            Some(path) => Self::load(path)?,
            None => Self::builtin()?,
        };
        info!(
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".into()),
            facts = store.len(),
            "fact store loaded"
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Lazily yield the text of every fact `matcher` accepts for `query`,
    /// in store order. The query is lowercased once up front.
    pub fn relevant<'a>(
        &'a self,
        query: &str,
        matcher: &'a dyn FactMatcher,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let query = query.to_lowercase();
        self.facts
            .iter()
            .filter(move |fact| matcher.matches(fact, &query))
            .map(Fact::text)
    }

    /// Collect [`relevant`](Self::relevant) into a vector.
    pub fn relevant_facts<'a>(&'a self, query: &str, matcher: &'a dyn FactMatcher) -> Vec<&'a str> {
        self.relevant(query, matcher).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::matcher::SubstringMatcher;

    fn dog_store() -> FactStore {
        FactStore::new([FactRecord::new(["dog"], "Dogs bark.")]).unwrap()
    }

    #[test]
    fn builtin_facts_are_valid() {
        let store = FactStore::builtin().unwrap();
        assert!(!store.is_empty());
        for fact in store.facts() {
            assert!(!fact.keywords().is_empty());
            assert!(fact.keywords().iter().all(|k| !k.is_empty()));
        }
    }

    #[test]
    fn mixed_case_query_matches() {
        let store = dog_store();
        let facts = store.relevant_facts("Why does my Dog bark?", &SubstringMatcher);
        assert_eq!(facts, vec!["Dogs bark."]);
    }

    #[test]
    fn unrelated_query_matches_nothing() {
        let store = dog_store();
        assert!(store.relevant_facts("Tell me about cats", &SubstringMatcher).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let store = FactStore::builtin().unwrap();
        assert!(store.relevant_facts("", &SubstringMatcher).is_empty());
    }

    #[test]
    fn results_follow_store_order_not_query_order() {
        let store = FactStore::new([
            FactRecord::new(["pet", "dog"], "Dogs are pets."),
            FactRecord::new(["pet", "cat"], "Cats are pets."),
        ])
        .unwrap();
        let facts = store.relevant_facts("cat and dog pet care", &SubstringMatcher);
        assert_eq!(facts, vec!["Dogs are pets.", "Cats are pets."]);
    }

    #[test]
    fn padded_keyword_matches_only_as_written() {
        let store = FactStore::new([FactRecord::new([" cat "], "Cats purr.")]).unwrap();
        assert!(store.relevant_facts("pick a category", &SubstringMatcher).is_empty());
        assert_eq!(
            store.relevant_facts("my cat sleeps", &SubstringMatcher),
            vec!["Cats purr."]
        );
    }

    #[test]
    fn fact_matching_several_keywords_appears_once() {
        let store = FactStore::new([FactRecord::new(["dog", "bark"], "Dogs bark.")]).unwrap();
        let facts = store.relevant_facts("dog bark", &SubstringMatcher);
        assert_eq!(facts, vec!["Dogs bark."]);
    }

    #[test]
    fn relevant_is_lazy_and_restartable() {
        let store = dog_store();
        let mut iter = store.relevant("dog", &SubstringMatcher);
        assert_eq!(iter.next(), Some("Dogs bark."));
        assert_eq!(iter.next(), None);
        // The store is untouched; a second scan gives the same answer.
        assert_eq!(store.relevant_facts("dog", &SubstringMatcher), vec!["Dogs bark."]);
    }

    #[test]
    fn construction_reports_failing_index() {
        let err = FactStore::new([
            FactRecord::new(["dog"], "Dogs bark."),
            FactRecord::new([""], "Broken."),
        ])
        .unwrap_err();
        assert!(matches!(err, FactStoreError::EmptyKeyword { index: 1 }));
    }

    #[test]
    fn parse_toml_facts() {
        let toml_str = r#"
[[facts]]
keywords = ["Moon"]
fact = "The Moon orbits Earth."
"#;
        let store = FactStore::from_toml_str(toml_str, "test").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.facts()[0].keywords(), ["moon"]);
    }

    #[test]
    fn parse_json_facts() {
        let json = r#"[{"keywords": ["dog"], "fact": "Dogs bark."},
                       {"keywords": ["cat"], "fact": "Cats purr."}]"#;
        let store = FactStore::from_json_str(json, "test").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.facts()[1].text(), "Cats purr.");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = FactStore::from_json_str("{not json", "inline").unwrap_err();
        assert!(matches!(err, FactStoreError::Json { .. }));
        assert!(err.to_string().contains("inline"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FactStore::load("/tmp/facts.yaml").unwrap_err();
        assert!(matches!(err, FactStoreError::UnsupportedFormat { .. }));
    }
}
