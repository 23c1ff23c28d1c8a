//! Keyword-tagged facts and the relevance filter over them.
//!
//! A [`FactStore`] is built once at startup from a TOML/JSON file or the
//! built-in list, and is read-only afterwards. [`FactStore::relevant`] walks
//! the store in definition order and yields every fact the configured
//! [`FactMatcher`] accepts for a query.

pub mod matcher;
pub mod store;
pub mod types;

pub use matcher::{FactMatcher, MatchStrategy, SubstringMatcher, WholeWordMatcher};
pub use store::FactStore;
pub use types::{Fact, FactRecord, FactStoreError};
