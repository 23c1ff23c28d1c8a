//! CLI `facts` commands: list the fact store and preview retrieval.

use anyhow::{Context, Result};

use lore::config::LoreConfig;
use lore::facts::FactStore;

fn open_store(config: &LoreConfig) -> Result<FactStore> {
    let path = config.resolved_facts_path();
    FactStore::open(path.as_deref()).context("failed to load fact store")
}

/// Print every fact with its keywords.
pub fn list(config: &LoreConfig) -> Result<()> {
    let store = open_store(config)?;

    if store.is_empty() {
        println!("No facts loaded.");
        return Ok(());
    }

    println!("{} fact(s)\n", store.len());
    for (i, fact) in store.facts().iter().enumerate() {
        println!("  {}. [{}]", i + 1, fact.keywords().join(", "));
        println!("     {}", fact.text());
        println!();
    }
    Ok(())
}

/// Print the facts retrieved for `query` with the configured matcher.
pub fn show_matches(config: &LoreConfig, query: &str) -> Result<()> {
    let store = open_store(config)?;
    let matcher = config.facts.matching.matcher();
    let facts = store.relevant_facts(query, matcher.as_ref());

    if facts.is_empty() {
        println!("No facts match ({} matching).", config.facts.matching);
        return Ok(());
    }

    println!(
        "{} fact(s) match ({} matching)\n",
        facts.len(),
        config.facts.matching
    );
    for (i, text) in facts.iter().enumerate() {
        println!("  {}. {}", i + 1, text);
    }
    Ok(())
}
