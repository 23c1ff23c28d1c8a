//! CLI `prompt` and `ask` commands: run the pipeline once from the terminal.

use anyhow::{Context, Result};

use lore::config::LoreConfig;
use lore::facts::FactStore;
use lore::predict::PredictRequest;
use lore::prompt;

/// Print the composed prompt without contacting the engine.
pub fn print_prompt(config: &LoreConfig, query: &str, sys_msg: &str) -> Result<()> {
    let path = config.resolved_facts_path();
    let store = FactStore::open(path.as_deref()).context("failed to load fact store")?;
    let matcher = config.facts.matching.matcher();

    let facts = store.relevant_facts(query, matcher.as_ref());
    println!("{}", prompt::compose(sys_msg, &facts, query));
    Ok(())
}

/// Send one query through retrieval, composition and inference.
pub async fn ask(config: &LoreConfig, query: &str, sys_msg: &str) -> Result<()> {
    let predictor = lore::server::setup_predictor(config)?;
    let request = PredictRequest::new(query, sys_msg);

    let response = predictor
        .predict(&request)
        .await
        .context("inference failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
