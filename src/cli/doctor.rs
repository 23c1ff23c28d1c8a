//! CLI `doctor` command: check configuration, facts, and engine reachability.

use anyhow::Result;

use lore::config::LoreConfig;
use lore::facts::FactStore;
use lore::inference;

/// Run diagnostics and print a health report.
pub async fn doctor(config: &LoreConfig) -> Result<()> {
    println!("Lore Health Report");
    println!("==================");
    println!();
    println!("Listen address:    {}", config.bind_addr());
    println!("Log level:         {}", config.server.log_level);
    println!();

    let facts_path = config.resolved_facts_path();
    println!(
        "Fact source:       {}",
        facts_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".into())
    );
    println!("Matching:          {}", config.facts.matching);
    match FactStore::open(facts_path.as_deref()) {
        Ok(store) => println!("Facts:             {} loaded, OK", store.len()),
        Err(e) => println!("Facts:             FAILED ({e})"),
    }
    println!();

    println!("Engine API:        {}", config.inference.api);
    println!("Engine endpoint:   {}", config.inference.endpoint);
    println!("Max tokens:        {}", config.inference.max_tokens);
    let engine = inference::create_engine(&config.inference)?;
    match engine.health().await {
        Ok(()) => println!("Engine status:     reachable"),
        Err(e) => {
            println!("Engine status:     UNREACHABLE ({e})");
            println!("  Start a completion server, e.g.:");
            println!("  llama-server -m {} --port 8080", config.resolved_model_path().display());
        }
    }
    println!();

    let model_path = config.resolved_model_path();
    if model_path.exists() {
        println!("Model file:        {}", model_path.display());
    } else {
        println!("Model file:        not found at {}", model_path.display());
        println!("Run `lore model download` to fetch it.");
    }

    Ok(())
}
