//! Environment overrides live in their own test binary: they mutate
//! process-wide variables that every other config load would observe.

use lore::config::LoreConfig;
use tempfile::TempDir;

#[test]
fn env_overrides_apply_on_load() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[server]\nport = 6000\n\n[inference]\nmax_tokens = 64\n",
    )
    .unwrap();

    std::env::set_var("LORE_PORT", "7777");
    std::env::set_var("LORE_FACTS", "/tmp/override.json");
    std::env::set_var("LORE_ENGINE_URL", "http://localhost:9999");
    std::env::set_var("LORE_MAX_TOKENS", "256");

    let config = LoreConfig::load_from(&config_path).unwrap();

    assert_eq!(config.server.port, 7777);
    assert_eq!(config.facts.path.as_deref(), Some("/tmp/override.json"));
    assert_eq!(config.inference.endpoint, "http://localhost:9999");
    assert_eq!(config.inference.max_tokens, 256);

    std::env::set_var("LORE_PORT", "not-a-port");
    assert!(LoreConfig::load_from(&config_path).is_err());

    // Clean up
    std::env::remove_var("LORE_PORT");
    std::env::remove_var("LORE_FACTS");
    std::env::remove_var("LORE_ENGINE_URL");
    std::env::remove_var("LORE_MAX_TOKENS");

    let config = LoreConfig::load_from(&config_path).unwrap();
    assert_eq!(config.server.port, 6000);
    assert_eq!(config.inference.max_tokens, 64);
}
