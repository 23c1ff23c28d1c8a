mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lore::config::LoreConfig;

#[derive(Parser)]
#[command(name = "lore", version, about = "Fact-augmented prompt server for local LLMs")]
struct Cli {
    /// Config file (defaults to ~/.lore/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Inspect the fact store
    Facts {
        #[command(subcommand)]
        action: FactsAction,
    },
    /// Print the prompt that would be sent to the model
    Prompt {
        query: String,
        #[arg(long, default_value = "")]
        sys_msg: String,
    },
    /// Run one query through the full pipeline and print the engine result
    Ask {
        query: String,
        #[arg(long, default_value = "")]
        sys_msg: String,
    },
    /// Check configuration, facts, and engine reachability
    Doctor,
    /// Manage the model file
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum FactsAction {
    /// List every loaded fact with its keywords
    List,
    /// Show which facts a query retrieves
    Match { query: String },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the configured GGUF model to ~/.lore/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LoreConfig::load_from(path)?,
        None => LoreConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => lore::server::serve(config).await?,
        Command::Facts { action } => match action {
            FactsAction::List => cli::facts::list(&config)?,
            FactsAction::Match { query } => cli::facts::show_matches(&config, &query)?,
        },
        Command::Prompt { query, sys_msg } => cli::ask::print_prompt(&config, &query, &sys_msg)?,
        Command::Ask { query, sys_msg } => cli::ask::ask(&config, &query, &sys_msg).await?,
        Command::Doctor => cli::doctor::doctor(&config).await?,
        Command::Model { action } => match action {
            ModelAction::Download => cli::model_download(&config).await?,
        },
    }

    Ok(())
}
