//! Inventory CLI
//!
//! Main entry point for the inventory command-line tool.
//! Provides stock lookups and updates plus questions answered over the
//! inventory file by a hosted chat model.

mod commands;
mod form;
mod render;
mod session;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ConsoleCommand, DemoCommand, StockCommand};
use inventory_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Inventory CLI - stock management with retrieval-augmented questions
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(about = "Stock management with retrieval-augmented questions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the inventory CSV file
    #[arg(short, long, global = true, env = "INVENTORY_SOURCE")]
    source: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Chat model identifier
    #[arg(short, long, global = true, env = "INVENTORY_MODEL")]
    model: Option<String>,

    /// Embedding provider (openai, mock)
    #[arg(long, global = true, env = "INVENTORY_EMBEDDING_PROVIDER")]
    embedding_provider: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read or change stock quantities
    Stock(StockCommand),

    /// Ask a question about the inventory
    Ask(AskCommand),

    /// Run the scripted demo
    Demo(DemoCommand),

    /// Interactive console
    Console(ConsoleCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load(cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.source,
        cli.model,
        cli.embedding_provider,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Inventory CLI starting");
    tracing::debug!("Source: {:?}", config.source_path);
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Model: {}", config.llm.model);

    let command_name = match &cli.command {
        Commands::Stock(_) => "stock",
        Commands::Ask(_) => "ask",
        Commands::Demo(_) => "demo",
        Commands::Console(_) => "console",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Stock(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Demo(cmd) => cmd.execute(&config).await,
        Commands::Console(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
