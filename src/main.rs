mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seqthink::config::SeqthinkConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seqthink", version, about = "Sequential thinking MCP server with branches and handoffs")]
struct Cli {
    /// Config file to load instead of ~/.seqthink/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport). Default when no command is given.
    Serve,
    /// Check configuration and the handoff directory before connecting a client
    Doctor,
    /// Summarize a handoff document without resuming it
    Inspect {
        /// Handoff filename (relative to the handoff directory) or path
        file: String,
    },
    /// List handoff documents, newest first
    Handoffs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SeqthinkConfig::load_from(path)?,
        None => SeqthinkConfig::load()?,
    };

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            server::serve_stdio(config).await?;
        }
        Command::Doctor => {
            let config_path = cli.config.unwrap_or_else(seqthink::config::default_config_path);
            cli::doctor::doctor(&config, &config_path)?;
        }
        Command::Inspect { file } => {
            cli::inspect::inspect(&config, &file)?;
        }
        Command::Handoffs => {
            cli::handoffs::handoffs(&config)?;
        }
    }

    Ok(())
}
