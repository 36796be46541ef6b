mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride::memory::types::MemoryKind;
use stride::{config, server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stride", version, about = "Fitness coaching backend: streaks, sessions, and coaching memory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Check database health
    Doctor,
    /// Show the current streak
    Streak,
    /// Inspect or add coaching memory
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },
    /// Delete all coaching memory (asks for confirmation)
    ResetMemory,
}

#[derive(Subcommand)]
enum MemoryAction {
    /// List the newest entries
    List {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Store a new entry
    Add {
        /// fact, preference, goal or context
        kind: MemoryKind,
        content: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::StrideConfig::load()?;

    // Log to stderr so stdout stays clean for CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => server::serve(config).await?,
        Command::Doctor => cli::doctor::doctor(&config)?,
        Command::Streak => cli::streak::streak(&config)?,
        Command::Memory { action } => match action {
            MemoryAction::List { limit } => cli::memory::list(&config, limit)?,
            MemoryAction::Add { kind, content } => cli::memory::add(&config, kind, &content)?,
        },
        Command::ResetMemory => cli::reset::reset_memory(&config)?,
    }

    Ok(())
}
