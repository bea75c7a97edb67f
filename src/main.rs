use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Community achievement points ledger with leaderboards and daily progress")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.tally/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record level completions for a user
    Submit {
        /// Stable account id of the submitting user
        #[arg(short, long)]
        user: String,

        /// Completions as difficulty=count pairs (repeatable)
        #[arg(short, long = "entry", required = true)]
        entries: Vec<String>,

        /// Calendar date of the completions (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Freeform note stored with the submission
        #[arg(long)]
        note: Option<String>,
    },

    /// Show the total points leaderboard
    Leaderboard {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Print daily points data for charting
    Graph {
        /// Per-user cumulative series instead of community daily totals
        #[arg(long)]
        per_user: bool,
    },

    /// Initialize a new config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Commands::Init { force } = cli.command {
        return cli::init::init_command(cli.config, force).await;
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Submit {
            user,
            entries,
            date,
            note,
        } => {
            cli::submit::submit_command(&config, user, entries, date, note).await?;
        }
        Commands::Leaderboard { limit } => {
            cli::leaderboard::leaderboard_command(&config, limit).await?;
        }
        Commands::Graph { per_user } => {
            cli::graph::graph_command(&config, per_user).await?;
        }
        Commands::Init { .. } => unreachable!("handled above"),
    }

    Ok(())
}
