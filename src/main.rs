use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use unirag::config::{UniragConfig, DEFAULT_CONFIG_PATH};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Hybrid retrieval for university program questions", long_about = None)]
struct Cli {
    /// Config file (defaults to .unirag/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run hybrid retrieval for a question
    Ask {
        /// The question, e.g. "điểm chuẩn ngành Trí tuệ nhân tạo năm 2024"
        query: String,

        /// Number of semantic results (defaults to retrieval.k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Output the full result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the query type and matched program without touching any index
    Classify {
        query: String,
    },

    /// Structured cutoff-score lookup only (JSON)
    Scores {
        query: String,
    },

    /// List known programs in match order
    Majors,

    /// Check configuration, index and snapshot health
    Doctor,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("unirag=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = UniragConfig::load(&config_path)?;

    match cli.command {
        Commands::Ask { query, k, json } => {
            commands::ask::execute(&config, &query, k, json)?;
        }
        Commands::Classify { query } => {
            commands::classify::execute(&query);
        }
        Commands::Scores { query } => {
            commands::scores::execute(&config, &query)?;
        }
        Commands::Majors => {
            commands::majors::execute();
        }
        Commands::Doctor => {
            commands::doctor::execute(&config, &config_path);
        }
    }

    Ok(())
}
