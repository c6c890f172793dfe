//! Ronda CLI binary.
//!
//! Provides a command-line interface for the ronda portfolio metrics engine.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Portfolio totals and fundamental metrics", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the metric catalogue
    Metrics {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a metrics report from a CSV snapshot
    Report {
        /// Long-format CSV with holding, field, period and value columns
        #[arg(short, long)]
        input: PathBuf,

        /// JSON engine configuration (defaults to $RONDA_CONFIG, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Holdings to exclude for a recalculated report alongside the full one
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Only report the most recent period
        #[arg(long)]
        latest: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Aligned table per metric
    Text,
    /// Long-format CSV
    Csv,
    /// JSON rows
    Json,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ronda=info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Metrics { category, verbose } => {
            cmd::metrics::list_metrics(category, verbose)?;
        }
        Commands::Report {
            input,
            config,
            exclude,
            latest,
            format,
            output,
        } => {
            let options = cmd::report::ReportOptions {
                input,
                config,
                exclude,
                latest,
                format,
                output,
            };
            cmd::report::run_report(options).await?;
        }
    }

    Ok(())
}
