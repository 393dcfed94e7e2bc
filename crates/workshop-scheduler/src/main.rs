//! Workshop Scheduler CLI.
//!
//! Generate, evaluate or serve workshop timetables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workshop_scheduler::{
    AppState, DayListing, Evaluation, generate_seeded, resolve_config, router, summarize,
};

#[derive(Parser)]
#[command(name = "workshop-scheduler")]
#[command(about = "Greedy timetable generation for multi-day workshops")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a schedule and print it.
    Generate {
        /// Config file (JSON or TOML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a schedule and report evaluation metrics.
    Evaluate {
        /// Config file (JSON or TOML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Output file for the metrics (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the HTTP endpoint.
    Serve {
        /// Address to bind
        #[arg(long, env = "SCHEDULER_HOST", default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "SCHEDULER_PORT", default_value = "5000")]
        port: u16,
        /// Base random seed; each request advances it by one
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Results written to: {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Generate {
            config,
            seed,
            format,
            output,
        } => {
            let config = resolve_config(config.as_deref())?;
            let schedule = generate_seeded(&config, seed);

            let rendered = match format {
                Format::Text => format!(
                    "{}\n{}",
                    DayListing::new(&config, &schedule),
                    schedule.stats()
                ),
                Format::Json => serde_json::to_string_pretty(&summarize(&config, &schedule))?,
            };

            match output {
                Some(path) => write_output(&path, &rendered)?,
                None => println!("{}", rendered),
            }
        }

        Commands::Evaluate {
            config,
            seed,
            output,
        } => {
            let config = resolve_config(config.as_deref())?;
            let schedule = generate_seeded(&config, seed);
            let evaluation = Evaluation::new(&config, &schedule);

            println!("{}", evaluation);

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&evaluation)?;
                write_output(&path, &json)?;
            }
        }

        Commands::Serve { host, port, seed } => {
            let listener = TcpListener::bind((host.as_str(), port))
                .await
                .with_context(|| format!("failed to bind {}:{}", host, port))?;
            info!(%host, port, seed, "Schedule server listening");
            axum::serve(listener, router(AppState::new(seed))).await?;
        }
    }

    Ok(())
}
