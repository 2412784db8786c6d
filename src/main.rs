use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cadence_engine::config::Config;
use cadence_engine::input::{load_cadence, load_items, parse_reference_time};
use cadence_engine::scheduler::{
    format_timestamp, CompletionForecaster, CreationScheduleSimulator, PhaseStatus, SlotAllocator,
};

#[derive(Parser)]
#[command(
    name = "cadence",
    version,
    about = "Cadence-aware publish slot allocation and phase completion forecasting",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to a TOML config file (defaults to CADENCE_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the next open publish slot
    NextSlot {
        /// JSON file with the cadence ({"period", "frequency", "allowedDays"})
        #[arg(long)]
        cadence: PathBuf,

        /// JSON file with already-scheduled items ([{"status", "scheduledFor"}])
        #[arg(long)]
        items: Option<PathBuf>,

        /// Reference time (ISO-8601, defaults to the current time)
        #[arg(long)]
        now: Option<String>,

        /// Number of consecutive slots to allocate
        #[arg(
            short = 'n',
            long,
            default_value = "1",
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        count: u32,
    },

    /// Forecast when a phase's planned work will be placed
    Forecast {
        /// JSON file with the cadence
        #[arg(long)]
        cadence: PathBuf,

        /// Phase status (suggestion, planned, in_progress, observing, completed, dismissed)
        #[arg(long, default_value = "planned")]
        phase_status: String,

        /// Planned content creations
        #[arg(long, default_value = "0")]
        creations: u32,

        /// Planned content updates
        #[arg(long, default_value = "0")]
        updates: u32,

        /// Reference time (ISO-8601, defaults to the current time)
        #[arg(long)]
        now: Option<String>,

        /// Print the simulated per-day placements
        #[arg(long, default_value = "false")]
        details: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::NextSlot {
            cadence,
            items,
            now,
            count,
        } => {
            tracing::info!(
                cadence = %cadence.display(),
                items = ?items,
                now = ?now,
                count = %count,
                "Starting next-slot command"
            );
            next_slot(&config, &cadence, items.as_deref(), now.as_deref(), count)?;
        }

        Commands::Forecast {
            cadence,
            phase_status,
            creations,
            updates,
            now,
            details,
        } => {
            tracing::info!(
                cadence = %cadence.display(),
                phase_status = %phase_status,
                creations = %creations,
                updates = %updates,
                now = ?now,
                "Starting forecast command"
            );
            forecast(
                &config,
                &cadence,
                &phase_status,
                creations,
                updates,
                now.as_deref(),
                details,
            )?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("cadence_engine=debug,cadence=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("cadence_engine={level},cadence={level},warn"))
            .with_context(|| format!("Invalid log level: {level}"))?
    };

    // Logs go to stderr so stdout stays machine-readable
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => Ok(parse_reference_time(raw)?),
        None => Ok(Utc::now()),
    }
}

fn next_slot(
    config: &Config,
    cadence_path: &Path,
    items_path: Option<&Path>,
    now: Option<&str>,
    count: u32,
) -> Result<()> {
    let cadence = load_cadence(cadence_path)?;
    let items = load_items(items_path)?;
    let now = resolve_now(now)?;
    let allocator = SlotAllocator::with_settings(config.engine.clone());

    let slots = allocator.allocate_sequence(&cadence, &items, now, count as usize)?;
    if slots.is_empty() {
        println!("none");
        return Ok(());
    }

    for slot in slots {
        println!("{}", format_timestamp(slot));
    }
    Ok(())
}

fn forecast(
    config: &Config,
    cadence_path: &Path,
    phase_status: &str,
    creations: u32,
    updates: u32,
    now: Option<&str>,
    details: bool,
) -> Result<()> {
    let cadence = load_cadence(cadence_path)?;
    let status: PhaseStatus = phase_status.parse()?;
    let now = resolve_now(now)?;

    let forecaster = CompletionForecaster::with_settings(config.engine.clone());
    let target = forecaster.target_completion_date(status, &cadence, creations, updates, now)?;

    match target {
        Some(at) => println!("{}", format_timestamp(at)),
        None => println!("none"),
    }

    if details && status.is_committed() && creations > 0 {
        let simulation = CreationScheduleSimulator::with_settings(config.engine.clone())
            .simulate(creations, &cadence, now)?;
        for placement in &simulation.placements {
            println!("  {}  {}", placement.date, placement.placed);
        }
    }

    Ok(())
}
