mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use naed_core::{DistanceResult, Report, evaluate};
use naed_store::Store;

use crate::config::{FileConfig, Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "naed",
    about = "Normalized accuracy of profile feedback tables against a reference table"
)]
struct Cli {
    /// Profiler database to read [default: ddp.db]
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Comma-separated tables to measure [default: feedback]
    #[arg(short, long, value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// Table to normalize accuracy against [default: perf_feedback]
    #[arg(short, long)]
    norm: Option<String>,

    /// Column width of the text table [default: 20]
    #[arg(long)]
    width: Option<usize>,

    /// Characters kept from each value [default: 7]
    #[arg(long)]
    cell: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// TOML config file (falls back to $NAED_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long)]
    verbose: bool,

    /// Applications to report on (default: every application in the database)
    apps: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let file = match config::config_path(cli.config.as_deref()) {
        Some(path) => config::load_config(&path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        db: cli.db.clone(),
        tables: cli.tables.clone(),
        norm: cli.norm.clone(),
        width: cli.width,
        cell: cli.cell,
    };
    Settings::resolve(overrides, file)
}

fn log_sentinels(report: &Report) {
    for row in &report.rows {
        for r in &row.results {
            match r.result {
                DistanceResult::LengthMismatch => tracing::warn!(
                    "{}: '{}' and '{}' disagree on the reference-id range",
                    row.app,
                    r.table,
                    report.norm
                ),
                DistanceResult::NoData => {
                    tracing::debug!("{}: no range defined, nothing to compare", row.app)
                }
                DistanceResult::Distance(d) => tracing::debug!("{}: {} = {d}", row.app, r.table),
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(&cli)?;
    tracing::debug!(
        "measuring {:?} against '{}' in {}",
        settings.tables,
        settings.norm,
        settings.db.display()
    );

    let store = Store::open(&settings.db)
        .with_context(|| format!("failed to open database {}", settings.db.display()))?;
    let report = evaluate(&store, &cli.apps, &settings.tables, &settings.norm)
        .context("failed to compute accuracy")?;
    log_sentinels(&report);

    let output = match cli.format {
        Format::Table => render::table(&report, settings.width, settings.cell),
        Format::Json => render::json(&report).context("failed to serialize report")?,
    };
    print!("{output}");
    Ok(())
}
