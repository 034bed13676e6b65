//! CardLab CLI — build price tables and query daily snapshot data.
//!
//! Commands:
//! - `build` — run a TOML config: load, assemble, render, save
//! - `series` — print one rank or card series as `date,value` lines
//! - `lookup` — list catalog ids for a card name
//! - `inspect` — per-day retained counts and the dataset fingerprint

use anyhow::{bail, Context, Result};
use cardlab_core::data::{
    Calendar, Dataset, ItemCatalog, LoadProgress, SourceIndex, StdoutProgress,
};
use cardlab_runner::{run, RunConfig, RunSummary};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cardlab",
    about = "CardLab CLI — daily card price histories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dataset, assemble the configured table and render it.
    Build {
        /// Path to a TOML run config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suppress per-file progress output.
        #[arg(long, default_value_t = false)]
        quiet: bool,

        /// Print the run summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a single series as `date,value` lines.
    #[command(group(ArgGroup::new("select").required(true).args(["rank", "card", "id"])))]
    Series {
        /// Directory of daily snapshot files.
        #[arg(long, default_value = "data")]
        source_dir: PathBuf,

        /// Item catalog file (needed with --card).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Entries at or below this price are dropped.
        #[arg(long, default_value_t = 10.0)]
        threshold: f64,

        /// Value at this rank on every day (0 = most expensive).
        #[arg(long)]
        rank: Option<usize>,

        /// Card name, resolved to its last catalog id.
        #[arg(long, requires = "catalog")]
        card: Option<String>,

        /// Item id.
        #[arg(long)]
        id: Option<String>,

        /// Index files by the date in their name instead of using --start/--end.
        #[arg(long)]
        date_format: Option<String>,

        /// First calendar date (YYYY-MM-DD).
        #[arg(long, default_value = "2022-01-01")]
        start: String,

        /// Last calendar date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-12-31")]
        end: String,
    },
    /// List every catalog id whose name matches, ignoring case.
    Lookup {
        /// Item catalog file.
        #[arg(long, default_value = "card-definitions.txt")]
        catalog: PathBuf,

        /// Card name.
        name: String,
    },
    /// Report retained counts per day, the sparsest day and the fingerprint.
    Inspect {
        /// Directory of daily snapshot files.
        #[arg(long, default_value = "data")]
        source_dir: PathBuf,

        /// Entries at or below this price are dropped.
        #[arg(long, default_value_t = 10.0)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, quiet, json } => run_build(config, quiet, json),
        Commands::Series {
            source_dir,
            catalog,
            threshold,
            rank,
            card,
            id,
            date_format,
            start,
            end,
        } => run_series(SeriesArgs {
            source_dir,
            catalog,
            threshold,
            rank,
            card,
            id,
            date_format,
            start,
            end,
        }),
        Commands::Lookup { catalog, name } => run_lookup(&catalog, &name),
        Commands::Inspect {
            source_dir,
            threshold,
        } => run_inspect(&source_dir, threshold),
    }
}

fn run_build(config_path: Option<PathBuf>, quiet: bool, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => RunConfig::from_file(&path)?,
        None => RunConfig::default(),
    };
    tracing::debug!(source_dir = %config.data.source_dir.display(), "starting build");

    let progress = StdoutProgress;
    let progress_ref: Option<&dyn LoadProgress> = if quiet { None } else { Some(&progress) };

    let summary = run(&config, progress_ref)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

struct SeriesArgs {
    source_dir: PathBuf,
    catalog: Option<PathBuf>,
    threshold: f64,
    rank: Option<usize>,
    card: Option<String>,
    id: Option<String>,
    date_format: Option<String>,
    start: String,
    end: String,
}

fn run_series(args: SeriesArgs) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => ItemCatalog::load(path)?,
        None => ItemCatalog::default(),
    };
    let catalog = Arc::new(catalog);

    let (dataset, calendar) = match &args.date_format {
        Some(format) => {
            let index = SourceIndex::from_dir(&args.source_dir, format)?;
            let dataset = Dataset::build_indexed(&index, args.threshold, catalog, None)?;
            (dataset, index.dates())
        }
        None => {
            let start = parse_date(&args.start)?;
            let end = parse_date(&args.end)?;
            let dataset = Dataset::build(&args.source_dir, args.threshold, catalog, None)?;
            (dataset, Calendar::daily(start, end))
        }
    };

    let series = if let Some(n) = args.rank {
        dataset.rank_series(n, &calendar)?
    } else if let Some(name) = &args.card {
        let Some(id) = dataset.catalog().last_id_for_name(name) else {
            bail!("no catalog entry named '{name}'");
        };
        dataset.identifier_series(id, &calendar)?
    } else if let Some(id) = &args.id {
        dataset.identifier_series(id, &calendar)?
    } else {
        bail!("one of --rank, --card or --id is required");
    };

    println!("date,{}", series.label);
    for (date, value) in &series.points {
        println!("{date},{value}");
    }
    Ok(())
}

fn run_lookup(catalog_path: &Path, name: &str) -> Result<()> {
    let catalog = ItemCatalog::load(catalog_path)?;
    let ids = catalog.ids_for_name(name);
    if ids.is_empty() {
        println!("No cards named '{name}' in {}", catalog_path.display());
        return Ok(());
    }
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn run_inspect(source_dir: &Path, threshold: f64) -> Result<()> {
    let dataset = Dataset::build(source_dir, threshold, Arc::new(ItemCatalog::default()), None)
        .with_context(|| format!("failed to build dataset from {}", source_dir.display()))?;

    println!("Source:    {}", source_dir.display());
    println!("Days:      {}", dataset.len());
    println!("Threshold: {}", dataset.threshold());
    println!("Hash:      {}", dataset.fingerprint()?);
    println!();
    println!("{:<6} {:>10} {:>12}", "Day", "Retained", "Top");
    println!("{}", "-".repeat(30));
    for (day, snap) in dataset.snapshots().iter().enumerate() {
        let top = snap
            .record(0)
            .map(|r| format!("{:.2}", r.value()))
            .unwrap_or_else(|| "-".into());
        println!("{:<6} {:>10} {:>12}", day, snap.len(), top);
    }
    println!();
    println!(
        "Sparsest day retains {} entries (highest safe rank: {})",
        dataset.min_len(),
        dataset
            .min_len()
            .checked_sub(1)
            .map_or_else(|| "none".to_string(), |r| r.to_string())
    );
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}'"))
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== CardLab Build ===");
    println!("Days:          {}", summary.days);
    println!("Threshold:     {}", summary.threshold);
    println!("Min retained:  {}", summary.min_retained);
    println!("Dataset hash:  {}", summary.dataset_hash);
    println!("Columns:       {}", summary.columns.join(", "));
    println!("Table:         {}", summary.table_path.display());
    if let Some(path) = &summary.matrix_path {
        println!("Matrix:        {}", path.display());
    }
    for card in &summary.skipped_cards {
        println!("WARNING: no catalog entry for '{card}', column skipped");
    }
    println!();
}
