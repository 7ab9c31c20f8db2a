mod logging;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use biomap_batch::{BatchApplier, LogProgress, Series};
use biomap_config::{FailureMode, RunDef};
use biomap_occurrence::{
  DEFAULT_BASE_URL, HttpOccurrenceSource, InMemorySource, OccurrenceSource, species_query,
};

use crate::logging::{LogConfig, LogFormat};
use crate::report::RunReport;

/// biomap - batch occurrence queries with per-species failure handling
#[derive(Parser)]
#[command(name = "biomap")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log format: text or json
  #[arg(long, global = true, env = "BIOMAP_LOG_FORMAT", default_value = "text")]
  log_format: LogFormat,

  /// Log filter directive (e.g. "info" or "biomap_batch=debug")
  #[arg(long, global = true, env = "BIOMAP_LOG", default_value = "info")]
  log_level: String,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Query occurrence records for every species in a run definition
  Fetch {
    /// Path to the run definition (JSON)
    run_file: PathBuf,

    /// Override the run's failure mode: stop_and_fail, continue or substitute
    #[arg(long)]
    mode: Option<FailureMode>,

    /// Answer queries from a fixture file instead of the occurrence service
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Base URL of the occurrence service
    #[arg(long, env = "BIOMAP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  logging::init(&LogConfig::new(cli.log_format, &cli.log_level))
    .context("failed to set up logging")?;

  match cli.command {
    Some(Commands::Fetch {
      run_file,
      mode,
      fixture,
      base_url,
    }) => {
      fetch(run_file, mode, fixture, base_url)?;
    }
    None => {
      println!("biomap - use --help to see available commands");
    }
  }

  Ok(())
}

fn fetch(
  run_file: PathBuf,
  mode: Option<FailureMode>,
  fixture: Option<PathBuf>,
  base_url: String,
) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { fetch_async(run_file, mode, fixture, base_url).await })
}

async fn fetch_async(
  run_file: PathBuf,
  mode: Option<FailureMode>,
  fixture: Option<PathBuf>,
  base_url: String,
) -> Result<()> {
  let run_content = tokio::fs::read_to_string(&run_file)
    .await
    .with_context(|| format!("failed to read run file: {}", run_file.display()))?;

  let run: RunDef = serde_json::from_str(&run_content)
    .with_context(|| format!("failed to parse run file: {}", run_file.display()))?;

  run
    .validate()
    .with_context(|| format!("invalid run file: {}", run_file.display()))?;

  let mode = mode.unwrap_or(run.failure_mode);
  info!(run = %run.name, species = run.species.len(), %mode, "run_loaded");

  let source: Box<dyn OccurrenceSource> = match &fixture {
    Some(path) => Box::new(load_fixture(path).await?),
    None => Box::new(HttpOccurrenceSource::new(&base_url).context("failed to create client")?),
  };

  let species = Series::with_labels(run.names(), run.labels())?;
  let mut query = species_query(source.as_ref(), run.filters.clone());
  let progress = LogProgress::named(&run.name);

  let report = match mode.policy() {
    Some(policy) => {
      let outcomes = BatchApplier::new(policy)
        .with_progress(progress)
        .apply_async(species, query)
        .await
        .with_context(|| format!("run '{}' aborted", run.name))?;

      RunReport::from_outcomes(&run.name, mode, &outcomes)
    }
    None => {
      let tables = BatchApplier::capturing()
        .with_progress(progress)
        .apply_default_async(
          species,
          |name| {
            let pending = query(name);
            async move { pending.await.map(|response| response.data) }
          },
          Vec::new(),
        )
        .await;

      RunReport::from_tables(&run.name, mode, &tables)
    }
  };

  info!(
    run = %run.name,
    succeeded = report.succeeded,
    failed = report.failed,
    records = report.records.len(),
    "run_completed"
  );

  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}

async fn load_fixture(path: &Path) -> Result<InMemorySource> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read fixture file: {}", path.display()))?;

  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse fixture file: {}", path.display()))
}
