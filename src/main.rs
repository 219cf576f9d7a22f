//! Result pager - Entry Point

use clap::Parser;
use rpager::backend::{DatasetBackend, SearchWorker};
use rpager::model::{FilterCriterion, PageNumber};
use rpager::state::{SearchCoordinator, SearchOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Result pager - page and facet-filter search results in the terminal
#[derive(Parser, Debug)]
#[command(name = "rpager")]
#[command(version)]
#[command(about = "TUI for paging and filtering search results over an entity catalog")]
pub struct Args {
    /// Path to JSON dataset (array of entities or {"entities": [...]})
    pub dataset: PathBuf,

    /// Free-text query (empty matches everything)
    #[arg(short, long, default_value_t)]
    pub query: String,

    /// Start at specific page number (must be positive)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Active filter as field=value (repeatable)
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<FilterCriterion>,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Start with the filter panel hidden
    #[arg(long)]
    pub no_filters: bool,

    /// Simulated backend latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        // 1. Load config file (or None if missing)
        let config_file = rpager::config::load_config_with_precedence(args.config.clone())?;

        // 2. Merge with defaults
        let merged = rpager::config::merge_config(config_file);

        // 3. Apply environment variable overrides
        let with_env = rpager::config::apply_env_overrides(merged)?;

        // 4. Apply CLI argument overrides (only flags the user set)
        let show_filters_override = if args.no_filters { Some(false) } else { None };
        let with_cli = rpager::config::apply_cli_overrides(
            with_env,
            args.page_size,
            show_filters_override,
            args.latency_ms,
        );

        rpager::config::validate(with_cli)?
    };

    // Held until exit so buffered log lines are flushed
    let _log_guard = rpager::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let backend =
        DatasetBackend::from_path(&args.dataset)?.with_facet_fields(config.facet_fields.clone());
    let worker = SearchWorker::spawn(backend, Duration::from_millis(config.latency_ms))?;

    let options = SearchOptions {
        query: args.query,
        page: PageNumber::new(args.page as usize)?,
        page_size: config.page_size,
        filters: args.filters.into(),
        show_filters: config.show_filters,
    };

    let mut coordinator = SearchCoordinator::new(worker, options);
    coordinator.start();

    rpager::view::run(coordinator)?;

    Ok(())
}
