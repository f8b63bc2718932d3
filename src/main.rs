//! Plugin-Catalog main entry point
//!
//! This is the command-line interface for the plugin-directory harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use plugin_catalog::api::DETAIL_FIELDS;
use plugin_catalog::config::{load_config_with_hash, Config};
use plugin_catalog::export::{export_slugs, TOP_EXPORT_LIMIT};
use plugin_catalog::harvest::{harvest, print_report, HarvestMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Plugin-Catalog: harvest plugin metadata from a plugin-directory API
///
/// Pages through the "popular" catalog listing, fetches a detail record for
/// every plugin and stores the result as a JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "plugin-catalog")]
#[command(version)]
#[command(about = "Harvest plugin metadata into a JSON snapshot", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "CONFIG", default_value = "config/config.json")]
    config: PathBuf,

    /// Snapshot file to read and write (overrides `snapshot_path`)
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be requested without fetching
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every configured page and overwrite the snapshot (default)
    Fetch,

    /// Re-fetch every configured page and rewrite the snapshot
    Update,

    /// Refresh the first page and merge it over the head of the snapshot
    UpdateTop,

    /// Write the snapshot's slugs to a text file, one per line
    Export {
        /// Text file to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Only export the first 100 records
        #[arg(long)]
        top: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }

    let command = cli.command.unwrap_or(Command::Fetch);

    if cli.dry_run {
        print_dry_run(&config, &command);
        return Ok(());
    }

    let mode = match command {
        Command::Fetch => HarvestMode::FullFetch,
        Command::Update => HarvestMode::FullUpdate,
        Command::UpdateTop => HarvestMode::TopRefresh,
        Command::Export { output, top } => {
            let limit = top.then_some(TOP_EXPORT_LIMIT);
            export_slugs(&config.snapshot_path, &output, limit).with_context(|| {
                format!(
                    "failed to export slugs from {}",
                    config.snapshot_path.display()
                )
            })?;
            return Ok(());
        }
    };

    tracing::info!("Starting {}", mode);
    let report = harvest(Arc::new(config), mode)
        .await
        .with_context(|| format!("{} failed", mode))?;

    if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("plugin_catalog=info,warn"),
            1 => EnvFilter::new("plugin_catalog=debug,info"),
            2 => EnvFilter::new("plugin_catalog=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration and planned requests
fn print_dry_run(config: &Config, command: &Command) {
    println!("=== Plugin-Catalog Dry Run ===\n");

    println!("API:");
    println!("  Endpoint: {}", config.api_url);
    println!("  Page size: {}", config.request_limit);
    println!("  Total pages: {}", config.total_pages);
    println!("  Request timeout: {}s", config.request_timeout_secs);

    println!("\nHarvest:");
    println!("  Detail concurrency: {}", config.detail_concurrency);
    println!("  Page delay: {}ms", config.page_delay_ms);
    println!("  Snapshot: {}", config.snapshot_path.display());

    let fields: Vec<String> = DETAIL_FIELDS
        .iter()
        .map(|(field, enabled)| format!("{}={}", field, enabled))
        .collect();
    println!("  Detail fields: {}", fields.join(", "));

    println!();
    match command {
        Command::Fetch | Command::Update => println!(
            "✓ Would request up to {} listing pages of {} plugins",
            config.total_pages, config.request_limit
        ),
        Command::UpdateTop => println!(
            "✓ Would refresh the top {} plugins of {}",
            config.request_limit,
            config.snapshot_path.display()
        ),
        Command::Export { output, top } => println!(
            "✓ Would export {} slugs to {}",
            if *top { "the top 100" } else { "all" },
            output.display()
        ),
    }
}
