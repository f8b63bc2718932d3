//! Harvest pipeline
//!
//! This module contains the fetch-and-merge logic:
//! - A bounded worker pool for detail requests
//! - The page-by-page coordinator with pacing
//! - Full fetch, full update and top-N refresh modes
//! - Run reports

mod coordinator;
mod pool;
mod report;

pub use coordinator::Harvester;
pub use pool::{DetailBatch, DetailOutcome, DetailPool};
pub use report::{format_report, print_report, HarvestMode, HarvestReport, PaginationStop};

use crate::config::Config;
use crate::CatalogError;
use std::sync::Arc;

/// Runs one harvest mode against the configured API and snapshot
///
/// # Example
///
/// ```no_run
/// use plugin_catalog::config::load_config;
/// use plugin_catalog::harvest::{harvest, HarvestMode};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config/config.json"))?;
/// let report = harvest(Arc::new(config), HarvestMode::TopRefresh).await?;
/// println!("{} records written", report.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Arc<Config>, mode: HarvestMode) -> Result<HarvestReport, CatalogError> {
    Harvester::new(config)?.run(mode).await
}
