//! Harvest coordinator - page loop, pacing and snapshot modes
//!
//! This module drives the pipeline:
//! - Lists catalog pages in increasing order, stopping at the first empty
//!   or failed page
//! - Fans each page's slugs out to the detail pool
//! - Pauses between pages
//! - Saves the result, either wholesale or merged over the snapshot head
//!
//! Network failures never abort a run: they are logged, counted in the
//! report, and the run still reaches its save step.

use crate::api::{fetch_page, ApiClient, DetailRecord, ListingEntry};
use crate::config::Config;
use crate::harvest::pool::DetailPool;
use crate::harvest::report::{HarvestMode, HarvestReport, PaginationStop};
use crate::snapshot::{merge_top, Snapshot, SnapshotStore};
use crate::CatalogError;
use std::sync::Arc;

/// Runs harvests against one API endpoint and one snapshot file
pub struct Harvester {
    config: Arc<Config>,
    client: ApiClient,
    store: SnapshotStore,
}

impl Harvester {
    /// Creates a harvester from the run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run any mode
    /// * `Err(CatalogError)` - The endpoint or HTTP client could not be set up
    pub fn new(config: Arc<Config>) -> Result<Self, CatalogError> {
        let client = ApiClient::new(&config)?;
        let store = SnapshotStore::new(&config.snapshot_path);

        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Runs the given mode to completion
    pub async fn run(&self, mode: HarvestMode) -> Result<HarvestReport, CatalogError> {
        match mode {
            HarvestMode::FullFetch => self.fetch_all().await,
            HarvestMode::FullUpdate => self.update_all().await,
            HarvestMode::TopRefresh => self.update_top().await,
        }
    }

    /// Walks every configured page and overwrites the snapshot
    pub async fn fetch_all(&self) -> Result<HarvestReport, CatalogError> {
        let report = self.harvest_all(HarvestMode::FullFetch).await?;
        tracing::info!(
            "Saved {} plugins to {}",
            report.records_written,
            self.store.path().display()
        );
        Ok(report)
    }

    /// Same traversal as `fetch_all`; the snapshot is rebuilt, not diffed
    pub async fn update_all(&self) -> Result<HarvestReport, CatalogError> {
        let report = self.harvest_all(HarvestMode::FullUpdate).await?;
        tracing::info!(
            "Updated all plugins ({}) in {}",
            report.records_written,
            self.store.path().display()
        );
        Ok(report)
    }

    /// Refreshes the first catalog page and merges it over the snapshot head
    ///
    /// The leading `K` records of the stored snapshot are replaced by the `K`
    /// freshly fetched ones; the rest keeps its order. A length change is
    /// logged as a warning but does not prevent the write.
    pub async fn update_top(&self) -> Result<HarvestReport, CatalogError> {
        let mut report = HarvestReport::new(HarvestMode::TopRefresh, self.store.path());
        let mut fresh = Vec::new();

        {
            let pool = DetailPool::new(self.client.clone(), self.pool_size());
            if let Some(entries) = self.list_page(1, &mut report).await {
                self.fetch_details(&pool, &entries, &mut report, &mut fresh)
                    .await;
            }
        }

        let existing = self.store.load()?;
        let fresh_len = fresh.len();
        let outcome = merge_top(existing, fresh);

        tracing::info!("Existing top slugs:");
        for slug in &outcome.previous_top {
            tracing::info!(" - {}", slug.as_deref().unwrap_or("<no slug>"));
        }
        tracing::info!("New top slugs:");
        for slug in &outcome.new_top {
            tracing::info!(" - {}", slug.as_deref().unwrap_or("<no slug>"));
        }

        if outcome.is_consistent() {
            tracing::info!("Plugin count consistent ({} plugins)", outcome.after_len);
        } else {
            tracing::warn!(
                "Plugin count changed! Before: {}, After: {}",
                outcome.before_len,
                outcome.after_len
            );
        }

        report.previous_len = Some(outcome.before_len);
        self.save_snapshot(&outcome.merged, &mut report)?;

        tracing::info!(
            "Updated top {} plugins in {}",
            fresh_len,
            self.store.path().display()
        );

        Ok(report)
    }

    async fn harvest_all(&self, mode: HarvestMode) -> Result<HarvestReport, CatalogError> {
        let mut report = HarvestReport::new(mode, self.store.path());

        // One pool for the whole run
        let pool = DetailPool::new(self.client.clone(), self.pool_size());
        let records = self.collect_pages(&pool, &mut report).await;

        self.save_snapshot(&records, &mut report)?;
        Ok(report)
    }

    /// Processes pages `1..=total_pages`, stopping early on an empty or
    /// failed listing
    async fn collect_pages(&self, pool: &DetailPool, report: &mut HarvestReport) -> Snapshot {
        let mut records = Vec::new();

        for page in 1..=self.config.total_pages {
            let entries = match self.list_page(page, report).await {
                Some(entries) => entries,
                None => break,
            };

            self.fetch_details(pool, &entries, report, &mut records)
                .await;

            // Unconditional, including after the last page
            tokio::time::sleep(self.config.page_delay()).await;
        }

        records
    }

    /// Lists one page, recording why pagination must stop if it yields nothing
    async fn list_page(&self, page: u32, report: &mut HarvestReport) -> Option<Vec<ListingEntry>> {
        report.listing_requests += 1;

        match fetch_page(&self.client, page).await {
            Ok(entries) if entries.is_empty() => {
                tracing::info!("No more plugins found on page {}, stopping", page);
                report.stop = PaginationStop::EmptyPage { page };
                None
            }
            Ok(entries) => {
                report.pages_listed += 1;
                report.entries_listed += entries.len();
                Some(entries)
            }
            Err(e) => {
                tracing::error!("Error fetching page {}: {}", page, e);
                report.stop = PaginationStop::ListingFailed {
                    page,
                    error: e.to_string(),
                };
                None
            }
        }
    }

    /// Fetches details for one page's entries and appends the usable ones
    async fn fetch_details(
        &self,
        pool: &DetailPool,
        entries: &[ListingEntry],
        report: &mut HarvestReport,
        records: &mut Snapshot,
    ) {
        let mut slugs = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.slug() {
                Some(slug) => slugs.push(slug.to_string()),
                None => {
                    tracing::debug!(
                        "Skipping listing entry without slug: {}",
                        entry.name.as_deref().unwrap_or("<unnamed>")
                    );
                    report.entries_skipped += 1;
                }
            }
        }

        report.details_requested += slugs.len();
        let batch = pool.fetch_batch(slugs).await;
        report.details_failed += batch.lost_workers;

        for outcome in batch.outcomes {
            match outcome.result {
                Ok(record) if record.is_empty() => {
                    tracing::debug!("Plugin '{}' returned no data", outcome.slug);
                    report.details_empty += 1;
                }
                Ok(record) => {
                    report.records_fetched += 1;
                    records.push(record);
                }
                Err(e) => {
                    tracing::error!(
                        "Error fetching details for plugin '{}': {}",
                        outcome.slug,
                        e
                    );
                    report.details_failed += 1;
                }
            }
        }
    }

    /// Shared save routine for every mode
    fn save_snapshot(
        &self,
        records: &[DetailRecord],
        report: &mut HarvestReport,
    ) -> Result<(), CatalogError> {
        self.store.save(records)?;
        report.records_written = records.len();
        report.finish();
        Ok(())
    }

    fn pool_size(&self) -> usize {
        self.config.detail_concurrency as usize
    }
}
