//! Run reports
//!
//! Every harvest mode returns a `HarvestReport` describing what was
//! requested, what was dropped and why pagination stopped.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// Which of the three harvest modes produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestMode {
    /// Walk every configured page and overwrite the snapshot
    FullFetch,

    /// Same traversal as `FullFetch`, reported as an update
    FullUpdate,

    /// Refresh only the first page and merge it over the snapshot's head
    TopRefresh,
}

impl fmt::Display for HarvestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HarvestMode::FullFetch => "full fetch",
            HarvestMode::FullUpdate => "full update",
            HarvestMode::TopRefresh => "top refresh",
        };
        f.write_str(name)
    }
}

/// Why the page loop ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaginationStop {
    /// Every requested page was processed
    #[default]
    Completed,

    /// The listing for `page` came back with no entries
    EmptyPage { page: u32 },

    /// The listing request for `page` failed
    ListingFailed { page: u32, error: String },
}

impl fmt::Display for PaginationStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationStop::Completed => write!(f, "all requested pages processed"),
            PaginationStop::EmptyPage { page } => write!(f, "page {} was empty", page),
            PaginationStop::ListingFailed { page, error } => {
                write!(f, "listing page {} failed: {}", page, error)
            }
        }
    }
}

/// Summary of a single harvest run
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub mode: HarvestMode,
    pub snapshot_path: PathBuf,

    // Listing
    pub listing_requests: u32,
    pub pages_listed: u32,
    pub entries_listed: usize,
    pub entries_skipped: usize,
    pub stop: PaginationStop,

    // Details
    pub details_requested: usize,
    pub details_failed: usize,
    pub details_empty: usize,
    pub records_fetched: usize,

    // Snapshot
    pub previous_len: Option<usize>,
    pub records_written: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl HarvestReport {
    pub fn new(mode: HarvestMode, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            snapshot_path: snapshot_path.into(),
            listing_requests: 0,
            pages_listed: 0,
            entries_listed: 0,
            entries_skipped: 0,
            stop: PaginationStop::default(),
            details_requested: 0,
            details_failed: 0,
            details_empty: 0,
            records_fetched: 0,
            previous_len: None,
            records_written: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Whether any request failed during the run
    pub fn had_failures(&self) -> bool {
        self.details_failed > 0 || matches!(self.stop, PaginationStop::ListingFailed { .. })
    }
}

/// Formats a report for the terminal
pub fn format_report(report: &HarvestReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Plugin-Catalog {} ===\n", report.mode));
    out.push_str(&format!("Snapshot: {}\n", report.snapshot_path.display()));
    if let Some(duration) = report.duration() {
        out.push_str(&format!(
            "Duration: {:.2}s\n",
            duration.num_milliseconds() as f64 / 1000.0
        ));
    }

    out.push_str("\nListing:\n");
    out.push_str(&format!("  Requests: {}\n", report.listing_requests));
    out.push_str(&format!("  Pages with entries: {}\n", report.pages_listed));
    out.push_str(&format!("  Entries listed: {}\n", report.entries_listed));
    if report.entries_skipped > 0 {
        out.push_str(&format!(
            "  Entries without slug: {}\n",
            report.entries_skipped
        ));
    }
    out.push_str(&format!("  Stopped: {}\n", report.stop));

    out.push_str("\nDetails:\n");
    out.push_str(&format!("  Requested: {}\n", report.details_requested));
    out.push_str(&format!("  Recorded: {}\n", report.records_fetched));
    out.push_str(&format!("  Failed: {}\n", report.details_failed));
    out.push_str(&format!("  Empty: {}\n", report.details_empty));

    out.push_str("\nSnapshot:\n");
    if let Some(previous) = report.previous_len {
        out.push_str(&format!("  Previous length: {}\n", previous));
    }
    out.push_str(&format!("  Records written: {}\n", report.records_written));

    out
}

/// Prints a report to stdout
pub fn print_report(report: &HarvestReport) {
    print!("{}", format_report(report));
}
