//! Snapshot persistence and merging
//!
//! A snapshot is the ordered list of every detail record from the last run.
//! Order encodes popularity rank as delivered by the upstream listing, so it
//! is read, rebuilt and written back wholesale.

mod merge;
mod store;

pub use merge::{merge_top, MergeOutcome};
pub use store::SnapshotStore;

use crate::api::DetailRecord;

/// Ordered sequence of detail records
pub type Snapshot = Vec<DetailRecord>;

/// Returns the `slug` field of a record, if it carries a non-blank string one
pub fn record_slug(record: &DetailRecord) -> Option<&str> {
    record
        .get("slug")
        .and_then(|value| value.as_str())
        .filter(|slug| !slug.trim().is_empty())
}
