//! Top-N refresh merge
//!
//! Replaces the leading slice of an existing snapshot with freshly fetched
//! records while keeping the tail untouched and in order.

use crate::api::DetailRecord;
use crate::snapshot::{record_slug, Snapshot};

/// Result of merging a fresh leading slice into an existing snapshot
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The merged snapshot, ready to be saved
    pub merged: Snapshot,

    /// Slugs of the existing records that were replaced
    pub previous_top: Vec<Option<String>>,

    /// Slugs of the fresh records now leading the snapshot
    pub new_top: Vec<Option<String>>,

    /// Length of the existing snapshot
    pub before_len: usize,

    /// Length of the merged snapshot
    pub after_len: usize,
}

impl MergeOutcome {
    /// Whether the merge preserved the snapshot length
    pub fn is_consistent(&self) -> bool {
        self.before_len == self.after_len
    }
}

/// Merges `fresh` over the first `fresh.len()` records of `existing`
///
/// The merged snapshot is `fresh` followed by `existing[fresh.len()..]`. When
/// `fresh` is longer than `existing`, nothing of `existing` survives and the
/// lengths differ, which `MergeOutcome::is_consistent` reports.
pub fn merge_top(existing: Snapshot, fresh: Snapshot) -> MergeOutcome {
    let before_len = existing.len();
    let prefix_len = fresh.len().min(before_len);

    let previous_top = top_slugs(&existing[..prefix_len]);
    let new_top = top_slugs(&fresh);

    let mut merged = fresh;
    merged.extend(existing.into_iter().skip(prefix_len));

    MergeOutcome {
        after_len: merged.len(),
        merged,
        previous_top,
        new_top,
        before_len,
    }
}

fn top_slugs(records: &[DetailRecord]) -> Vec<Option<String>> {
    records
        .iter()
        .map(|record| record_slug(record).map(str::to_string))
        .collect()
}
