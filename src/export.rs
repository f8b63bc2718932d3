//! Flat slug export
//!
//! Projects the `slug` field out of a snapshot into a newline-delimited text
//! file for tools that only need identifiers.

use crate::snapshot::{record_slug, SnapshotStore};
use crate::CatalogError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Number of records the `--top` export keeps
pub const TOP_EXPORT_LIMIT: usize = 100;

/// Writes one slug per line from the snapshot at `snapshot_path`
///
/// # Arguments
///
/// * `snapshot_path` - Snapshot file to read
/// * `output_path` - Text file to create or overwrite
/// * `limit` - Only consider the first `limit` records, if set
///
/// # Returns
///
/// The number of slugs written. Records without a non-blank string `slug` are skipped,
/// so with a limit the count can be lower than the limit.
pub fn export_slugs(
    snapshot_path: &Path,
    output_path: &Path,
    limit: Option<usize>,
) -> Result<usize, CatalogError> {
    let snapshot = SnapshotStore::new(snapshot_path).load()?;
    let considered = limit.unwrap_or(snapshot.len()).min(snapshot.len());

    let slugs: Vec<&str> = snapshot[..considered]
        .iter()
        .filter_map(record_slug)
        .collect();

    let mut writer = BufWriter::new(fs::File::create(output_path)?);
    for slug in &slugs {
        writeln!(writer, "{}", slug)?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote {} plugin slugs to {}",
        slugs.len(),
        output_path.display()
    );

    Ok(slugs.len())
}

/// Reads slugs back from a newline-delimited file, skipping blank lines
pub fn read_slugs(path: &Path) -> Result<Vec<String>, CatalogError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
