//! Dataset loading for the server.
//!
//! The file is read once at startup and mounted into a read-only
//! [`Dashboard`]. Entries that fail to decode are logged and left out.

use std::path::Path;

use dashboard::{Dashboard, DatasetError, parse_records};
use tracing::{info, warn};

/// Read and mount the dataset at `path`.
///
/// # Errors
///
/// Returns a [`DatasetError`] when the file cannot be read or is not a JSON
/// array.
pub async fn load(path: &Path) -> Result<Dashboard, DatasetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DatasetError::Read(format!("{}: {e}", path.display())))?;
    let dashboard = mount(&text)?;
    info!(
        path = %path.display(),
        records = dashboard.records().len(),
        years = dashboard.aggregates().len(),
        "dataset loaded"
    );
    Ok(dashboard)
}

/// Parse dataset text and mount it, logging each skipped entry.
///
/// # Errors
///
/// Returns a [`DatasetError`] when the text is not a JSON array.
pub fn mount(text: &str) -> Result<Dashboard, DatasetError> {
    let parsed = parse_records(text)?;
    for skipped in &parsed.skipped {
        warn!(index = skipped.index, reason = %skipped.reason, "dataset: skipping record");
    }
    Ok(Dashboard::mount(parsed.records))
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
