//! Output artifact writing.

use std::path::{Path, PathBuf};

use skatequest_core::{ParkRecord, Result};

use crate::TRACING_TARGET_OUTPUT;

/// Writes all records to `path` as a pretty-printed JSON array.
///
/// Missing parent directories are created. The file is written in one go
/// and replaces any previous content. Returns the path written to.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub async fn write_records(path: &Path, records: &[ParkRecord]) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = serde_json::to_vec_pretty(records)?;
    tokio::fs::write(path, &contents).await?;

    tracing::info!(
        target: TRACING_TARGET_OUTPUT,
        path = %path.display(),
        records = records.len(),
        bytes = contents.len(),
        "Wrote records"
    );

    Ok(path.to_path_buf())
}
