//! Backing file bootstrap.
//!
//! # Invariants
//! - An existing file is never opened for writing here.
//! - A missing file is created with the header row only.

use super::{write_events, TableResult};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Creates the agenda file with an empty table when it does not exist.
///
/// Returns `true` when the file was created by this call.
///
/// # Side effects
/// - Creates missing parent directories.
/// - Emits `table_init` logging events with duration and status.
pub fn ensure_table(path: &Path) -> TableResult<bool> {
    if path.exists() {
        return Ok(false);
    }

    let started_at = Instant::now();
    info!(
        "event=table_init module=table status=start path={}",
        path.display()
    );

    match create_empty_table(path) {
        Ok(()) => {
            info!(
                "event=table_init module=table status=ok path={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            );
            Ok(true)
        }
        Err(err) => {
            error!(
                "event=table_init module=table status=error path={} duration_ms={} error_code=table_create_failed error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn create_empty_table(path: &Path) -> TableResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    write_events(path, &[])
}
