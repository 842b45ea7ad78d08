//! Agenda table header definition.
//!
//! # Invariants
//! - The header is order-significant. There is no version marker, so column
//!   changes require editing the file out of band.

use super::{TableError, TableResult};
use csv::StringRecord;

pub const COLUMN_NAME: &str = "Evento";
pub const COLUMN_DATE: &str = "Fecha";
pub const COLUMN_TIME: &str = "Hora";

/// Agenda columns in on-disk order.
pub const COLUMNS: [&str; 3] = [COLUMN_NAME, COLUMN_DATE, COLUMN_TIME];

/// Verifies that `header` is exactly the agenda header.
pub fn check_header(header: &StringRecord) -> TableResult<()> {
    let found = header
        .iter()
        .map(|cell| strip_bom(cell).trim().to_string())
        .collect::<Vec<_>>();

    if found.iter().map(String::as_str).eq(COLUMNS) {
        return Ok(());
    }
    Err(TableError::SchemaMismatch { found })
}

pub(crate) fn strip_bom(cell: &str) -> &str {
    cell.strip_prefix('\u{feff}').unwrap_or(cell)
}
