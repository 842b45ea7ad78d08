//! CSV table storage primitives for the agenda file.
//!
//! # Responsibility
//! - Create the backing file with its header when absent.
//! - Read and rewrite the whole table in one call.
//!
//! # Invariants
//! - Column order is `Evento`, `Fecha`, `Hora` and is checked on every read.
//! - Rewrites land through a temporary sibling file and a rename, so the
//!   backing file is always a complete table.
//! - No locking: concurrent writers race and the last rename wins.

use crate::model::event::Event;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::Path;

mod open;
pub mod schema;

pub use open::ensure_table;
pub use schema::{COLUMNS, COLUMN_DATE, COLUMN_NAME, COLUMN_TIME};

pub type TableResult<T> = Result<T, TableError>;

#[derive(Debug)]
pub enum TableError {
    Io(std::io::Error),
    Csv(csv::Error),
    SchemaMismatch { found: Vec<String> },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::SchemaMismatch { found } => write!(
                f,
                "unexpected agenda columns [{}], expected [{}]",
                found.join(", "),
                COLUMNS.join(", ")
            ),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for TableError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<tempfile::PersistError> for TableError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Raw table contents for read-only preview panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePreview {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads every row of the agenda table in file order.
///
/// A zero-byte file reads as an empty table.
///
/// # Errors
/// - Returns `SchemaMismatch` when the header is not the agenda header.
/// - Returns I/O or CSV errors when the file cannot be read or a row has the
///   wrong number of cells.
pub fn read_events(path: &Path) -> TableResult<Vec<Event>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(File::open(path)?);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Ok(Vec::new());
    }
    schema::check_header(&header)?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        events.push(Event::new(
            record.get(0).unwrap_or_default(),
            record.get(1).unwrap_or_default(),
            record.get(2).unwrap_or_default(),
        ));
    }
    Ok(events)
}

/// Rewrites the whole agenda table with `events`.
///
/// # Side effects
/// - Creates a temporary file next to the resolved target and renames it over
///   the target. Symlinks are followed, so the link itself is kept.
/// - An existing file keeps its permissions.
pub fn write_events(path: &Path, events: &[Event]) -> TableResult<()> {
    let (target, permissions) = if path.exists() {
        (
            std::fs::canonicalize(path)?,
            Some(std::fs::metadata(path)?.permissions()),
        )
    } else {
        (path.to_path_buf(), None)
    };
    let parent = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    if let Some(permissions) = permissions {
        staged.as_file().set_permissions(permissions)?;
    }

    {
        let mut writer = csv::Writer::from_writer(staged.as_file_mut());
        writer.write_record(COLUMNS)?;
        for event in events {
            writer.write_record([
                event.name.as_str(),
                event.date.as_str(),
                event.time.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    staged.as_file().sync_all()?;
    staged.persist(&target)?;
    Ok(())
}

/// Reads the table as raw strings without schema checks.
///
/// Used by preview panes that display the file as-is.
pub fn read_table_rows(path: &Path) -> TableResult<TablePreview> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(File::open(path)?);

    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|cell| schema::strip_bom(cell).to_string())
        .collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(TablePreview { header, rows })
}
