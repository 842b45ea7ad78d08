//! Agenda repository contract and CSV file implementation.
//!
//! # Responsibility
//! - Define the persistence port used by the agenda service.
//! - Persist events in the backing CSV table with whole-file rewrites.
//! - Own the single routine that normalizes stored dates.
//!
//! # Invariants
//! - Port methods never return errors. Failures are logged and converted into
//!   a failed outcome (writes) or an empty result (reads).
//! - No cache: every call reads the table from disk.
//! - A delete that matches nothing never rewrites the file.

use crate::config::default_agenda_path;
use crate::model::event::{Event, DATE_FORMAT};
use crate::table::{ensure_table, read_events, write_events, TableError};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const STORED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
const STORED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for agenda table access.
#[derive(Debug)]
pub enum RepoError {
    Table(TableError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted agenda data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TableError> for RepoError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

/// Result of a save call. `Display` renders the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Event),
    Failed { error: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

impl Display for SaveOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved(event) => write!(
                f,
                "¡Listo! He agendado: '{}' para el {} a las {}.",
                event.name, event.date, event.time
            ),
            Self::Failed { error } => write!(f, "Error al guardar en la agenda: {error}"),
        }
    }
}

/// Result of a delete call. `Display` renders the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { name: String, count: usize },
    NotFound { name: String, date: Option<String> },
    EmptyAgenda,
    Failed { error: String },
}

impl DeleteOutcome {
    /// Number of rows removed by the call.
    pub fn removed_count(&self) -> usize {
        match self {
            Self::Removed { count, .. } => *count,
            _ => 0,
        }
    }
}

impl Display for DeleteOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Removed { name, count: 1 } => {
                write!(f, "Se eliminó 1 evento '{name}' con éxito.")
            }
            Self::Removed { name, count } => {
                write!(f, "Se eliminaron {count} eventos '{name}' con éxito.")
            }
            Self::NotFound { name, date: None } => {
                write!(f, "No se encontró el evento '{name}'.")
            }
            Self::NotFound {
                name,
                date: Some(date),
            } => write!(f, "No se encontró el evento '{name}' el {date}."),
            Self::EmptyAgenda => write!(f, "La agenda está vacía."),
            Self::Failed { error } => write!(f, "Error al eliminar en la agenda: {error}"),
        }
    }
}

/// Persistence port for agenda events.
pub trait AgendaRepository {
    /// Appends one event.
    fn save(&self, event: &Event) -> SaveOutcome;
    /// Returns every stored event in storage order, dates as stored.
    fn find_all(&self) -> Vec<Event>;
    /// Returns events whose normalized date equals `date`, dates canonical.
    fn find_by_date(&self, date: &str) -> Vec<Event>;
    /// Removes events named `name`, restricted to `date` when given.
    fn delete(&self, name: &str, date: Option<&str>) -> DeleteOutcome;
}

/// Normalizes a stored date cell to `YYYY-MM-DD`.
///
/// Accepts canonical dates, datetime cells written by spreadsheet tools and
/// day-first locale dates.
pub fn normalize_stored_date(value: &str) -> RepoResult<String> {
    let trimmed = value.trim();
    for format in STORED_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(DATE_FORMAT).to_string());
        }
    }
    for format in STORED_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date().format(DATE_FORMAT).to_string());
        }
    }
    Err(RepoError::InvalidData(format!(
        "unrecognized date `{trimmed}` in column Fecha"
    )))
}

/// Keeps events whose normalized date equals `date`, rewriting their dates to
/// canonical form. Fails when any stored date cannot be normalized.
pub(crate) fn filter_by_date(events: Vec<Event>, date: &str) -> RepoResult<Vec<Event>> {
    let wanted = requested_date(date);
    let mut matched = Vec::new();
    for mut event in events {
        let normalized = normalize_stored_date(&event.date)?;
        if normalized == wanted {
            event.date = normalized;
            matched.push(event);
        }
    }
    Ok(matched)
}

/// Removes matching events in place and returns how many were removed.
///
/// Rows whose date cannot be normalized never match a dated delete.
pub(crate) fn remove_matching(events: &mut Vec<Event>, name: &str, date: Option<&str>) -> usize {
    let name = name.trim();
    let wanted = date.map(requested_date);
    let initial_count = events.len();

    events.retain(|event| {
        if event.name.trim() != name {
            return true;
        }
        match wanted.as_deref() {
            None => false,
            Some(wanted) => normalize_stored_date(&event.date)
                .map(|stored| stored != wanted)
                .unwrap_or(true),
        }
    });

    initial_count - events.len()
}

fn requested_date(date: &str) -> String {
    normalize_stored_date(date).unwrap_or_else(|_| date.trim().to_string())
}

/// CSV-file-backed agenda repository.
#[derive(Debug, Clone)]
pub struct CsvAgendaRepository {
    path: PathBuf,
}

impl CsvAgendaRepository {
    /// Opens the repository at `path`, creating an empty table when absent.
    pub fn try_new(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let repo = Self { path: path.into() };
        repo.ensure_initialized()?;
        Ok(repo)
    }

    /// Opens the repository at the default agenda path.
    pub fn with_default_path() -> RepoResult<Self> {
        Self::try_new(default_agenda_path())
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with the empty schema if it is missing.
    ///
    /// Returns `true` when the file was created. Never touches an existing
    /// file.
    pub fn ensure_initialized(&self) -> RepoResult<bool> {
        Ok(ensure_table(&self.path)?)
    }

    fn try_save(&self, event: &Event) -> RepoResult<()> {
        let mut events = read_events(&self.path)?;
        events.push(event.clone());
        write_events(&self.path, &events)?;
        Ok(())
    }

    fn try_find_by_date(&self, date: &str) -> RepoResult<Vec<Event>> {
        let events = read_events(&self.path)?;
        if events.is_empty() {
            return Ok(events);
        }
        filter_by_date(events, date)
    }

    fn try_delete(&self, name: &str, date: Option<&str>) -> RepoResult<DeleteOutcome> {
        let mut events = read_events(&self.path)?;
        if events.is_empty() {
            return Ok(DeleteOutcome::EmptyAgenda);
        }

        let removed = remove_matching(&mut events, name, date);
        if removed == 0 {
            return Ok(DeleteOutcome::NotFound {
                name: name.trim().to_string(),
                date: date.map(|value| value.trim().to_string()),
            });
        }

        write_events(&self.path, &events)?;
        Ok(DeleteOutcome::Removed {
            name: name.trim().to_string(),
            count: removed,
        })
    }
}

impl AgendaRepository for CsvAgendaRepository {
    fn save(&self, event: &Event) -> SaveOutcome {
        match self.try_save(event) {
            Ok(()) => {
                debug!(
                    "event=agenda_save module=repo status=ok path={}",
                    self.path.display()
                );
                SaveOutcome::Saved(event.clone())
            }
            Err(err) => {
                error!(
                    "event=agenda_save module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                SaveOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    fn find_all(&self) -> Vec<Event> {
        match read_events(&self.path) {
            Ok(events) => events,
            Err(err) => {
                error!(
                    "event=agenda_find_all module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn find_by_date(&self, date: &str) -> Vec<Event> {
        match self.try_find_by_date(date) {
            Ok(events) => events,
            Err(err) => {
                error!(
                    "event=agenda_find_by_date module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn delete(&self, name: &str, date: Option<&str>) -> DeleteOutcome {
        match self.try_delete(name, date) {
            Ok(outcome) => {
                debug!(
                    "event=agenda_delete module=repo status=ok path={} removed={}",
                    self.path.display(),
                    outcome.removed_count()
                );
                outcome
            }
            Err(err) => {
                error!(
                    "event=agenda_delete module=repo status=error path={} error={}",
                    self.path.display(),
                    err
                );
                DeleteOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_by_date, normalize_stored_date, remove_matching, DeleteOutcome};
    use crate::model::event::Event;

    #[test]
    fn normalize_accepts_known_layouts() {
        for raw in [
            "2025-03-01",
            " 2025-03-01 ",
            "2025-03-01 00:00:00",
            "2025-03-01T00:00:00",
            "2025/03/01",
            "01/03/2025",
            "01-03-2025",
        ] {
            assert_eq!(normalize_stored_date(raw).unwrap(), "2025-03-01", "{raw}");
        }
    }

    #[test]
    fn normalize_rejects_unknown_layouts() {
        assert!(normalize_stored_date("marzo 1").is_err());
        assert!(normalize_stored_date("").is_err());
    }

    #[test]
    fn filter_by_date_fails_on_unparseable_row() {
        let events = vec![
            Event::new("A", "2025-03-01", "09:00"),
            Event::new("B", "pronto", "10:00"),
        ];
        assert!(filter_by_date(events, "2025-03-01").is_err());
    }

    #[test]
    fn remove_matching_keeps_rows_with_other_dates() {
        let mut events = vec![
            Event::new("Reunión", "2025-03-01", "09:00"),
            Event::new("Reunión", "02/03/2025", "09:00"),
            Event::new("Otro", "2025-03-01", "11:00"),
        ];

        let removed = remove_matching(&mut events, "Reunión", Some("2025-03-02"));
        assert_eq!(removed, 1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, "2025-03-01");
    }

    #[test]
    fn delete_messages_are_count_based() {
        let one = DeleteOutcome::Removed {
            name: "Cita".to_string(),
            count: 1,
        };
        let many = DeleteOutcome::Removed {
            name: "Cita".to_string(),
            count: 3,
        };
        assert_eq!(one.to_string(), "Se eliminó 1 evento 'Cita' con éxito.");
        assert_eq!(many.to_string(), "Se eliminaron 3 eventos 'Cita' con éxito.");
    }
}
