//! Core domain and persistence logic for the agenda.
//! This crate is the single source of truth for agenda business rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod table;
pub mod tools;

pub use config::{default_agenda_path, AgendaConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::event::{Event, EventValidationError};
pub use repo::agenda_repo::{
    normalize_stored_date, AgendaRepository, CsvAgendaRepository, DeleteOutcome, RepoError,
    RepoResult, SaveOutcome,
};
pub use repo::memory_repo::InMemoryAgendaRepository;
pub use service::agenda_service::AgendaService;
pub use table::{read_table_rows, TableError, TablePreview};
pub use tools::{format_event_listing, tool_specs, AgendaTools, ToolCall, ToolError, ToolSpec};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
