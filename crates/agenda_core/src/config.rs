//! Agenda runtime configuration.
//!
//! # Responsibility
//! - Resolve the backing file location and logging options for hosts.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - The core never reads configuration implicitly except through
//!   `default_agenda_path` and `AgendaConfig::from_env`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default backing file name, resolved against the working directory.
pub const AGENDA_FILE_NAME: &str = "agenda.csv";
/// Overrides the backing file path.
pub const ENV_FILE_PATH: &str = "AGENDA_FILE_PATH";
/// Overrides the log level.
pub const ENV_LOG_LEVEL: &str = "AGENDA_LOG_LEVEL";
/// Enables file logging into the given absolute directory.
pub const ENV_LOG_DIR: &str = "AGENDA_LOG_DIR";

/// Host-facing configuration for opening the agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Backing CSV file.
    pub file_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Log directory; `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from(AGENDA_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AgendaConfig {
    /// Builds configuration from `AGENDA_*` environment variables, falling
    /// back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            file_path: read(ENV_FILE_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

/// Path used by repositories opened without an explicit location.
pub fn default_agenda_path() -> PathBuf {
    AgendaConfig::from_env().file_path
}

#[cfg(test)]
mod tests {
    use super::{AgendaConfig, AGENDA_FILE_NAME, ENV_FILE_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults() {
        let vars = HashMap::from([
            (ENV_FILE_PATH, "/data/agenda_equipo.csv"),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_LOG_DIR, "/var/log/agenda"),
        ]);
        let config = AgendaConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.file_path, PathBuf::from("/data/agenda_equipo.csv"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/agenda")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AgendaConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.file_path, PathBuf::from(AGENDA_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert_eq!(config, AgendaConfig::default());
    }
}
