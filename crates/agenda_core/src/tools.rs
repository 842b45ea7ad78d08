//! Agent-facing agenda operations.
//!
//! # Responsibility
//! - Declare the fixed set of named operations an external agent may call.
//! - Render operation results as plain chat-ready text.
//!
//! # Invariants
//! - Operation names and parameter names are stable; agents register them.
//! - Operations never panic; business failures come back as text.
//! - Blank optional `date` arguments are treated as absent.

use crate::model::event::Event;
use crate::repo::agenda_repo::AgendaRepository;
use crate::service::agenda_service::AgendaService;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TOOL_ADD_EVENT: &str = "AddAgendaEvent";
pub const TOOL_LIST_EVENTS: &str = "ListAgendaEvents";
pub const TOOL_DELETE_EVENT: &str = "DeleteAgendaEvent";

pub const NO_EVENTS_MESSAGE: &str = "No hay eventos para mostrar.";
pub const LISTING_HEADER: &str = "Eventos encontrados:";

/// Parameter declaration for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Operation declaration handed to agent tool registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ToolParameter],
}

const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: TOOL_ADD_EVENT,
        description: "Agrega un nuevo evento a la agenda con nombre, fecha y hora. Para eventos recurrentes o series, llama a esta herramienta varias veces (una por cada fecha).",
        parameters: &[
            ToolParameter {
                name: "name",
                description: "Nombre o descripción del evento",
                required: true,
            },
            ToolParameter {
                name: "date",
                description: "Fecha en formato YYYY-MM-DD",
                required: true,
            },
            ToolParameter {
                name: "time",
                description: "Hora en formato HH:MM",
                required: true,
            },
        ],
    },
    ToolSpec {
        name: TOOL_LIST_EVENTS,
        description: "Consulta los eventos de la agenda. Puede filtrar por fecha.",
        parameters: &[ToolParameter {
            name: "date",
            description: "Fecha en formato YYYY-MM-DD para filtrar eventos",
            required: false,
        }],
    },
    ToolSpec {
        name: TOOL_DELETE_EVENT,
        description: "Elimina un evento de la agenda por su nombre y opcionalmente por fecha.",
        parameters: &[
            ToolParameter {
                name: "name",
                description: "Nombre del evento a eliminar",
                required: true,
            },
            ToolParameter {
                name: "date",
                description: "Fecha en formato YYYY-MM-DD para ser más específico",
                required: false,
            },
        ],
    },
];

/// Returns the declarations of every agenda operation.
pub fn tool_specs() -> &'static [ToolSpec] {
    TOOL_SPECS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddEventArgs {
    #[serde(alias = "event")]
    pub name: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListEventsArgs {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteEventArgs {
    #[serde(alias = "event")]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// One parsed operation invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    AddEvent(AddEventArgs),
    ListEvents(ListEventsArgs),
    DeleteEvent(DeleteEventArgs),
}

impl ToolCall {
    /// Parses an agent invocation from its tool name and JSON arguments.
    ///
    /// Empty argument text is read as `{}`.
    pub fn parse(tool_name: &str, arguments_json: &str) -> Result<Self, ToolError> {
        let arguments = if arguments_json.trim().is_empty() {
            "{}"
        } else {
            arguments_json
        };
        let invalid = |err: serde_json::Error| ToolError::InvalidArguments {
            tool: tool_name.to_string(),
            message: err.to_string(),
        };

        match tool_name.trim() {
            TOOL_ADD_EVENT => serde_json::from_str(arguments)
                .map(Self::AddEvent)
                .map_err(invalid),
            TOOL_LIST_EVENTS => serde_json::from_str(arguments)
                .map(Self::ListEvents)
                .map_err(invalid),
            TOOL_DELETE_EVENT => serde_json::from_str(arguments)
                .map(Self::DeleteEvent)
                .map_err(invalid),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    pub fn tool_name(&self) -> &'static str {
        match self {
            Self::AddEvent(_) => TOOL_ADD_EVENT,
            Self::ListEvents(_) => TOOL_LIST_EVENTS,
            Self::DeleteEvent(_) => TOOL_DELETE_EVENT,
        }
    }
}

/// Dispatch error for agent invocations that never reached the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    UnknownTool(String),
    InvalidArguments { tool: String, message: String },
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown agenda tool `{name}`"),
            Self::InvalidArguments { tool, message } => {
                write!(f, "invalid arguments for `{tool}`: {message}")
            }
        }
    }
}

impl Error for ToolError {}

/// Renders events as the listing returned by `ListAgendaEvents`.
pub fn format_event_listing(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_EVENTS_MESSAGE.to_string();
    }

    let mut listing = format!("{LISTING_HEADER}\n");
    for event in events {
        listing.push_str(&format!(
            "- {} el {} a las {}\n",
            event.name, event.date, event.time
        ));
    }
    listing
}

/// Agenda operations bound to one service instance.
pub struct AgendaTools<'svc, R: AgendaRepository> {
    service: &'svc AgendaService<R>,
}

impl<'svc, R: AgendaRepository> AgendaTools<'svc, R> {
    pub fn new(service: &'svc AgendaService<R>) -> Self {
        Self { service }
    }

    /// `AddAgendaEvent`: stores one event and returns the status message.
    pub fn add_agenda_event(&self, name: &str, date: &str, time: &str) -> String {
        self.service.add_new_event(name, date, time)
    }

    /// `ListAgendaEvents`: all events, or those on `date` when given.
    pub fn list_agenda_events(&self, date: Option<&str>) -> String {
        let events = match non_blank(date) {
            Some(date) => self.service.list_events_by_date(date),
            None => self.service.list_all_events(),
        };
        format_event_listing(&events)
    }

    /// `DeleteAgendaEvent`: removes events by name, optionally on one date.
    pub fn delete_agenda_event(&self, name: &str, date: Option<&str>) -> String {
        self.service.remove_event(name, non_blank(date))
    }

    /// Executes an already-parsed call.
    pub fn invoke(&self, call: &ToolCall) -> String {
        info!("event=tool_invoke module=tools tool={}", call.tool_name());
        match call {
            ToolCall::AddEvent(args) => self.add_agenda_event(&args.name, &args.date, &args.time),
            ToolCall::ListEvents(args) => self.list_agenda_events(args.date.as_deref()),
            ToolCall::DeleteEvent(args) => {
                self.delete_agenda_event(&args.name, args.date.as_deref())
            }
        }
    }

    /// Parses and executes an agent invocation.
    ///
    /// # Errors
    /// - Returns `ToolError` for unknown names or undecodable arguments.
    pub fn invoke_json(&self, tool_name: &str, arguments_json: &str) -> Result<String, ToolError> {
        match ToolCall::parse(tool_name, arguments_json) {
            Ok(call) => Ok(self.invoke(&call)),
            Err(err) => {
                warn!("event=tool_invoke module=tools status=error error={err}");
                Err(err)
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        format_event_listing, tool_specs, ToolCall, ToolError, NO_EVENTS_MESSAGE,
        TOOL_ADD_EVENT, TOOL_DELETE_EVENT, TOOL_LIST_EVENTS,
    };
    use crate::model::event::Event;

    #[test]
    fn listing_uses_one_line_per_event() {
        let listing = format_event_listing(&[
            Event::new("Revisión", "2025-03-01", "09:00"),
            Event::new("Comité", "2025-03-02", "15:30"),
        ]);
        let lines = listing.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "Eventos encontrados:",
                "- Revisión el 2025-03-01 a las 09:00",
                "- Comité el 2025-03-02 a las 15:30",
            ]
        );
    }

    #[test]
    fn empty_listing_uses_fixed_sentence() {
        assert_eq!(format_event_listing(&[]), NO_EVENTS_MESSAGE);
    }

    #[test]
    fn parse_accepts_event_alias_and_optional_date() {
        let call = ToolCall::parse(TOOL_DELETE_EVENT, r#"{"event":"Cita"}"#).unwrap();
        match call {
            ToolCall::DeleteEvent(args) => {
                assert_eq!(args.name, "Cita");
                assert_eq!(args.date, None);
            }
            other => panic!("unexpected call: {other:?}"),
        }

        let list = ToolCall::parse(TOOL_LIST_EVENTS, "").unwrap();
        assert_eq!(list.tool_name(), TOOL_LIST_EVENTS);
    }

    #[test]
    fn parse_reports_unknown_tool_and_missing_fields() {
        let unknown = ToolCall::parse("UpdateAgendaEvent", "{}").unwrap_err();
        assert_eq!(unknown, ToolError::UnknownTool("UpdateAgendaEvent".to_string()));

        let missing = ToolCall::parse(TOOL_ADD_EVENT, r#"{"name":"Cita"}"#).unwrap_err();
        assert!(matches!(missing, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn specs_cover_every_operation() {
        let names = tool_specs().iter().map(|spec| spec.name).collect::<Vec<_>>();
        assert_eq!(names, vec![TOOL_ADD_EVENT, TOOL_LIST_EVENTS, TOOL_DELETE_EVENT]);
        assert!(tool_specs()[0].description.contains("recurrentes"));
    }
}
