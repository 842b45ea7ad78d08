//! Agenda use-case service.
//!
//! # Responsibility
//! - Enforce agenda business rules before anything reaches storage.
//! - Delegate persistence and queries to a repository implementation.
//!
//! # Invariants
//! - Rejected input never touches the repository.
//! - Repository messages are returned verbatim; no extra wrapping.
//! - New events may not be dated later than today + 365 days.
//! - There is no series primitive: recurring events are one call per date.

use crate::model::event::{parse_event_date, parse_event_time, Event};
use crate::repo::agenda_repo::AgendaRepository;
use chrono::{Days, Local, NaiveDate};
use log::debug;

/// How far into the future new events may be scheduled.
pub const FUTURE_LIMIT_DAYS: u64 = 365;

pub const DATE_FORMAT_MESSAGE: &str = "⚠️ El formato de fecha debe ser YYYY-MM-DD.";
pub const TIME_FORMAT_MESSAGE: &str = "⚠️ El formato de hora debe ser HH:MM (24 horas).";
pub const EMPTY_NAME_MESSAGE: &str = "⚠️ El nombre del evento no puede estar vacío.";

const RULES_REMINDER: &str = "\n\n*Recuerda que agendamos con formato **AAAA-MM-DD o lenguaje natural**, soportamos **eventos recurrentes** y máximo **1 año** al futuro.*";

type TodayFn = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Rules layer over an agenda repository.
pub struct AgendaService<R: AgendaRepository> {
    repo: R,
    today: TodayFn,
}

impl<R: AgendaRepository> AgendaService<R> {
    /// Creates a service that reads "today" from the local clock.
    pub fn new(repo: R) -> Self {
        Self::with_today(repo, || Local::now().date_naive())
    }

    /// Creates a service with a caller-provided "today" source.
    pub fn with_today(repo: R, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        Self {
            repo,
            today: Box::new(today),
        }
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Latest date accepted by `add_new_event`.
    pub fn ceiling_date(&self) -> NaiveDate {
        (self.today)()
            .checked_add_days(Days::new(FUTURE_LIMIT_DAYS))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Validates and stores one event.
    ///
    /// # Contract
    /// - `date_text` must be `YYYY-MM-DD`; checked first.
    /// - Dates after `ceiling_date()` are rejected; the ceiling itself is allowed.
    /// - Blank names and non `HH:MM` times are rejected.
    /// - Returns either a validation message or the repository save message.
    pub fn add_new_event(&self, name: &str, date_text: &str, time_text: &str) -> String {
        let Ok(date) = parse_event_date(date_text) else {
            debug!("event=agenda_add module=service status=rejected reason=date_format");
            return DATE_FORMAT_MESSAGE.to_string();
        };

        let limit = self.ceiling_date();
        if date > limit {
            debug!("event=agenda_add module=service status=rejected reason=ceiling limit={limit}");
            return format!(
                "⚠️ No puedes agendar eventos a más de un año en el futuro (Límite: {limit})."
            );
        }

        let Ok(time) = parse_event_time(time_text) else {
            debug!("event=agenda_add module=service status=rejected reason=time_format");
            return TIME_FORMAT_MESSAGE.to_string();
        };

        match Event::validated(name, date, time) {
            Ok(event) => self.repo.save(&event).to_string(),
            Err(_) => {
                debug!("event=agenda_add module=service status=rejected reason=empty_name");
                EMPTY_NAME_MESSAGE.to_string()
            }
        }
    }

    /// Lists every stored event in storage order.
    pub fn list_all_events(&self) -> Vec<Event> {
        self.repo.find_all()
    }

    /// Lists events on one date.
    pub fn list_events_by_date(&self, date: &str) -> Vec<Event> {
        self.repo.find_by_date(date)
    }

    /// Removes events by name, optionally restricted to one date.
    pub fn remove_event(&self, name: &str, date: Option<&str>) -> String {
        self.repo.delete(name, date).to_string()
    }

    /// Greeting shown when a chat session starts.
    pub fn welcome_message(&self) -> String {
        let greeting = if self.list_all_events().is_empty() {
            "¡Hola! Soy tu asistente de agenda. Tu agenda está lista pero vacía. ¿Te gustaría programar tu primer evento?"
        } else {
            "¡Hola! Soy tu asistente de agenda. He verificado tu agenda y tienes eventos programados. ¿Qué te gustaría consultar?"
        };
        format!("{greeting}{RULES_REMINDER}")
    }
}

#[cfg(test)]
mod tests {
    use super::{AgendaService, DATE_FORMAT_MESSAGE, EMPTY_NAME_MESSAGE, TIME_FORMAT_MESSAGE};
    use crate::model::event::Event;
    use crate::repo::memory_repo::InMemoryAgendaRepository;
    use chrono::NaiveDate;

    fn service_on(today: NaiveDate) -> AgendaService<InMemoryAgendaRepository> {
        AgendaService::with_today(InMemoryAgendaRepository::new(), move || today)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_stores_canonical_event() {
        let service = service_on(date(2025, 1, 15));
        let message = service.add_new_event("Revisión", "2025-03-01", "9:00");

        assert!(message.starts_with("¡Listo!"), "{message}");
        assert_eq!(
            service.list_all_events(),
            vec![Event::new("Revisión", "2025-03-01", "09:00")]
        );
    }

    #[test]
    fn ceiling_is_inclusive() {
        let service = service_on(date(2025, 1, 1));
        assert_eq!(service.ceiling_date(), date(2026, 1, 1));

        let at_limit = service.add_new_event("Límite", "2026-01-01", "10:00");
        assert!(at_limit.starts_with("¡Listo!"), "{at_limit}");

        let past_limit = service.add_new_event("Tarde", "2026-01-02", "10:00");
        assert!(past_limit.contains("Límite: 2026-01-01"), "{past_limit}");
        assert_eq!(service.list_all_events().len(), 1);
    }

    #[test]
    fn malformed_input_is_rejected_without_side_effects() {
        let service = service_on(date(2025, 1, 1));

        assert_eq!(service.add_new_event("A", "01/03/2025", "10:00"), DATE_FORMAT_MESSAGE);
        assert_eq!(service.add_new_event("A", "", "10:00"), DATE_FORMAT_MESSAGE);
        assert_eq!(service.add_new_event("A", "2025-03-01", "diez"), TIME_FORMAT_MESSAGE);
        assert_eq!(service.add_new_event("  ", "2025-03-01", "10:00"), EMPTY_NAME_MESSAGE);
        assert!(service.repository().snapshot().is_empty());
    }

    #[test]
    fn date_format_is_checked_before_ceiling() {
        let service = service_on(date(2025, 1, 1));
        assert_eq!(service.add_new_event("X", "2099-13-01", "10:00"), DATE_FORMAT_MESSAGE);
    }

    #[test]
    fn past_dates_are_accepted() {
        let service = service_on(date(2025, 6, 1));
        let message = service.add_new_event("Pasado", "2024-12-31", "18:30");
        assert!(message.starts_with("¡Listo!"), "{message}");
    }

    #[test]
    fn welcome_message_reflects_agenda_state() {
        let service = service_on(date(2025, 1, 1));
        assert!(service.welcome_message().contains("vacía"));

        service.add_new_event("Cita", "2025-02-01", "08:00");
        assert!(service.welcome_message().contains("tienes eventos programados"));
        assert!(service.welcome_message().contains("1 año"));
    }
}
