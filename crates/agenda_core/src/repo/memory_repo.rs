//! In-memory agenda repository.
//!
//! Shares date normalization and delete matching with the CSV repository so
//! service behavior is identical against either backend.

use crate::model::event::Event;
use crate::repo::agenda_repo::{
    filter_by_date, remove_matching, AgendaRepository, DeleteOutcome, SaveOutcome,
};
use log::error;
use std::cell::RefCell;

/// Vec-backed repository for tests and embedders without a file.
#[derive(Debug, Default)]
pub struct InMemoryAgendaRepository {
    events: RefCell<Vec<Event>>,
}

impl InMemoryAgendaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with rows, kept in the given order.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: RefCell::new(events),
        }
    }

    /// Copy of the current rows.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl AgendaRepository for InMemoryAgendaRepository {
    fn save(&self, event: &Event) -> SaveOutcome {
        self.events.borrow_mut().push(event.clone());
        SaveOutcome::Saved(event.clone())
    }

    fn find_all(&self) -> Vec<Event> {
        self.snapshot()
    }

    fn find_by_date(&self, date: &str) -> Vec<Event> {
        match filter_by_date(self.snapshot(), date) {
            Ok(events) => events,
            Err(err) => {
                error!("event=agenda_find_by_date module=memory_repo status=error error={err}");
                Vec::new()
            }
        }
    }

    fn delete(&self, name: &str, date: Option<&str>) -> DeleteOutcome {
        let mut events = self.events.borrow_mut();
        if events.is_empty() {
            return DeleteOutcome::EmptyAgenda;
        }
        match remove_matching(&mut events, name, date) {
            0 => DeleteOutcome::NotFound {
                name: name.trim().to_string(),
                date: date.map(|value| value.trim().to_string()),
            },
            count => DeleteOutcome::Removed {
                name: name.trim().to_string(),
                count,
            },
        }
    }
}
