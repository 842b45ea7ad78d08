//! Agenda domain model.
//!
//! # Responsibility
//! - Define the event record used by every layer of the core.
//!
//! # Invariants
//! - Events carry no identity field; deletion matches on name and date.

pub mod event;
