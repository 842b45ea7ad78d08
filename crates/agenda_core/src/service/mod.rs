//! Core use-case services.
//!
//! # Responsibility
//! - Enforce agenda business rules on top of repository calls.
//! - Keep tool/front-end layers decoupled from storage details.

pub mod agenda_service;
