//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the agenda persistence port used by the service layer.
//! - Isolate CSV table details from business rules.
//!
//! # Invariants
//! - Repositories hold no business rules; validation lives in the service.
//! - Repository port calls never surface raw I/O errors to callers.

pub mod agenda_repo;
pub mod memory_repo;
