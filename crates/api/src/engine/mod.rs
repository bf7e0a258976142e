//! Reservation lifecycle engine.
//!
//! Contains the orchestrator that drives every reservation operation
//! (create, confirm, cancel, check-in, complete, listing) plus the
//! notification dispatch that fans lifecycle events out to the affected
//! users after the state change has committed.

pub mod notify;
pub mod reservations;
