//! Domain logic for the seatwise reservation engine.
//!
//! This crate has zero internal dependencies so the state machine,
//! authorization policy, and credential logic can be used by the API
//! server, the repositories, and any future CLI tooling alike.

pub mod credential;
pub mod error;
pub mod points;
pub mod policy;
pub mod reservation;
pub mod roles;
pub mod schedule;
pub mod types;
