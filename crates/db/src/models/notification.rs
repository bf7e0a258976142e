//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::types::{DbId, Timestamp};

/// Reference type for notifications pointing at a reservation.
pub const REFERENCE_RESERVATION: &str = "reservation";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub reference_type: String,
    pub reference_id: DbId,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
