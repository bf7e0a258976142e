//! Loyalty points ledger model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `points_entries` table. Immutable once written; a
/// customer's balance is always the sum over their entries, never a
/// stored counter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PointsEntry {
    pub id: DbId,
    pub reservation_id: DbId,
    pub customer_id: DbId,
    pub points: i64,
    pub created_at: Timestamp,
}
