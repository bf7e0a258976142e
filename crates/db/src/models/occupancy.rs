//! Slot occupancy counter model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::types::DbId;

/// A row from the `slot_occupancy` table: the live count of
/// capacity-consuming reservations for one (slot, date, kind) key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotOccupancy {
    pub shop_id: DbId,
    pub slot_id: DbId,
    pub reserved_on: NaiveDate,
    pub kind: String,
    pub count: i64,
}

/// The key a capacity unit was reserved under. Held by the orchestrator so
/// the unit can be released on cancellation (or on a failed create).
#[derive(Debug, Clone)]
pub struct SlotKey {
    pub shop_id: DbId,
    pub slot_id: DbId,
    pub reserved_on: NaiveDate,
    pub kind: String,
}
