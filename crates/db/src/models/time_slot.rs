//! Recurring time-slot definition model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::reservation::KIND_PRIORITY;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `time_slots` table: a recurring (shop, weekday, window)
/// definition with separate ceilings for standard and priority bookings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeSlot {
    pub id: DbId,
    pub shop_id: DbId,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    pub max_regular: i64,
    pub max_premium: i64,
    pub created_at: Timestamp,
}

impl TimeSlot {
    /// The occupancy ceiling that applies to a reservation kind.
    pub fn ceiling_for(&self, kind: &str) -> i64 {
        if kind == KIND_PRIORITY {
            self.max_premium
        } else {
            self.max_regular
        }
    }
}
