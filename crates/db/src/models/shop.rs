//! Shop entity model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::types::{DbId, Timestamp};

/// Shop status value for an operating shop. Only active shops accept
/// bookings and check-ins.
pub const SHOP_STATUS_ACTIVE: &str = "active";

/// A row from the `shops` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shop {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub status: String,
    /// Fixed offset of the shop's local wall clock from UTC, in minutes.
    pub utc_offset_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Shop {
    pub fn is_active(&self) -> bool {
        self.status == SHOP_STATUS_ACTIVE
    }
}
