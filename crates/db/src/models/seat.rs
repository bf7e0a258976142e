//! Seat entity model.

use serde::Serialize;
use sqlx::FromRow;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `seats` table. The reservation engine never mutates
/// seats; it only validates party size and availability against them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seat {
    pub id: DbId,
    pub shop_id: DbId,
    pub name: String,
    pub capacity: i64,
    pub is_available: bool,
    pub created_at: Timestamp,
}
