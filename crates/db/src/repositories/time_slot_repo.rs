//! Read-only repository for the `time_slots` table.

use seatwise_core::types::DbId;

use crate::models::time_slot::TimeSlot;
use crate::DbPool;

/// Column list for `time_slots` queries.
const COLUMNS: &str =
    "id, shop_id, day_of_week, start_time, end_time, max_regular, max_premium, created_at";

pub struct TimeSlotRepo;

impl TimeSlotRepo {
    /// Fetch a time-slot definition by id.
    pub async fn get(pool: &DbPool, slot_id: DbId) -> Result<Option<TimeSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_slots WHERE id = ?");
        sqlx::query_as::<_, TimeSlot>(&query)
            .bind(slot_id)
            .fetch_optional(pool)
            .await
    }
}
