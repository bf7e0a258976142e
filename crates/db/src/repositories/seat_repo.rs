//! Read-only repository for the `seats` table.

use seatwise_core::types::DbId;

use crate::models::seat::Seat;
use crate::DbPool;

/// Column list for `seats` queries.
const COLUMNS: &str = "id, shop_id, name, capacity, is_available, created_at";

pub struct SeatRepo;

impl SeatRepo {
    /// Fetch a seat by id.
    pub async fn get(pool: &DbPool, seat_id: DbId) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seats WHERE id = ?");
        sqlx::query_as::<_, Seat>(&query)
            .bind(seat_id)
            .fetch_optional(pool)
            .await
    }
}
