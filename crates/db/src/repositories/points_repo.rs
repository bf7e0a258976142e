//! Repository for the `points_entries` ledger.
//!
//! Entries are only ever written by `ReservationRepo::check_in`; this repo
//! is the read side.

use seatwise_core::types::DbId;

use crate::models::points::PointsEntry;
use crate::DbPool;

/// Column list for `points_entries` queries.
const COLUMNS: &str = "id, reservation_id, customer_id, points, created_at";

pub struct PointsRepo;

impl PointsRepo {
    /// A customer's total points: a pure aggregation over their entries.
    pub async fn total_for_customer(pool: &DbPool, customer_id: DbId) -> Result<i64, sqlx::Error> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(points) FROM points_entries WHERE customer_id = ?",
        )
        .bind(customer_id)
        .fetch_one(pool)
        .await?;
        Ok(total.unwrap_or(0))
    }

    /// The entry awarded for a reservation, if any.
    pub async fn get_for_reservation(
        pool: &DbPool,
        reservation_id: DbId,
    ) -> Result<Option<PointsEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM points_entries WHERE reservation_id = ?");
        sqlx::query_as::<_, PointsEntry>(&query)
            .bind(reservation_id)
            .fetch_optional(pool)
            .await
    }

    /// List a customer's entries, newest first.
    pub async fn list_for_customer(
        pool: &DbPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PointsEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM points_entries \
             WHERE customer_id = ? \
             ORDER BY created_at DESC \
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, PointsEntry>(&query)
            .bind(customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
