//! Repository for the `slot_occupancy` counters.
//!
//! This is the one shared-mutable resource in the system: concurrent
//! bookings against the same (slot, date, kind) key race here. Both
//! mutations are single SQL statements, so the ceiling check and the
//! increment cannot be interleaved by another writer; there is no
//! check-then-write window to exploit.

use seatwise_core::types::DbId;

use crate::models::occupancy::SlotKey;
use crate::DbPool;

pub struct OccupancyRepo;

impl OccupancyRepo {
    /// Reserve one unit of capacity under `key`, subject to `ceiling`.
    ///
    /// Creates the counter row lazily at zero, then increments it only if
    /// the current count is still below the ceiling. Returns `false` when
    /// the slot is full; the caller reports capacity-exceeded and must not
    /// retry silently.
    ///
    /// A reserved unit is held until [`release`](Self::release); including
    /// by `PENDING` reservations that are never confirmed; there is no
    /// expiry.
    pub async fn reserve(pool: &DbPool, key: &SlotKey, ceiling: i64) -> Result<bool, sqlx::Error> {
        sqlx::query(
            "INSERT INTO slot_occupancy (shop_id, slot_id, reserved_on, kind, count) \
             VALUES (?, ?, ?, ?, 0) \
             ON CONFLICT(slot_id, reserved_on, kind) DO NOTHING",
        )
        .bind(key.shop_id)
        .bind(key.slot_id)
        .bind(key.reserved_on)
        .bind(&key.kind)
        .execute(pool)
        .await?;

        let result = sqlx::query(
            "UPDATE slot_occupancy SET count = count + 1 \
             WHERE slot_id = ? AND reserved_on = ? AND kind = ? AND count < ?",
        )
        .bind(key.slot_id)
        .bind(key.reserved_on)
        .bind(&key.kind)
        .bind(ceiling)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Release one unit of capacity previously reserved under `key`.
    ///
    /// Guarded so the counter never goes below zero. Called on cancellation
    /// (inside the cancel transaction) and when a create fails after its
    /// capacity was already reserved; never called on completion. Takes any
    /// executor so it can join an enclosing transaction.
    pub async fn release<'e, E>(executor: E, key: &SlotKey) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            "UPDATE slot_occupancy SET count = count - 1 \
             WHERE slot_id = ? AND reserved_on = ? AND kind = ? AND count > 0",
        )
        .bind(key.slot_id)
        .bind(key.reserved_on)
        .bind(&key.kind)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Current count for a key (zero when no row exists yet).
    pub async fn current(
        pool: &DbPool,
        slot_id: DbId,
        reserved_on: chrono::NaiveDate,
        kind: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT count FROM slot_occupancy WHERE slot_id = ? AND reserved_on = ? AND kind = ?",
        )
        .bind(slot_id)
        .bind(reserved_on)
        .bind(kind)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
