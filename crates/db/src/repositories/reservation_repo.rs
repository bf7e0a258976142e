//! Repository for the `reservations` table.
//!
//! Status writes are conditional updates (`WHERE status = ?`), so a raced
//! transition loses cleanly instead of clobbering a newer state. Check-in
//! couples the status flip and the points award in one transaction;
//! cancellation couples the flip and the capacity release the same way.

use chrono::Utc;
use seatwise_core::reservation::{
    STATUS_CANCELLED, STATUS_CHECKED_IN, STATUS_CONFIRMED, STATUS_PENDING,
};
use seatwise_core::types::DbId;

use crate::models::occupancy::SlotKey;
use crate::models::reservation::{NewReservation, Reservation, ReservationListQuery};
use crate::repositories::OccupancyRepo;
use crate::DbPool;

/// Column list for `reservations` queries.
const COLUMNS: &str = "\
    id, customer_id, shop_id, seat_id, slot_id, kind, reserved_on, \
    party_size, note, credential, status, created_at, updated_at";

/// Maximum page size for reservation listing.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for reservation listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a new `PENDING` reservation and return the stored row.
    pub async fn create(pool: &DbPool, input: &NewReservation) -> Result<Reservation, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO reservations \
             (customer_id, shop_id, seat_id, slot_id, kind, reserved_on, \
              party_size, note, credential, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.customer_id)
            .bind(input.shop_id)
            .bind(input.seat_id)
            .bind(input.slot_id)
            .bind(&input.kind)
            .bind(input.reserved_on)
            .bind(input.party_size)
            .bind(&input.note)
            .bind(&input.credential)
            .bind(STATUS_PENDING)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Fetch a reservation by id.
    pub async fn get(pool: &DbPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = ?");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Staff-scan lookup: the newest live reservation matching a presented
    /// credential at a shop. Terminal rows are skipped so a cancelled
    /// booking's credential cannot shadow a re-booked one.
    pub async fn get_by_credential(
        pool: &DbPool,
        shop_id: DbId,
        credential: &str,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE shop_id = ? AND credential = ? \
               AND status IN (?, ?, ?) \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(shop_id)
            .bind(credential)
            .bind(STATUS_PENDING)
            .bind(STATUS_CONFIRMED)
            .bind(STATUS_CHECKED_IN)
            .fetch_optional(pool)
            .await
    }

    /// Conditionally move a reservation from `from` to `to`.
    ///
    /// Returns the updated row, or `None` if the reservation was no longer
    /// in `from` (a concurrent transition won).
    pub async fn set_status(
        pool: &DbPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET status = ?, updated_at = ? \
             WHERE id = ? AND status = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(to)
            .bind(Utc::now())
            .bind(id)
            .bind(from)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a reservation: conditionally flip `from -> CANCELLED` and
    /// release its occupancy unit in one transaction, so a crash can never
    /// leave the unit leaked.
    ///
    /// Returns `None` (with nothing written) when the reservation was no
    /// longer in `from`.
    pub async fn cancel(
        pool: &DbPool,
        id: DbId,
        from: &str,
        key: &SlotKey,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE reservations SET status = ?, updated_at = ? \
             WHERE id = ? AND status = ? \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reservation>(&query)
            .bind(STATUS_CANCELLED)
            .bind(Utc::now())
            .bind(id)
            .bind(from)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(reservation) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        OccupancyRepo::release(&mut *tx, key).await?;

        tx.commit().await?;
        Ok(Some(reservation))
    }

    /// Whether a customer already holds a live reservation for the same
    /// seat, slot, and date. Those identity fields determine the credential,
    /// so a second live row would make the scan lookup ambiguous.
    pub async fn has_live_for_identity(
        pool: &DbPool,
        customer_id: DbId,
        seat_id: DbId,
        slot_id: DbId,
        reserved_on: chrono::NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE customer_id = ? AND seat_id = ? AND slot_id = ? \
               AND reserved_on = ? AND status IN (?, ?, ?)",
        )
        .bind(customer_id)
        .bind(seat_id)
        .bind(slot_id)
        .bind(reserved_on)
        .bind(STATUS_PENDING)
        .bind(STATUS_CONFIRMED)
        .bind(STATUS_CHECKED_IN)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Check a reservation in: flip `CONFIRMED -> CHECKED_IN` and append
    /// the points entry in one transaction.
    ///
    /// The insert is `INSERT OR IGNORE` against the unique reservation-id
    /// index, so a retried check-in (or a crash between commit and response)
    /// can never double-award. Returns `None` when the reservation was not
    /// in `CONFIRMED`.
    pub async fn check_in(
        pool: &DbPool,
        id: DbId,
        customer_id: DbId,
        points: i64,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE reservations SET status = ?, updated_at = ? \
             WHERE id = ? AND status = ? \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reservation>(&query)
            .bind(STATUS_CHECKED_IN)
            .bind(Utc::now())
            .bind(id)
            .bind(STATUS_CONFIRMED)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(reservation) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT OR IGNORE INTO points_entries \
             (reservation_id, customer_id, points, created_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(customer_id)
        .bind(points)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(reservation))
    }

    /// List a shop's reservations with optional status/date filters.
    ///
    /// Returns the page plus the total row count for the filter.
    pub async fn list_for_shop(
        pool: &DbPool,
        shop_id: DbId,
        query: &ReservationListQuery,
    ) -> Result<(Vec<Reservation>, i64), sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;
        let order_by = sort_clause(query.sort.as_deref());

        let mut filter = String::from("WHERE shop_id = ?");
        if query.status.is_some() {
            filter.push_str(" AND status = ?");
        }
        if query.date.is_some() {
            filter.push_str(" AND reserved_on = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM reservations {filter}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(shop_id);
        if let Some(status) = &query.status {
            count_query = count_query.bind(status);
        }
        if let Some(date) = query.date {
            count_query = count_query.bind(date);
        }
        let total = count_query.fetch_one(pool).await?;

        let list_sql = format!(
            "SELECT {COLUMNS} FROM reservations {filter} {order_by} LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, Reservation>(&list_sql).bind(shop_id);
        if let Some(status) = &query.status {
            list_query = list_query.bind(status);
        }
        if let Some(date) = query.date {
            list_query = list_query.bind(date);
        }
        let rows = list_query
            .bind(page_size)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// List a customer's own reservations, newest first.
    pub async fn list_for_customer(
        pool: &DbPool,
        customer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE customer_id = ? \
             ORDER BY created_at DESC \
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(customer_id)
            .bind(limit.clamp(1, MAX_PAGE_SIZE))
            .bind(offset.max(0))
            .fetch_all(pool)
            .await
    }

    /// Count a shop's reservations for a (slot, date, kind) key that are in
    /// a capacity-consuming status. Used by tests to cross-check the
    /// occupancy counter against the source of truth.
    pub async fn count_live_for_key(
        pool: &DbPool,
        slot_id: DbId,
        reserved_on: chrono::NaiveDate,
        kind: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE slot_id = ? AND reserved_on = ? AND kind = ? \
               AND status IN (?, ?, ?)",
        )
        .bind(slot_id)
        .bind(reserved_on)
        .bind(kind)
        .bind(STATUS_PENDING)
        .bind(STATUS_CONFIRMED)
        .bind(STATUS_CHECKED_IN)
        .fetch_one(pool)
        .await
    }
}

/// Map a sort key onto a whitelisted ORDER BY clause. Unknown keys fall
/// back to the default rather than erroring.
fn sort_clause(sort: Option<&str>) -> &'static str {
    match sort {
        Some("date_desc") => "ORDER BY reserved_on DESC, created_at DESC",
        Some("created_asc") => "ORDER BY created_at ASC",
        Some("created_desc") => "ORDER BY created_at DESC",
        _ => "ORDER BY reserved_on ASC, created_at ASC",
    }
}
