//! Shared fixtures for repository integration tests.

use chrono::{NaiveDate, Utc};
use seatwise_core::types::DbId;
use seatwise_db::DbPool;

/// Insert an active shop owned by `owner_id`, returning its id.
pub async fn insert_shop(pool: &DbPool, owner_id: DbId, utc_offset_minutes: i32) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO shops (owner_id, name, status, utc_offset_minutes) \
         VALUES (?, 'Test Shop', 'active', ?) RETURNING id",
    )
    .bind(owner_id)
    .bind(utc_offset_minutes)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an available seat with the given capacity.
pub async fn insert_seat(pool: &DbPool, shop_id: DbId, capacity: i64) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO seats (shop_id, name, capacity, is_available) \
         VALUES (?, 'Window', ?, 1) RETURNING id",
    )
    .bind(shop_id)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a slot definition for the given weekday and ceilings.
pub async fn insert_slot(
    pool: &DbPool,
    shop_id: DbId,
    day_of_week: i64,
    max_regular: i64,
    max_premium: i64,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO time_slots (shop_id, day_of_week, start_time, end_time, max_regular, max_premium) \
         VALUES (?, ?, '18:00', '20:00', ?, ?) RETURNING id",
    )
    .bind(shop_id)
    .bind(day_of_week)
    .bind(max_regular)
    .bind(max_premium)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a reservation row directly, bypassing the orchestrator.
pub async fn insert_reservation(
    pool: &DbPool,
    customer_id: DbId,
    shop_id: DbId,
    seat_id: DbId,
    slot_id: DbId,
    kind: &str,
    reserved_on: NaiveDate,
    status: &str,
) -> DbId {
    let credential = format!("{shop_id}-{seat_id}-{slot_id}-{reserved_on}-{customer_id}");
    sqlx::query_scalar(
        "INSERT INTO reservations \
         (customer_id, shop_id, seat_id, slot_id, kind, reserved_on, \
          party_size, note, credential, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, 2, '', ?, ?, ?, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(shop_id)
    .bind(seat_id)
    .bind(slot_id)
    .bind(kind)
    .bind(reserved_on)
    .bind(credential)
    .bind(status)
    .bind(Utc::now())
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .unwrap()
}

/// A Monday in the future relative to the fixture data.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 7).unwrap()
}
