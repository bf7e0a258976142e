//! Points ledger tests: the award is transactional with check-in and
//! idempotent per reservation.

mod common;

use common::{insert_reservation, insert_seat, insert_shop, insert_slot, monday};
use seatwise_core::points::points_for_party;
use seatwise_core::reservation::{
    KIND_STANDARD, STATUS_CHECKED_IN, STATUS_CONFIRMED, STATUS_PENDING,
};
use seatwise_db::repositories::{PointsRepo, ReservationRepo};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn check_in_flips_status_and_awards_once(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let seat = insert_seat(&pool, shop, 4).await;
    let slot = insert_slot(&pool, shop, 0, 5, 2).await;
    let id = insert_reservation(
        &pool, 42, shop, seat, slot, KIND_STANDARD, monday(), STATUS_CONFIRMED,
    )
    .await;

    let checked_in = ReservationRepo::check_in(&pool, id, 42, points_for_party(2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(checked_in.status, STATUS_CHECKED_IN);

    let entry = PointsRepo::get_for_reservation(&pool, id).await.unwrap().unwrap();
    assert_eq!(entry.points, 20);
    assert_eq!(entry.customer_id, 42);

    // A retried check-in finds the row no longer CONFIRMED and changes
    // nothing.
    let again = ReservationRepo::check_in(&pool, id, 42, points_for_party(2))
        .await
        .unwrap();
    assert!(again.is_none());

    let total = PointsRepo::total_for_customer(&pool, 42).await.unwrap();
    assert_eq!(total, 20);
}

#[sqlx::test(migrations = "./migrations")]
async fn check_in_requires_confirmed_source(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let seat = insert_seat(&pool, shop, 4).await;
    let slot = insert_slot(&pool, shop, 0, 5, 2).await;
    let id = insert_reservation(
        &pool, 42, shop, seat, slot, KIND_STANDARD, monday(), STATUS_PENDING,
    )
    .await;

    let result = ReservationRepo::check_in(&pool, id, 42, 20).await.unwrap();
    assert!(result.is_none());

    // No entry was written: the award only happens with the status flip.
    assert!(PointsRepo::get_for_reservation(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn totals_aggregate_over_entries(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let seat = insert_seat(&pool, shop, 6).await;
    let slot = insert_slot(&pool, shop, 0, 5, 2).await;

    // Two check-ins for the same customer on different reservations.
    for date in [monday(), monday() + chrono::Duration::days(7)] {
        let id = insert_reservation(
            &pool, 7, shop, seat, slot, KIND_STANDARD, date, STATUS_CONFIRMED,
        )
        .await;
        ReservationRepo::check_in(&pool, id, 7, points_for_party(2))
            .await
            .unwrap()
            .unwrap();
    }

    assert_eq!(PointsRepo::total_for_customer(&pool, 7).await.unwrap(), 40);
    // A customer with no entries has a zero balance, not an error.
    assert_eq!(PointsRepo::total_for_customer(&pool, 999).await.unwrap(), 0);

    let entries = PointsRepo::list_for_customer(&pool, 7, 10, 0).await.unwrap();
    assert_eq!(entries.len(), 2);
}
