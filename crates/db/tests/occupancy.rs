//! Occupancy counter tests: the atomic increment-with-ceiling is the one
//! defense against overselling a slot.

mod common;

use common::{insert_shop, insert_slot, monday};
use seatwise_core::reservation::{KIND_PRIORITY, KIND_STANDARD};
use seatwise_db::models::occupancy::SlotKey;
use seatwise_db::repositories::OccupancyRepo;
use sqlx::SqlitePool;

fn key(shop_id: i64, slot_id: i64, kind: &str) -> SlotKey {
    SlotKey {
        shop_id,
        slot_id,
        reserved_on: monday(),
        kind: kind.to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn reserve_up_to_ceiling_then_reject(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 3, 1).await;
    let k = key(shop, slot, KIND_STANDARD);

    for _ in 0..3 {
        assert!(OccupancyRepo::reserve(&pool, &k, 3).await.unwrap());
    }
    // The (N+1)th is rejected.
    assert!(!OccupancyRepo::reserve(&pool, &k, 3).await.unwrap());
    assert_eq!(
        OccupancyRepo::current(&pool, slot, monday(), KIND_STANDARD)
            .await
            .unwrap(),
        3
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn zero_ceiling_rejects_first_booking(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 0, 0).await;
    let k = key(shop, slot, KIND_STANDARD);

    assert!(!OccupancyRepo::reserve(&pool, &k, 0).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn kinds_are_tracked_independently(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 1, 1).await;

    assert!(OccupancyRepo::reserve(&pool, &key(shop, slot, KIND_STANDARD), 1)
        .await
        .unwrap());
    // Standard is full, priority still has room.
    assert!(!OccupancyRepo::reserve(&pool, &key(shop, slot, KIND_STANDARD), 1)
        .await
        .unwrap());
    assert!(OccupancyRepo::reserve(&pool, &key(shop, slot, KIND_PRIORITY), 1)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn release_frees_exactly_one_unit(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 2, 0).await;
    let k = key(shop, slot, KIND_STANDARD);

    assert!(OccupancyRepo::reserve(&pool, &k, 2).await.unwrap());
    assert!(OccupancyRepo::reserve(&pool, &k, 2).await.unwrap());
    assert!(!OccupancyRepo::reserve(&pool, &k, 2).await.unwrap());

    OccupancyRepo::release(&pool, &k).await.unwrap();
    assert!(OccupancyRepo::reserve(&pool, &k, 2).await.unwrap());
    assert!(!OccupancyRepo::reserve(&pool, &k, 2).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn release_never_goes_below_zero(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 1, 0).await;
    let k = key(shop, slot, KIND_STANDARD);

    // Releasing with no row (and with a zero row) is a no-op.
    OccupancyRepo::release(&pool, &k).await.unwrap();
    assert_eq!(
        OccupancyRepo::current(&pool, slot, monday(), KIND_STANDARD)
            .await
            .unwrap(),
        0
    );

    assert!(OccupancyRepo::reserve(&pool, &k, 1).await.unwrap());
    OccupancyRepo::release(&pool, &k).await.unwrap();
    OccupancyRepo::release(&pool, &k).await.unwrap();
    assert_eq!(
        OccupancyRepo::current(&pool, slot, monday(), KIND_STANDARD)
            .await
            .unwrap(),
        0
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn concurrent_reserves_never_exceed_ceiling(pool: SqlitePool) {
    let shop = insert_shop(&pool, 1, 0).await;
    let slot = insert_slot(&pool, shop, 0, 4, 0).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let pool = pool.clone();
        let k = key(shop, slot, KIND_STANDARD);
        handles.push(tokio::spawn(async move {
            OccupancyRepo::reserve(&pool, &k, 4).await.unwrap()
        }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            granted += 1;
        }
    }

    assert_eq!(granted, 4);
    assert_eq!(
        OccupancyRepo::current(&pool, slot, monday(), KIND_STANDARD)
            .await
            .unwrap(),
        4
    );
}
