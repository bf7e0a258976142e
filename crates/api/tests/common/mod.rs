//! Shared fixtures for API integration tests: a router wired to a test
//! pool, token minting, and direct row inserts that bypass the engine.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use seatwise_api::auth::jwt::{generate_token, JwtConfig};
use seatwise_api::config::ServerConfig;
use seatwise_api::routes;
use seatwise_api::state::AppState;
use seatwise_core::types::DbId;
use seatwise_db::DbPool;

/// Fixed user ids used across the API tests.
pub const ADMIN: DbId = 1;
pub const OWNER: DbId = 7;
pub const STAFF: DbId = 9;
pub const CUSTOMER: DbId = 100;
pub const OTHER_CUSTOMER: DbId = 101;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".into(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router against a test pool.
pub fn app(pool: DbPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state)
}

/// Mint a Bearer token for a test user.
pub fn token(user_id: DbId, role: &str) -> String {
    generate_token(user_id, role, &test_config().jwt).unwrap()
}

/// Issue a request against the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ---------------------------------------------------------------------------
// Row fixtures
// ---------------------------------------------------------------------------

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

/// Flip a shop's status.
pub async fn set_shop_status(pool: &DbPool, shop_id: DbId, status: &str) {
    sqlx::query("UPDATE shops SET status = ? WHERE id = ?")
        .bind(status)
        .bind(shop_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Register a user as staff of a shop.
pub async fn insert_staff(pool: &DbPool, shop_id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO shop_staff (shop_id, user_id) VALUES (?, ?)")
        .bind(shop_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
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

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Today's date at UTC, matching shops created with a zero offset.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A date one week out, so create-time validation always sees the future.
pub fn next_week() -> NaiveDate {
    today() + Duration::days(7)
}

/// The slot weekday index for a date (0 = Monday .. 6 = Sunday).
pub fn dow(date: NaiveDate) -> i64 {
    seatwise_core::schedule::day_of_week(date)
}

/// A standard booking scene: an active shop at UTC offset 0 with one
/// four-top seat and one slot (ceilings 2 standard / 1 priority) recurring
/// on `date`'s weekday.
pub struct Scene {
    pub shop_id: DbId,
    pub seat_id: DbId,
    pub slot_id: DbId,
    pub date: NaiveDate,
}

pub async fn scene(pool: &DbPool, date: NaiveDate) -> Scene {
    let shop_id = insert_shop(pool, OWNER, 0).await;
    let seat_id = insert_seat(pool, shop_id, 4).await;
    let slot_id = insert_slot(pool, shop_id, dow(date), 2, 1).await;
    Scene {
        shop_id,
        seat_id,
        slot_id,
        date,
    }
}
