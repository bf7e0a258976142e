pub mod health;
pub mod notification;
pub mod points;
pub mod reservations;
pub mod shops;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reservations                        list own, create
/// /reservations/{id}                   get
/// /reservations/{id}/qr                credential QR (GET)
/// /reservations/{id}/confirm           confirm (POST)
/// /reservations/{id}/cancel            cancel (POST)
/// /reservations/{id}/check-in          self check-in (POST)
/// /reservations/{id}/complete          complete (POST)
///
/// /shops/{id}/reservations             shop board (GET)
/// /shops/{id}/check-in                 scan check-in (POST)
///
/// /points/total                        balance (GET)
/// /points/history                      ledger entries (GET)
///
/// /notifications                       list (?unread_only, limit, offset)
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          unread count (GET)
/// /notifications/{id}/read             mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reservations", reservations::router())
        .nest("/shops", shops::router())
        .nest("/points", points::router())
        .nest("/notifications", notification::router())
}
