//! Route definitions for the `/reservations` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// GET    /                -> list_my_reservations
/// POST   /                -> create_reservation
/// GET    /{id}            -> get_reservation
/// GET    /{id}/qr         -> get_reservation_qr
/// POST   /{id}/confirm    -> confirm_reservation
/// POST   /{id}/cancel     -> cancel_reservation
/// POST   /{id}/check-in   -> check_in_reservation
/// POST   /{id}/complete   -> complete_reservation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reservations::list_my_reservations).post(reservations::create_reservation),
        )
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/qr", get(reservations::get_reservation_qr))
        .route("/{id}/confirm", post(reservations::confirm_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route("/{id}/check-in", post(reservations::check_in_reservation))
        .route("/{id}/complete", post(reservations::complete_reservation))
}
