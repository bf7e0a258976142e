//! Route definitions for the shop-side `/shops` endpoints.
//!
//! All endpoints require authentication; the engine additionally enforces
//! ownership or staff membership of the target shop.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shops;
use crate::state::AppState;

/// Routes mounted at `/shops`.
///
/// ```text
/// GET    /{id}/reservations   -> list_shop_reservations
/// POST   /{id}/check-in       -> scan_check_in
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/reservations", get(shops::list_shop_reservations))
        .route("/{id}/check-in", post(shops::scan_check_in))
}
