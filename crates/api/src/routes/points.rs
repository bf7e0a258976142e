//! Route definitions for the `/points` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::points;
use crate::state::AppState;

/// Routes mounted at `/points`.
///
/// ```text
/// GET    /total      -> get_total
/// GET    /history    -> list_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/total", get(points::get_total))
        .route("/history", get(points::list_history))
}
