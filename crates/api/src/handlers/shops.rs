//! Shop-side handlers: the reservation board and the door scan.
//!
//! Both endpoints are restricted to the shop's owner, its staff, or an
//! admin; the engine resolves staff membership before authorizing.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use seatwise_core::types::DbId;
use seatwise_db::models::reservation::ReservationListQuery;

use crate::engine::notify;
use crate::engine::reservations as engine;
use crate::error::AppResult;
use crate::handlers::reservations::CheckInRequest;
use crate::middleware::auth::AuthUser;
use crate::response::Page;
use crate::state::AppState;

/// GET /api/v1/shops/{id}/reservations
///
/// Paged listing of a shop's reservations. Supports `status`, `date`,
/// `page`, `page_size`, and `sort` query parameters.
pub async fn list_shop_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(shop_id): Path<DbId>,
    Query(query): Query<ReservationListQuery>,
) -> AppResult<impl IntoResponse> {
    let listing = engine::list_shop(&state.pool, &auth.actor(), shop_id, query).await?;

    Ok(Json(Page {
        data: listing.rows,
        page: listing.page,
        page_size: listing.page_size,
        total: listing.total,
    }))
}

/// POST /api/v1/shops/{id}/check-in
///
/// Staff-side check-in: resolve a scanned credential to the newest live
/// reservation at this shop and check it in.
pub async fn scan_check_in(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(shop_id): Path<DbId>,
    Json(input): Json<CheckInRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome =
        engine::check_in_by_credential(&state.pool, &auth.actor(), shop_id, &input.credential)
            .await?;

    tokio::spawn(notify::dispatch(state.pool.clone(), outcome.intents));
    Ok(Json(crate::response::DataResponse {
        data: outcome.reservation,
    }))
}
