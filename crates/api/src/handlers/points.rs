//! Handlers for the `/points` resource.
//!
//! The balance is always computed from the ledger; there is no stored
//! counter to drift out of sync.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use seatwise_db::repositories::PointsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for ledger history listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for ledger history listing.
const DEFAULT_LIMIT: i64 = 50;

/// Response payload for `GET /points/total`.
#[derive(Debug, Serialize)]
pub struct PointsTotal {
    pub total: i64,
}

/// GET /api/v1/points/total
///
/// The authenticated customer's current points balance.
pub async fn get_total(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let total = PointsRepo::total_for_customer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: PointsTotal { total },
    }))
}

/// GET /api/v1/points/history
///
/// The authenticated customer's ledger entries, newest first.
pub async fn list_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let entries = PointsRepo::list_for_customer(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}
