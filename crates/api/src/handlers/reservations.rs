//! Handlers for the `/reservations` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. State changes are
//! delegated to the engine; each handler only shapes the HTTP surface and
//! spawns notification dispatch after the change has committed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use seatwise_core::types::DbId;
use seatwise_db::repositories::reservation_repo::DEFAULT_PAGE_SIZE;
use seatwise_db::repositories::ReservationRepo;

use crate::engine::reservations::{self as engine, CreateReservation, ReservationOutcome};
use crate::engine::notify;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for check-in: the credential read from the customer's QR.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub credential: String,
}

/// Response payload for `GET /reservations/{id}/qr`.
#[derive(Debug, Serialize)]
pub struct QrResponse {
    /// `data:image/png;base64,...` rendering of the credential.
    pub qr_png: String,
}

/// Turn an engine outcome into a JSON response, handing its notifications
/// to a background task first.
fn respond(
    state: &AppState,
    outcome: ReservationOutcome,
) -> Json<DataResponse<seatwise_db::models::reservation::Reservation>> {
    tokio::spawn(notify::dispatch(state.pool.clone(), outcome.intents));
    Json(DataResponse {
        data: outcome.reservation,
    })
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

/// POST /api/v1/reservations
///
/// Create a reservation. Returns 201 with the stored `PENDING` row, or
/// `CAPACITY_EXCEEDED` when the slot is full for the requested kind.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = engine::create(&state.pool, &auth.actor(), input).await?;
    Ok((StatusCode::CREATED, respond(&state, outcome)))
}

/// GET /api/v1/reservations
///
/// List the authenticated customer's own reservations, newest first.
pub async fn list_my_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);

    let rows = ReservationRepo::list_for_customer(&state.pool, auth.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reservations/{id}
pub async fn get_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = engine::get(&state.pool, &auth.actor(), id).await?;
    Ok(Json(DataResponse { data: reservation }))
}

/// GET /api/v1/reservations/{id}/qr
///
/// The reservation's credential rendered as a QR PNG data URL.
pub async fn get_reservation_qr(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let qr_png = engine::credential_qr(&state.pool, &auth.actor(), id).await?;
    Ok(Json(DataResponse {
        data: QrResponse { qr_png },
    }))
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/reservations/{id}/confirm
pub async fn confirm_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::confirm(&state.pool, &auth.actor(), id).await?;
    Ok(respond(&state, outcome))
}

/// POST /api/v1/reservations/{id}/cancel
pub async fn cancel_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::cancel(&state.pool, &auth.actor(), id).await?;
    Ok(respond(&state, outcome))
}

/// POST /api/v1/reservations/{id}/check-in
///
/// Customer self check-in with the credential from their QR code.
pub async fn check_in_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CheckInRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::check_in(&state.pool, &auth.actor(), id, &input.credential).await?;
    Ok(respond(&state, outcome))
}

/// POST /api/v1/reservations/{id}/complete
pub async fn complete_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::complete(&state.pool, &auth.actor(), id).await?;
    Ok(respond(&state, outcome))
}
