//! Reservation entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use seatwise_core::types::{DbId, Timestamp};

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub customer_id: DbId,
    pub shop_id: DbId,
    pub seat_id: DbId,
    pub slot_id: DbId,
    pub kind: String,
    /// Target calendar date (shop-local).
    pub reserved_on: NaiveDate,
    pub party_size: i64,
    pub note: String,
    /// Opaque check-in credential, immutable once issued.
    pub credential: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Board-facing projection of a reservation.
///
/// Carries everything shop-side listings need while leaving out the
/// check-in credential: staff work the board and the door scan, never the
/// raw credential value.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationSummary {
    pub id: DbId,
    pub customer_id: DbId,
    pub shop_id: DbId,
    pub seat_id: DbId,
    pub slot_id: DbId,
    pub kind: String,
    pub reserved_on: NaiveDate,
    pub party_size: i64,
    pub note: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Reservation> for ReservationSummary {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            customer_id: r.customer_id,
            shop_id: r.shop_id,
            seat_id: r.seat_id,
            slot_id: r.slot_id,
            kind: r.kind,
            reserved_on: r.reserved_on,
            party_size: r.party_size,
            note: r.note,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Insert payload for a new `PENDING` reservation. Capacity must already be
/// reserved and the credential minted before this is written.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: DbId,
    pub shop_id: DbId,
    pub seat_id: DbId,
    pub slot_id: DbId,
    pub kind: String,
    pub reserved_on: NaiveDate,
    pub party_size: i64,
    pub note: String,
    pub credential: String,
}

/// Filter/paging parameters for listing a shop's reservations.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationListQuery {
    pub status: Option<String>,
    pub date: Option<NaiveDate>,
    /// 1-based page number.
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// One of `date_asc`, `date_desc`, `created_asc`, `created_desc`.
    pub sort: Option<String>,
}
