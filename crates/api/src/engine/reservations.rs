//! Reservation lifecycle orchestrator.
//!
//! Every operation follows the same shape: load the rows involved, run the
//! policy check, validate the transition and calendar rules in core, then
//! perform the state change through a conditional repository write. The
//! conditional writes mean a raced operation loses cleanly with a conflict
//! instead of corrupting the occupancy counters or the points ledger.
//!
//! Capacity accounting rules enforced here:
//! - a unit is taken before the reservation row is inserted, and given back
//!   if that insert fails;
//! - cancellation releases exactly one unit;
//! - completion never releases: the visit consumed its slot-date capacity.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use seatwise_core::credential;
use seatwise_core::error::CoreError;
use seatwise_core::points::points_for_party;
use seatwise_core::policy::{authorize, Actor, Operation, ResourceContext};
use seatwise_core::reservation::{
    self, validate_kind, KIND_PRIORITY, KIND_STANDARD, STATUS_CANCELLED, STATUS_CHECKED_IN,
    STATUS_COMPLETED, STATUS_CONFIRMED, STATUS_PENDING,
};
use seatwise_core::schedule;
use seatwise_core::types::DbId;
use seatwise_db::models::occupancy::SlotKey;
use seatwise_db::models::reservation::{
    NewReservation, Reservation, ReservationListQuery, ReservationSummary,
};
use seatwise_db::models::shop::Shop;
use seatwise_db::repositories::reservation_repo::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use seatwise_db::repositories::{
    OccupancyRepo, ReservationRepo, SeatRepo, ShopRepo, TimeSlotRepo,
};
use seatwise_db::DbPool;

use crate::engine::notify::NotificationIntent;
use crate::error::AppResult;

/// Request payload for creating a reservation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservation {
    pub shop_id: DbId,
    pub seat_id: DbId,
    pub slot_id: DbId,
    /// `STANDARD` or `PRIORITY`.
    pub kind: String,
    /// Target calendar date in the shop's local time.
    pub reserved_on: NaiveDate,
    #[validate(range(min = 1, max = 100))]
    pub party_size: i64,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub note: String,
}

/// The result of a lifecycle operation: the reservation as stored, plus
/// the notifications to deliver once the response is on its way.
#[derive(Debug)]
pub struct ReservationOutcome {
    pub reservation: Reservation,
    pub intents: Vec<NotificationIntent>,
}

/// One page of a shop's reservation listing. Rows are board projections;
/// the credential never appears in shop-side listings.
#[derive(Debug)]
pub struct ReservationPage {
    pub rows: Vec<ReservationSummary>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// Create a new `PENDING` reservation, reserving one unit of slot capacity.
pub async fn create(
    pool: &DbPool,
    actor: &Actor,
    input: CreateReservation,
) -> AppResult<ReservationOutcome> {
    authorize(Operation::Create, actor, &ResourceContext::default())?;
    validate_kind(&input.kind)?;

    let shop = load_shop(pool, input.shop_id).await?;
    if !shop.is_active() {
        return Err(CoreError::Validation("Shop is not accepting reservations".into()).into());
    }

    let seat = SeatRepo::get(pool, input.seat_id)
        .await?
        .filter(|s| s.shop_id == shop.id)
        .ok_or_else(|| CoreError::not_found("seat", input.seat_id))?;
    if !seat.is_available {
        return Err(CoreError::Validation(format!(
            "Seat '{}' is not available for booking",
            seat.name
        ))
        .into());
    }
    if input.party_size > seat.capacity {
        return Err(CoreError::Validation(format!(
            "Party of {} exceeds seat capacity of {}",
            input.party_size, seat.capacity
        ))
        .into());
    }

    let slot = TimeSlotRepo::get(pool, input.slot_id)
        .await?
        .filter(|s| s.shop_id == shop.id)
        .ok_or_else(|| CoreError::not_found("time slot", input.slot_id))?;

    schedule::validate_not_past(input.reserved_on, Utc::now(), shop.utc_offset_minutes)?;
    schedule::validate_slot_weekday(input.reserved_on, slot.day_of_week)?;

    // One live booking per (customer, seat, slot, date). A duplicate would
    // mint the same credential, making the scan lookup ambiguous.
    if ReservationRepo::has_live_for_identity(
        pool,
        actor.user_id,
        seat.id,
        slot.id,
        input.reserved_on,
    )
    .await?
    {
        return Err(CoreError::Conflict(
            "You already hold a live reservation for this seat and time slot".into(),
        )
        .into());
    }

    // Take the capacity unit first; the single-statement guarded increment
    // is what makes concurrent creates against a nearly-full slot safe.
    let key = SlotKey {
        shop_id: shop.id,
        slot_id: slot.id,
        reserved_on: input.reserved_on,
        kind: input.kind.clone(),
    };
    let granted = OccupancyRepo::reserve(pool, &key, slot.ceiling_for(&input.kind)).await?;
    if !granted {
        return Err(CoreError::CapacityExceeded {
            kind: kind_const(&input.kind),
        }
        .into());
    }

    let new = NewReservation {
        customer_id: actor.user_id,
        shop_id: shop.id,
        seat_id: seat.id,
        slot_id: slot.id,
        kind: input.kind,
        reserved_on: input.reserved_on,
        party_size: input.party_size,
        note: input.note,
        credential: credential::issue(
            shop.id,
            seat.id,
            slot.id,
            input.reserved_on,
            actor.user_id,
        ),
    };

    let reservation = match ReservationRepo::create(pool, &new).await {
        Ok(r) => r,
        Err(e) => {
            // The unit is already held; give it back before reporting.
            if let Err(release_err) = OccupancyRepo::release(pool, &key).await {
                tracing::error!(
                    error = %release_err,
                    slot_id = key.slot_id,
                    "Failed to release capacity after create failure"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        reservation_id = reservation.id,
        shop_id = shop.id,
        slot_id = slot.id,
        kind = %reservation.kind,
        "Reservation created"
    );

    let intents = vec![
        NotificationIntent::new(
            reservation.customer_id,
            "Reservation received",
            format!(
                "Your reservation at {} for {} is awaiting confirmation",
                shop.name, reservation.reserved_on
            ),
            reservation.id,
        ),
        NotificationIntent::new(
            shop.owner_id,
            "New reservation request",
            format!(
                "A party of {} requested {} on {}",
                reservation.party_size, seat.name, reservation.reserved_on
            ),
            reservation.id,
        ),
    ];

    Ok(ReservationOutcome {
        reservation,
        intents,
    })
}

/// Confirm a `PENDING` reservation (shop owner or admin).
pub async fn confirm(pool: &DbPool, actor: &Actor, id: DbId) -> AppResult<ReservationOutcome> {
    let found = load_reservation(pool, id).await?;
    let shop = load_shop(pool, found.shop_id).await?;
    authorize(Operation::Confirm, actor, &owned_ctx(&found, &shop))?;
    reservation::validate_transition(&found.status, STATUS_CONFIRMED)?;

    let reservation = ReservationRepo::set_status(pool, id, STATUS_PENDING, STATUS_CONFIRMED)
        .await?
        .ok_or_else(raced)?;

    tracing::info!(reservation_id = reservation.id, "Reservation confirmed");

    let intents = vec![NotificationIntent::new(
        reservation.customer_id,
        "Reservation confirmed",
        format!(
            "{} confirmed your reservation for {}",
            shop.name, reservation.reserved_on
        ),
        reservation.id,
    )];

    Ok(ReservationOutcome {
        reservation,
        intents,
    })
}

/// Cancel a `PENDING` or `CONFIRMED` reservation and release its capacity
/// unit.
pub async fn cancel(pool: &DbPool, actor: &Actor, id: DbId) -> AppResult<ReservationOutcome> {
    let found = load_reservation(pool, id).await?;
    let shop = load_shop(pool, found.shop_id).await?;
    authorize(Operation::Cancel, actor, &owned_ctx(&found, &shop))?;
    reservation::validate_transition(&found.status, STATUS_CANCELLED)?;

    // The status flip and the capacity release commit together; a raced
    // cancel loses without touching the counter.
    let reservation = ReservationRepo::cancel(pool, id, &found.status, &slot_key(&found))
        .await?
        .ok_or_else(raced)?;

    tracing::info!(
        reservation_id = reservation.id,
        cancelled_by = actor.user_id,
        "Reservation cancelled"
    );

    let mut intents = vec![NotificationIntent::new(
        reservation.customer_id,
        "Reservation cancelled",
        format!(
            "Your reservation at {} for {} was cancelled",
            shop.name, reservation.reserved_on
        ),
        reservation.id,
    )];
    if actor.user_id == reservation.customer_id {
        intents.push(NotificationIntent::new(
            shop.owner_id,
            "Reservation cancelled",
            format!(
                "A reservation for {} was cancelled by the customer",
                reservation.reserved_on
            ),
            reservation.id,
        ));
    }

    Ok(ReservationOutcome {
        reservation,
        intents,
    })
}

/// Customer self check-in: presents their credential against their own
/// `CONFIRMED` reservation on its calendar day.
pub async fn check_in(
    pool: &DbPool,
    actor: &Actor,
    id: DbId,
    presented: &str,
) -> AppResult<ReservationOutcome> {
    let found = load_reservation(pool, id).await?;
    let shop = load_shop(pool, found.shop_id).await?;
    authorize(Operation::CheckInSelf, actor, &owned_ctx(&found, &shop))?;

    validate_check_in(&found, &shop)?;
    if !credential::verify(&found.credential, presented) {
        return Err(
            CoreError::Validation("Credential does not match this reservation".into()).into(),
        );
    }

    finish_check_in(pool, &shop, found).await
}

/// Staff-side check-in: a scanned credential is resolved to the newest live
/// reservation at the shop, then checked in.
pub async fn check_in_by_credential(
    pool: &DbPool,
    actor: &Actor,
    shop_id: DbId,
    presented: &str,
) -> AppResult<ReservationOutcome> {
    let shop = load_shop(pool, shop_id).await?;
    let is_shop_staff = ShopRepo::is_staff(pool, shop.id, actor.user_id).await?;
    let ctx = ResourceContext {
        reservation_customer_id: None,
        shop_owner_id: Some(shop.owner_id),
        is_shop_staff,
    };
    authorize(Operation::CheckInScan, actor, &ctx)?;

    let found = ReservationRepo::get_by_credential(pool, shop.id, presented)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "reservation",
            key: "presented credential".into(),
        })?;

    validate_check_in(&found, &shop)?;
    finish_check_in(pool, &shop, found).await
}

/// Complete a `CHECKED_IN` reservation. Capacity stays consumed: the visit
/// happened during its slot-date.
pub async fn complete(pool: &DbPool, actor: &Actor, id: DbId) -> AppResult<ReservationOutcome> {
    let found = load_reservation(pool, id).await?;
    let shop = load_shop(pool, found.shop_id).await?;
    authorize(Operation::Complete, actor, &owned_ctx(&found, &shop))?;
    reservation::validate_transition(&found.status, STATUS_COMPLETED)?;

    let reservation = ReservationRepo::set_status(pool, id, STATUS_CHECKED_IN, STATUS_COMPLETED)
        .await?
        .ok_or_else(raced)?;

    tracing::info!(reservation_id = reservation.id, "Reservation completed");

    let intents = vec![NotificationIntent::new(
        reservation.customer_id,
        "Visit complete",
        format!("Thanks for visiting {}. See you next time!", shop.name),
        reservation.id,
    )];

    Ok(ReservationOutcome {
        reservation,
        intents,
    })
}

/// Fetch a single reservation, visible to its customer, the shop owner,
/// and admins.
pub async fn get(pool: &DbPool, actor: &Actor, id: DbId) -> AppResult<Reservation> {
    let found = load_reservation(pool, id).await?;
    let shop = load_shop(pool, found.shop_id).await?;
    authorize(Operation::ViewCredential, actor, &owned_ctx(&found, &shop))?;
    Ok(found)
}

/// Render a reservation's credential as a QR PNG data URL.
pub async fn credential_qr(pool: &DbPool, actor: &Actor, id: DbId) -> AppResult<String> {
    let found = get(pool, actor, id).await?;
    Ok(credential::qr_png_data_url(&found.credential)?)
}

/// List a shop's reservations with filtering, paging, and sorting.
pub async fn list_shop(
    pool: &DbPool,
    actor: &Actor,
    shop_id: DbId,
    query: ReservationListQuery,
) -> AppResult<ReservationPage> {
    let shop = load_shop(pool, shop_id).await?;
    let is_shop_staff = ShopRepo::is_staff(pool, shop.id, actor.user_id).await?;
    let ctx = ResourceContext {
        reservation_customer_id: None,
        shop_owner_id: Some(shop.owner_id),
        is_shop_staff,
    };
    authorize(Operation::ListShop, actor, &ctx)?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let (rows, total) = ReservationRepo::list_for_shop(pool, shop.id, &query).await?;

    Ok(ReservationPage {
        rows: rows.into_iter().map(Into::into).collect(),
        page,
        page_size,
        total,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Shared check-in preconditions, checked in a fixed order so each failure
/// mode surfaces independently: transition validity, shop status, then the
/// calendar window.
fn validate_check_in(found: &Reservation, shop: &Shop) -> Result<(), CoreError> {
    reservation::validate_transition(&found.status, STATUS_CHECKED_IN)?;
    if !shop.is_active() {
        return Err(CoreError::Validation("Shop is not open for check-in".into()));
    }
    schedule::validate_check_in_window(found.reserved_on, Utc::now(), shop.utc_offset_minutes)
}

/// Flip to `CHECKED_IN` and settle the points award in one transaction.
async fn finish_check_in(
    pool: &DbPool,
    shop: &Shop,
    found: Reservation,
) -> AppResult<ReservationOutcome> {
    let points = points_for_party(found.party_size);
    let reservation = ReservationRepo::check_in(pool, found.id, found.customer_id, points)
        .await?
        .ok_or_else(raced)?;

    tracing::info!(
        reservation_id = reservation.id,
        customer_id = reservation.customer_id,
        points,
        "Reservation checked in"
    );

    let intents = vec![
        NotificationIntent::new(
            reservation.customer_id,
            "Checked in",
            format!("Welcome to {}! You earned {points} points.", shop.name),
            reservation.id,
        ),
        NotificationIntent::new(
            shop.owner_id,
            "Party checked in",
            format!(
                "A party of {} checked in for their {} reservation",
                reservation.party_size, reservation.reserved_on
            ),
            reservation.id,
        ),
    ];

    Ok(ReservationOutcome {
        reservation,
        intents,
    })
}

async fn load_reservation(pool: &DbPool, id: DbId) -> AppResult<Reservation> {
    Ok(ReservationRepo::get(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("reservation", id))?)
}

async fn load_shop(pool: &DbPool, id: DbId) -> AppResult<Shop> {
    Ok(ShopRepo::get(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("shop", id))?)
}

/// Policy context for operations targeting an existing reservation. Staff
/// membership is irrelevant to these (staff act through the scan and
/// listing paths), so it is left false.
fn owned_ctx(found: &Reservation, shop: &Shop) -> ResourceContext {
    ResourceContext {
        reservation_customer_id: Some(found.customer_id),
        shop_owner_id: Some(shop.owner_id),
        is_shop_staff: false,
    }
}

fn slot_key(found: &Reservation) -> SlotKey {
    SlotKey {
        shop_id: found.shop_id,
        slot_id: found.slot_id,
        reserved_on: found.reserved_on,
        kind: found.kind.clone(),
    }
}

fn raced() -> crate::error::AppError {
    CoreError::Conflict("Reservation changed state concurrently".into()).into()
}

/// Map a validated kind string onto its static constant for error payloads.
fn kind_const(kind: &str) -> &'static str {
    if kind == KIND_PRIORITY {
        KIND_PRIORITY
    } else {
        KIND_STANDARD
    }
}
