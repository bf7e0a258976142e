//! Lifecycle notification dispatch.
//!
//! The orchestrator returns a list of [`NotificationIntent`]s alongside the
//! updated reservation; handlers hand them to [`dispatch`] on a spawned task
//! after responding. Delivery is strictly best-effort: a failed insert is
//! logged and dropped, never surfaced to the caller, and never rolls back
//! the state change it describes.

use seatwise_core::types::DbId;
use seatwise_db::models::notification::REFERENCE_RESERVATION;
use seatwise_db::repositories::NotificationRepo;
use seatwise_db::DbPool;

/// A notification the engine wants delivered for a lifecycle event.
#[derive(Debug, Clone)]
pub struct NotificationIntent {
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub reservation_id: DbId,
}

impl NotificationIntent {
    pub fn new(
        user_id: DbId,
        title: impl Into<String>,
        body: impl Into<String>,
        reservation_id: DbId,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            body: body.into(),
            reservation_id,
        }
    }
}

/// Write notification rows for each intent, logging (not propagating)
/// failures.
pub async fn dispatch(pool: DbPool, intents: Vec<NotificationIntent>) {
    for intent in intents {
        if let Err(e) = NotificationRepo::create(
            &pool,
            intent.user_id,
            &intent.title,
            &intent.body,
            REFERENCE_RESERVATION,
            intent.reservation_id,
        )
        .await
        {
            tracing::error!(
                user_id = intent.user_id,
                reservation_id = intent.reservation_id,
                error = %e,
                "Failed to deliver notification"
            );
        }
    }
}
