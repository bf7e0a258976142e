//! Reservation status and kind constants plus the lifecycle state machine.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker or CLI tooling.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status. Holds capacity until confirmed or cancelled.
pub const STATUS_PENDING: &str = "PENDING";

/// Accepted by the shop. Still holds capacity.
pub const STATUS_CONFIRMED: &str = "CONFIRMED";

/// Customer arrived and presented a valid credential. Still holds capacity.
pub const STATUS_CHECKED_IN: &str = "CHECKED_IN";

/// Terminal. The visit happened, so its capacity for that slot-date stays
/// consumed.
pub const STATUS_COMPLETED: &str = "COMPLETED";

/// Terminal. The only status reached by releasing capacity.
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// All statuses that count against a slot's occupancy ceiling.
pub const CAPACITY_CONSUMING_STATUSES: &[&str] =
    &[STATUS_PENDING, STATUS_CONFIRMED, STATUS_CHECKED_IN];

// ---------------------------------------------------------------------------
// Kind constants
// ---------------------------------------------------------------------------

/// A regular booking, counted against `max_regular`.
pub const KIND_STANDARD: &str = "STANDARD";

/// A premium booking, counted against `max_premium`.
pub const KIND_PRIORITY: &str = "PRIORITY";

/// All valid reservation kinds.
pub const VALID_KINDS: &[&str] = &[KIND_STANDARD, KIND_PRIORITY];

/// Validate that a kind string is one of the accepted values.
pub fn validate_kind(kind: &str) -> Result<(), CoreError> {
    if VALID_KINDS.contains(&kind) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid reservation kind '{kind}'. Must be one of: {}",
            VALID_KINDS.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of valid target statuses reachable from `from`.
///
/// Terminal statuses (`COMPLETED`, `CANCELLED`) return an empty slice
/// because no further transitions are allowed.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_PENDING => &[STATUS_CONFIRMED, STATUS_CANCELLED],
        STATUS_CONFIRMED => &[STATUS_CHECKED_IN, STATUS_CANCELLED],
        STATUS_CHECKED_IN => &[STATUS_COMPLETED],
        // Terminal statuses
        STATUS_COMPLETED | STATUS_CANCELLED => &[],
        // Unknown status: no transitions allowed
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a status transition, returning a typed error for invalid ones.
pub fn validate_transition(from: &str, to: &'static str) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            from: canonical_status(from),
            to,
        })
    }
}

/// Whether a reservation in `status` still counts against its slot's
/// occupancy ceiling.
pub fn is_capacity_consuming(status: &str) -> bool {
    CAPACITY_CONSUMING_STATUSES.contains(&status)
}

/// Map an arbitrary status string onto its static canonical form (for error
/// payloads that require `'static` strings).
fn canonical_status(status: &str) -> &'static str {
    match status {
        STATUS_PENDING => STATUS_PENDING,
        STATUS_CONFIRMED => STATUS_CONFIRMED,
        STATUS_CHECKED_IN => STATUS_CHECKED_IN,
        STATUS_COMPLETED => STATUS_COMPLETED,
        STATUS_CANCELLED => STATUS_CANCELLED,
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_confirmed() {
        assert!(can_transition(STATUS_PENDING, STATUS_CONFIRMED));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(STATUS_PENDING, STATUS_CANCELLED));
    }

    #[test]
    fn confirmed_to_checked_in() {
        assert!(can_transition(STATUS_CONFIRMED, STATUS_CHECKED_IN));
    }

    #[test]
    fn confirmed_to_cancelled() {
        assert!(can_transition(STATUS_CONFIRMED, STATUS_CANCELLED));
    }

    #[test]
    fn checked_in_to_completed() {
        assert!(can_transition(STATUS_CHECKED_IN, STATUS_COMPLETED));
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_checked_in_invalid() {
        assert!(!can_transition(STATUS_PENDING, STATUS_CHECKED_IN));
    }

    #[test]
    fn pending_to_completed_invalid() {
        assert!(!can_transition(STATUS_PENDING, STATUS_COMPLETED));
    }

    #[test]
    fn checked_in_to_cancelled_invalid() {
        assert!(!can_transition(STATUS_CHECKED_IN, STATUS_CANCELLED));
    }

    #[test]
    fn confirmed_to_completed_invalid() {
        assert!(!can_transition(STATUS_CONFIRMED, STATUS_COMPLETED));
    }

    // -----------------------------------------------------------------------
    // Terminal statuses have no outgoing transitions
    // -----------------------------------------------------------------------

    #[test]
    fn completed_has_no_transitions() {
        assert!(valid_transitions(STATUS_COMPLETED).is_empty());
    }

    #[test]
    fn cancelled_has_no_transitions() {
        assert!(valid_transitions(STATUS_CANCELLED).is_empty());
    }

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions("SOMETHING_ELSE").is_empty());
    }

    // -----------------------------------------------------------------------
    // validate_transition returns a typed error
    // -----------------------------------------------------------------------

    #[test]
    fn validate_transition_ok() {
        assert!(validate_transition(STATUS_PENDING, STATUS_CONFIRMED).is_ok());
    }

    #[test]
    fn validate_transition_err_names_both_statuses() {
        let err = validate_transition(STATUS_COMPLETED, STATUS_CANCELLED).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("COMPLETED"));
        assert!(msg.contains("CANCELLED"));
    }

    // -----------------------------------------------------------------------
    // Capacity accounting
    // -----------------------------------------------------------------------

    #[test]
    fn pending_confirmed_checked_in_consume_capacity() {
        assert!(is_capacity_consuming(STATUS_PENDING));
        assert!(is_capacity_consuming(STATUS_CONFIRMED));
        assert!(is_capacity_consuming(STATUS_CHECKED_IN));
    }

    #[test]
    fn completed_does_not_consume_capacity() {
        // The visit happened, but the occupancy row is never decremented on
        // completion; only cancellation releases a unit.
        assert!(!is_capacity_consuming(STATUS_COMPLETED));
    }

    #[test]
    fn cancelled_does_not_consume_capacity() {
        assert!(!is_capacity_consuming(STATUS_CANCELLED));
    }

    // -----------------------------------------------------------------------
    // Kinds
    // -----------------------------------------------------------------------

    #[test]
    fn valid_kinds_accepted() {
        assert!(validate_kind(KIND_STANDARD).is_ok());
        assert!(validate_kind(KIND_PRIORITY).is_ok());
    }

    #[test]
    fn invalid_kind_rejected() {
        let err = validate_kind("VIP").unwrap_err();
        assert!(err.to_string().contains("Invalid reservation kind"));
    }
}
