//! Loyalty points computation.
//!
//! Points are settled exactly once per reservation when it reaches
//! `CHECKED_IN`; the ledger itself (append-only, unique per reservation)
//! lives in the repository layer.

/// Points awarded per covered guest at check-in.
pub const POINTS_PER_PERSON: i64 = 10;

/// Points earned by a party of `party_size` guests.
pub fn points_for_party(party_size: i64) -> i64 {
    party_size * POINTS_PER_PERSON
}
