//! Calendar rules for booking and check-in.
//!
//! Shops run on local wall-clock days. Rather than carrying a full tz
//! database, each shop stores a fixed UTC offset in minutes; every date
//! comparison in the engine goes through [`local_date`] so the "current
//! day" is always the shop's, not the server's.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CoreError;
use crate::types::Timestamp;

/// The calendar date at a shop with the given UTC offset, as of `now`.
pub fn local_date(now: Timestamp, utc_offset_minutes: i32) -> NaiveDate {
    (now + Duration::minutes(utc_offset_minutes as i64)).date_naive()
}

/// Day-of-week index used by time-slot definitions: 0 = Monday .. 6 = Sunday.
pub fn day_of_week(date: NaiveDate) -> i64 {
    date.weekday().num_days_from_monday() as i64
}

/// A reservation date must fall on the slot's recurring weekday.
pub fn validate_slot_weekday(date: NaiveDate, slot_day_of_week: i64) -> Result<(), CoreError> {
    if day_of_week(date) == slot_day_of_week {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Reservation date {date} falls on weekday {}, but the slot runs on weekday {slot_day_of_week}",
            day_of_week(date)
        )))
    }
}

/// A reservation cannot be created for a date already past at the shop.
pub fn validate_not_past(
    date: NaiveDate,
    now: Timestamp,
    utc_offset_minutes: i32,
) -> Result<(), CoreError> {
    if date < local_date(now, utc_offset_minutes) {
        Err(CoreError::Validation(format!(
            "Reservation date {date} is in the past"
        )))
    } else {
        Ok(())
    }
}

/// Check-in is only allowed during the reservation's calendar day, in the
/// shop's local time (inclusive start-of-day to end-of-day).
pub fn validate_check_in_window(
    reservation_date: NaiveDate,
    now: Timestamp,
    utc_offset_minutes: i32,
) -> Result<(), CoreError> {
    let today = local_date(now, utc_offset_minutes);
    if today == reservation_date {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Check-in is only allowed on the reservation date {reservation_date} (shop-local today is {today})"
        )))
    }
}
