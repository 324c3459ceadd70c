//! Advance-booking policy.
//!
//! A date may be requested when it falls between the local date of
//! `now + minAdvanceBookingHours` and the local date of `now + maxAdvanceBookingDays`,
//! both inclusive.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::clock::local_date;
use crate::error::{PolicyViolation, Result};
use crate::model::{BusinessSchedule, Service};

/// Advance-booking bounds relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub min_advance_hours: u32,
    pub max_advance_days: u32,
}

impl BookingWindow {
    /// Service overrides take precedence over the business defaults.
    pub fn for_service(service: &Service, schedule: &BusinessSchedule) -> Self {
        Self {
            min_advance_hours: service
                .min_advance_booking
                .unwrap_or(schedule.min_advance_booking_hours),
            max_advance_days: service
                .max_advance_booking
                .unwrap_or(schedule.max_advance_booking_days),
        }
    }

    /// `None` when the notice reaches past the representable calendar.
    pub fn earliest(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        shift(now, TimeDelta::try_hours(i64::from(self.min_advance_hours)))
    }

    /// `None` when the horizon reaches past the representable calendar.
    pub fn latest(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        shift(now, TimeDelta::try_days(i64::from(self.max_advance_days)))
    }
}

fn shift(now: DateTime<Utc>, delta: Option<TimeDelta>) -> Option<DateTime<Utc>> {
    let shifted = now.checked_add_signed(delta?)?;
    // Local-date conversion moves the instant by up to a day.
    shifted.checked_add_signed(TimeDelta::days(1))?;
    Some(shifted)
}

/// Reject `date` when it lies outside the advance-booking window.
///
/// # Errors
/// `PolicyViolation::TooSoon` before the earliest bookable date,
/// `PolicyViolation::TooLate` after the latest. A notice too large to represent
/// refuses every date; a horizon too large to represent has no upper bound.
pub fn validate_booking_window(
    date: NaiveDate,
    now: DateTime<Utc>,
    window: &BookingWindow,
    tz: Tz,
) -> Result<()> {
    let too_soon = match window.earliest(now) {
        Some(earliest) => date < local_date(earliest, tz),
        None => true,
    };
    if too_soon {
        return Err(PolicyViolation::TooSoon {
            min_hours: window.min_advance_hours,
        }
        .into());
    }

    let too_late = window
        .latest(now)
        .is_some_and(|latest| date > local_date(latest, tz));
    if too_late {
        return Err(PolicyViolation::TooLate {
            max_days: window.max_advance_days,
        }
        .into());
    }

    Ok(())
}
