//! Turn committed bookings into blocked minute ranges for one day.
//!
//! Each booking blocks `[start - bufferBefore, end + bufferAfter)` in minutes from
//! local midnight of the requested date. Cancelled bookings block nothing.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::clock::minutes_into_day;
use crate::interval::MinuteRange;
use crate::model::{Booking, Service};

/// Padding applied around every existing booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buffers {
    pub before: u32,
    pub after: u32,
}

impl From<&Service> for Buffers {
    fn from(service: &Service) -> Self {
        Self {
            before: service.buffer_before,
            after: service.buffer_after,
        }
    }
}

/// Compute the blocked ranges for `bookings` on `date`.
///
/// When `staff_id` is given, only bookings assigned to that staff member count.
/// The ranges come back in input order and may overlap each other.
pub fn blocked_ranges(
    bookings: &[Booking],
    date: NaiveDate,
    tz: Tz,
    buffers: Buffers,
    staff_id: Option<&str>,
) -> Vec<MinuteRange> {
    bookings
        .iter()
        .filter(|b| !b.is_cancelled())
        .filter(|b| staff_id.is_none_or(|id| b.staff_id.as_deref() == Some(id)))
        .map(|b| {
            let start = minutes_into_day(b.start, date, tz);
            let end = minutes_into_day(b.end_or_default(), date, tz);
            MinuteRange::new(
                start - i64::from(buffers.before),
                end + i64::from(buffers.after),
            )
        })
        .collect()
}
