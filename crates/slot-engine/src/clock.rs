//! Conversions between instants and business-local minutes-of-day.
//!
//! The engine reasons about one civil date in one configured timezone. These are
//! the only places where an instant meets that civil calendar.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use crate::interval::Minutes;
use crate::source::DayBounds;

/// Upper bound on how far a DST gap can push a local time forward.
const MAX_GAP_MINUTES: i64 = 3 * 60;

fn local_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The business-local wall-clock reading of `instant`.
pub fn local_datetime(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

/// The business-local civil date of `instant`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    local_datetime(instant, tz).date()
}

/// Minutes from local midnight of `date` to `instant`.
///
/// Negative for instants on an earlier local day, above 1440 for later ones.
pub fn minutes_into_day(instant: DateTime<Utc>, date: NaiveDate, tz: Tz) -> Minutes {
    (local_datetime(instant, tz) - local_midnight(date)).num_minutes()
}

/// Minutes from local midnight of `date` to `instant`, rounding partial minutes up.
///
/// A slot starting at this minute or later has not begun yet at `instant`.
pub fn cutoff_minutes(instant: DateTime<Utc>, date: NaiveDate, tz: Tz) -> Minutes {
    let seconds = (local_datetime(instant, tz) - local_midnight(date)).num_seconds();
    seconds.div_euclid(60) + Minutes::from(seconds.rem_euclid(60) > 0)
}

/// The UTC instants at which local `date` begins and the following day begins.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> DayBounds {
    DayBounds {
        start: instant_at(date, 0, tz).with_timezone(&Utc),
        end: instant_at(date + Duration::days(1), 0, tz).with_timezone(&Utc),
    }
}

/// The instant at `minutes` past local midnight of `date`.
///
/// An ambiguous local time (clocks going back) resolves to the earlier instant.
/// A local time inside a DST gap is shifted forward to the first valid minute.
pub fn instant_at(date: NaiveDate, minutes: Minutes, tz: Tz) -> DateTime<FixedOffset> {
    let naive = local_midnight(date) + Duration::minutes(minutes);

    let resolve = |n: NaiveDateTime| match tz.from_local_datetime(&n) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    };

    resolve(naive)
        .or_else(|| (1..=MAX_GAP_MINUTES).find_map(|shift| resolve(naive + Duration::minutes(shift))))
        .map(|dt| dt.fixed_offset())
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive).fixed_offset())
}
