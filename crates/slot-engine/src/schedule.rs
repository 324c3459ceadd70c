//! Business and staff weekday resolution.
//!
//! Turns the `"HH:MM"` weekday entries of the business configuration and a staff
//! member's availability into a single effective working window plus at most one
//! break, all as integer minutes-of-day.

use crate::error::{PolicyViolation, Result, SlotError};
use crate::interval::{parse_hhmm, MinuteRange};
use crate::model::{BusinessSchedule, StaffDay, StaffMember, Weekday};

/// Working hours for one day with an optional break inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveWindow {
    pub hours: MinuteRange,
    pub break_range: Option<MinuteRange>,
}

/// The business side of a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessDayHours {
    pub is_open: bool,
    pub hours: MinuteRange,
    pub break_range: Option<MinuteRange>,
}

impl BusinessDayHours {
    pub fn window(&self) -> EffectiveWindow {
        EffectiveWindow {
            hours: self.hours,
            break_range: self.break_range,
        }
    }
}

/// Outcome of applying a staff member's weekday pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffResolution {
    /// The staff member does not work this weekday.
    Unavailable,
    Window(EffectiveWindow),
}

/// Parse an optional break. A break is only in force when both ends are set.
fn parse_break(start: Option<&str>, end: Option<&str>) -> Result<Option<MinuteRange>> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };
    let range = MinuteRange::new(parse_hhmm(start)?, parse_hhmm(end)?);
    if range.is_empty() {
        return Err(SlotError::Config(format!(
            "break {}-{} ends before it starts",
            start, end
        )));
    }
    Ok(Some(range))
}

/// Resolve the business opening hours and break for `weekday`.
///
/// # Errors
/// `SlotError::Config` if the schedule has no entry for the weekday or an entry
/// holds an unparseable time.
pub fn resolve_business_day(
    weekday: Weekday,
    schedule: &BusinessSchedule,
) -> Result<BusinessDayHours> {
    let day = schedule.day(weekday).ok_or_else(|| {
        SlotError::Config(format!("business schedule has no entry for {}", weekday))
    })?;

    Ok(BusinessDayHours {
        is_open: day.is_open,
        hours: MinuteRange::parse(&day.open_time, &day.close_time)?,
        break_range: parse_break(day.break_start.as_deref(), day.break_end.as_deref())?,
    })
}

/// Combine the business and staff breaks into the interval enclosing both.
///
/// When only one side defines a break, that break is used unchanged.
pub fn merge_breaks(
    business: Option<MinuteRange>,
    staff: Option<MinuteRange>,
) -> Option<MinuteRange> {
    match (business, staff) {
        (Some(b), Some(s)) => Some(b.enclose(&s)),
        (one, None) | (None, one) => one,
    }
}

/// Narrow the business window by the staff member's pattern for `weekday`.
///
/// The effective hours are `[max(opens), min(closes))`; the result may be empty
/// when the two windows do not meet. A weekday missing from `availability`
/// leaves the business window as it is.
pub fn resolve_staff_day(
    weekday: Weekday,
    availability: &[StaffDay],
    business: &EffectiveWindow,
) -> Result<StaffResolution> {
    let Some(day) = availability.iter().find(|d| d.day == weekday) else {
        tracing::debug!(%weekday, "no staff entry for weekday, using business hours");
        return Ok(StaffResolution::Window(*business));
    };
    if !day.is_available {
        return Ok(StaffResolution::Unavailable);
    }

    let staff_hours = MinuteRange::parse(&day.start_time, &day.end_time)?;
    let staff_break = parse_break(day.break_start.as_deref(), day.break_end.as_deref())?;

    let hours = MinuteRange::new(
        business.hours.start.max(staff_hours.start),
        business.hours.end.min(staff_hours.end),
    );

    Ok(StaffResolution::Window(EffectiveWindow {
        hours,
        break_range: merge_breaks(business.break_range, staff_break),
    }))
}

/// Check that `staff` accepts bookings for `service_id`.
pub fn ensure_staff_eligible(staff: &StaffMember, service_id: &str) -> Result<()> {
    if !staff.taking_appointments {
        return Err(PolicyViolation::StaffNotTakingAppointments.into());
    }
    if !staff.provides(service_id) {
        return Err(PolicyViolation::StaffDoesNotProvideService.into());
    }
    Ok(())
}
