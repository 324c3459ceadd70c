//! Request-level slot computation.
//!
//! Validation runs in a fixed order and the first failure wins: request
//! parameters, service, advance-booking window, staff, weekday schedule, then
//! slot generation. A closed day, an unavailable staff member or a window too
//! short for the service are successful results with no slots and a reason.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{cutoff_minutes, day_bounds, instant_at, local_date};
use crate::conflict::{blocked_ranges, Buffers};
use crate::error::{PolicyViolation, RecordKind, Result, SlotError};
use crate::model::{Booking, BusinessSchedule, Service, Slot, StaffMember, Weekday};
use crate::schedule::{
    ensure_staff_eligible, resolve_business_day, resolve_staff_day, StaffResolution,
};
use crate::slots::{generate_slots, SlotGrid};
use crate::source::SchedulingSource;
use crate::window::{validate_booking_window, BookingWindow};

/// Caller request, as received at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    /// Civil date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default, alias = "teamMemberId")]
    pub staff_id: Option<String>,
}

impl SlotRequest {
    pub fn new(date: &str, service_id: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            service_id: Some(service_id.to_string()),
            staff_id: None,
        }
    }

    pub fn with_staff(mut self, staff_id: &str) -> Self {
        self.staff_id = Some(staff_id.to_string());
        self
    }

    /// Check the required parameters and parse the date.
    pub fn parse(&self) -> Result<ParsedRequest> {
        let date = non_blank(self.date.as_deref()).ok_or_else(|| {
            SlotError::Validation("Missing required parameter: date (YYYY-MM-DD format)".into())
        })?;
        let service_id = non_blank(self.service_id.as_deref()).ok_or_else(|| {
            SlotError::Validation("Missing required parameter: serviceId".into())
        })?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| SlotError::Validation("Invalid date format. Use YYYY-MM-DD".into()))?;

        Ok(ParsedRequest {
            date,
            service_id: service_id.to_string(),
            staff_id: non_blank(self.staff_id.as_deref()).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A request whose parameters passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub date: NaiveDate,
    pub service_id: String,
    pub staff_id: Option<String>,
}

/// Records fetched for one request. `None` means the identifier did not resolve.
#[derive(Debug, Clone)]
pub struct FetchedInputs {
    pub service: Option<Service>,
    pub staff: Option<StaffMember>,
    pub schedule: BusinessSchedule,
    pub bookings: Vec<Booking>,
}

/// Why a successful response carries no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyReason {
    Closed,
    StaffUnavailable,
    WindowTooShort,
}

impl EmptyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyReason::Closed => "closed",
            EmptyReason::StaffUnavailable => "staff-unavailable",
            EmptyReason::WindowTooShort => "window-too-short",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub date: NaiveDate,
    pub service_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<EmptyReason>,
}

impl SlotResponse {
    fn empty(request: &ParsedRequest, reason: EmptyReason) -> Self {
        tracing::debug!(date = %request.date, reason = reason.as_str(), "no slots");
        Self {
            date: request.date,
            service_id: request.service_id.clone(),
            staff_id: request.staff_id.clone(),
            slots: Vec::new(),
            reason: Some(reason),
        }
    }

    pub fn available(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.available)
    }
}

/// Fetch every input for `request` from `source`, then compute the slots.
///
/// Collaborator failures are logged here and surface as `SlotError::Source`.
pub fn available_slots<S: SchedulingSource + ?Sized>(
    source: &S,
    request: &SlotRequest,
    now: DateTime<Utc>,
) -> Result<SlotResponse> {
    let parsed = request.parse()?;

    let fetched = fetch_inputs(source, &parsed).inspect_err(|e| {
        tracing::error!(error = %e, service_id = %parsed.service_id, "failed to fetch slot inputs");
    })?;

    compute_slots(&parsed, &fetched, now).inspect_err(|e| match e {
        SlotError::Config(_) => tracing::warn!(error = %e, "business configuration fault"),
        other => tracing::debug!(error = %other, "slot request refused"),
    })
}

fn fetch_inputs<S: SchedulingSource + ?Sized>(
    source: &S,
    request: &ParsedRequest,
) -> Result<FetchedInputs> {
    let schedule = source.business_schedule()?;
    let service = source.service(&request.service_id)?;
    let staff = match &request.staff_id {
        Some(id) => source.staff(id)?,
        None => None,
    };
    // An unusable timezone is reported by `compute_slots` at its place in the order.
    let bookings = match schedule.tz() {
        Ok(tz) => source.bookings(day_bounds(request.date, tz), request.staff_id.as_deref())?,
        Err(_) => Vec::new(),
    };

    Ok(FetchedInputs {
        service,
        staff,
        schedule,
        bookings,
    })
}

/// Compute the slot grid for an already-fetched set of inputs.
///
/// Pure: identical arguments, including `now`, give identical results.
pub fn compute_slots(
    request: &ParsedRequest,
    inputs: &FetchedInputs,
    now: DateTime<Utc>,
) -> Result<SlotResponse> {
    let service = inputs.service.as_ref().ok_or_else(|| SlotError::NotFound {
        kind: RecordKind::Service,
        id: request.service_id.clone(),
    })?;
    if !service.is_active {
        return Err(PolicyViolation::InactiveService.into());
    }

    let schedule = &inputs.schedule;
    let tz = schedule.tz()?;
    let window = BookingWindow::for_service(service, schedule);
    validate_booking_window(request.date, now, &window, tz)?;

    if let Some(staff_id) = &request.staff_id {
        let staff = inputs.staff.as_ref().ok_or_else(|| SlotError::NotFound {
            kind: RecordKind::Staff,
            id: staff_id.clone(),
        })?;
        ensure_staff_eligible(staff, &request.service_id)?;
    }

    schedule.validate()?;
    let weekday = Weekday::of(request.date);
    let business = resolve_business_day(weekday, schedule)?;
    if !business.is_open {
        return Ok(SlotResponse::empty(request, EmptyReason::Closed));
    }

    let effective = match (&request.staff_id, &inputs.staff) {
        (Some(_), Some(staff)) => {
            match resolve_staff_day(weekday, &staff.availability, &business.window())? {
                StaffResolution::Unavailable => {
                    return Ok(SlotResponse::empty(request, EmptyReason::StaffUnavailable));
                }
                StaffResolution::Window(window) => window,
            }
        }
        _ => business.window(),
    };
    tracing::debug!(
        %weekday,
        hours = %effective.hours,
        break_range = ?effective.break_range,
        "resolved effective window"
    );

    let blocked = blocked_ranges(
        &inputs.bookings,
        request.date,
        tz,
        Buffers::from(service),
        request.staff_id.as_deref(),
    );
    let now_cutoff =
        (local_date(now, tz) == request.date).then(|| cutoff_minutes(now, request.date, tz));

    let grid = SlotGrid {
        window: effective.hours,
        break_range: effective.break_range,
        blocked: &blocked,
        cadence: schedule.slot_cadence,
        total_slot_minutes: service.total_slot_minutes(),
        now_cutoff,
    };
    if !grid.fits() {
        return Ok(SlotResponse::empty(request, EmptyReason::WindowTooShort));
    }

    let slots = generate_slots(&grid)
        .into_iter()
        .map(|candidate| Slot {
            start: instant_at(request.date, candidate.range.start, tz),
            end: instant_at(request.date, candidate.range.end, tz),
            available: candidate.available,
        })
        .collect();

    Ok(SlotResponse {
        date: request.date,
        service_id: request.service_id.clone(),
        staff_id: request.staff_id.clone(),
        slots,
        reason: None,
    })
}
