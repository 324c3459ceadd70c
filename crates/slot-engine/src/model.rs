//! Records the engine reads, and the slots it produces.
//!
//! Field names serialize in camelCase so the records can be loaded straight from
//! the settings and collection documents of the host application.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{parse_hhmm, MinuteRange};

/// Length assumed for a booking stored without an end instant.
pub const DEFAULT_BOOKING_MINUTES: i64 = 30;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Day of the week, serialized as its lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The weekday a civil date falls on.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        f.write_str(name)
    }
}

fn default_true() -> bool {
    true
}

fn default_open() -> String {
    "09:00".to_string()
}

fn default_close() -> String {
    "17:00".to_string()
}

fn default_duration() -> u32 {
    30
}

fn default_cadence() -> u32 {
    30
}

fn default_max_days() -> u32 {
    30
}

fn default_min_hours() -> u32 {
    1
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Appointment length in minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub buffer_before: u32,
    #[serde(default)]
    pub buffer_after: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Minimum notice in hours; overrides the business default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_advance_booking: Option<u32>,
    /// Maximum lead time in days; overrides the business default when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_advance_booking: Option<u32>,
}

impl Service {
    /// Minutes a single appointment of this service occupies, buffers included.
    pub fn total_slot_minutes(&self) -> i64 {
        i64::from(self.duration) + i64::from(self.buffer_before) + i64::from(self.buffer_after)
    }
}

impl Default for Service {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            buffer_before: 0,
            buffer_after: 0,
            is_active: true,
            min_advance_booking: None,
            max_advance_booking: None,
        }
    }
}

/// One weekday of a staff member's working pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDay {
    pub day: Weekday,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default = "default_open")]
    pub start_time: String,
    #[serde(default = "default_close")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    #[serde(default = "default_true")]
    pub taking_appointments: bool,
    /// Services this member performs. Empty means every service.
    #[serde(default, alias = "services")]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub availability: Vec<StaffDay>,
}

impl StaffMember {
    pub fn provides(&self, service_id: &str) -> bool {
        self.service_ids.is_empty() || self.service_ids.iter().any(|id| id == service_id)
    }
}

/// One weekday of the business opening hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDay {
    pub day: Weekday,
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default = "default_open", alias = "startTime")]
    pub open_time: String,
    #[serde(default = "default_close", alias = "endTime")]
    pub close_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<String>,
}

impl BusinessDay {
    pub fn open(day: Weekday, open_time: &str, close_time: &str) -> Self {
        Self {
            day,
            is_open: true,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            break_start: None,
            break_end: None,
        }
    }

    pub fn closed(day: Weekday) -> Self {
        Self {
            is_open: false,
            ..Self::open(day, "09:00", "17:00")
        }
    }

    pub fn with_break(mut self, start: &str, end: &str) -> Self {
        self.break_start = Some(start.to_string());
        self.break_end = Some(end.to_string());
        self
    }
}

/// Business-wide scheduling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSchedule {
    /// IANA timezone all civil dates and times-of-day are interpreted in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub schedule: Vec<BusinessDay>,
    /// Spacing of the candidate grid in minutes.
    #[serde(default = "default_cadence", alias = "slotDuration")]
    pub slot_cadence: u32,
    #[serde(default = "default_max_days")]
    pub max_advance_booking_days: u32,
    #[serde(default = "default_min_hours")]
    pub min_advance_booking_hours: u32,
}

impl Default for BusinessSchedule {
    /// Monday to Friday 09:00-17:00, weekends closed.
    fn default() -> Self {
        let schedule = Weekday::ALL
            .iter()
            .map(|&day| match day {
                Weekday::Saturday | Weekday::Sunday => BusinessDay::closed(day),
                _ => BusinessDay::open(day, "09:00", "17:00"),
            })
            .collect();
        Self {
            timezone: default_timezone(),
            schedule,
            slot_cadence: default_cadence(),
            max_advance_booking_days: default_max_days(),
            min_advance_booking_hours: default_min_hours(),
        }
    }
}

impl BusinessSchedule {
    pub const MIN_CADENCE: u32 = 5;
    pub const MAX_CADENCE: u32 = 120;

    pub fn day(&self, weekday: Weekday) -> Option<&BusinessDay> {
        self.schedule.iter().find(|d| d.day == weekday)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| SlotError::Config(format!("invalid timezone '{}'", self.timezone)))
    }

    /// Check the integrity of the configuration.
    ///
    /// Exactly one entry per weekday, a cadence within range, a lead time of at
    /// least a day, parseable times with `open < close` on open days, well-ordered
    /// breaks and a known timezone.
    pub fn validate(&self) -> Result<()> {
        if self.schedule.len() != Weekday::ALL.len() {
            return Err(SlotError::Config(format!(
                "schedule must have 7 entries, found {}",
                self.schedule.len()
            )));
        }
        for weekday in Weekday::ALL {
            let count = self.schedule.iter().filter(|d| d.day == weekday).count();
            if count != 1 {
                return Err(SlotError::Config(format!(
                    "schedule has {} entries for {}",
                    count, weekday
                )));
            }
        }

        if !(Self::MIN_CADENCE..=Self::MAX_CADENCE).contains(&self.slot_cadence) {
            return Err(SlotError::Config(format!(
                "slot cadence must be between {} and {} minutes, found {}",
                Self::MIN_CADENCE,
                Self::MAX_CADENCE,
                self.slot_cadence
            )));
        }
        if self.max_advance_booking_days == 0 {
            return Err(SlotError::Config(
                "maxAdvanceBookingDays must be at least 1".to_string(),
            ));
        }
        self.tz()?;

        for day in &self.schedule {
            let hours = MinuteRange::parse(&day.open_time, &day.close_time)?;
            if day.is_open && hours.is_empty() {
                return Err(SlotError::Config(format!(
                    "{} opens at {} but closes at {}",
                    day.day, day.open_time, day.close_time
                )));
            }
            if let (Some(start), Some(end)) = (&day.break_start, &day.break_end) {
                if parse_hhmm(start)? >= parse_hhmm(end)? {
                    return Err(SlotError::Config(format!(
                        "{} break starts at {} but ends at {}",
                        day.day, start, end
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// An already-committed booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "startDateTime")]
    pub start: DateTime<Utc>,
    #[serde(default, alias = "endDateTime", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub status: BookingStatus,
    #[serde(default, alias = "teamMember", skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
}

impl Booking {
    pub fn end_or_default(&self) -> DateTime<Utc> {
        self.end
            .unwrap_or(self.start + Duration::minutes(DEFAULT_BOOKING_MINUTES))
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// A candidate appointment time. Output only, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub available: bool,
}
