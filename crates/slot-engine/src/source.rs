//! The data collaborator the engine reads from.
//!
//! Storage lives outside this crate. Implementations hand back fully resolved
//! records; `Ok(None)` means the identifier does not resolve, `Err` means the
//! store itself failed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Booking, BusinessSchedule, Service, StaffMember};

/// Half-open UTC span covering one business-local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayBounds {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

pub trait SchedulingSource {
    fn service(&self, id: &str) -> Result<Option<Service>>;

    fn staff(&self, id: &str) -> Result<Option<StaffMember>>;

    fn business_schedule(&self) -> Result<BusinessSchedule>;

    /// Non-cancelled bookings starting within `day`, assigned to `staff_id` when given.
    fn bookings(&self, day: DayBounds, staff_id: Option<&str>) -> Result<Vec<Booking>>;
}

/// A fixture store holding everything in memory, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InMemorySource {
    #[serde(default, alias = "openingTimes")]
    pub business: BusinessSchedule,
    #[serde(default)]
    pub services: BTreeMap<String, Service>,
    #[serde(default, alias = "teamMembers")]
    pub staff: BTreeMap<String, StaffMember>,
    #[serde(default, alias = "appointments")]
    pub bookings: Vec<Booking>,
}

impl InMemorySource {
    pub fn new(business: BusinessSchedule) -> Self {
        Self {
            business,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_service(mut self, id: &str, service: Service) -> Self {
        self.services.insert(id.to_string(), service);
        self
    }

    pub fn with_staff(mut self, id: &str, staff: StaffMember) -> Self {
        self.staff.insert(id.to_string(), staff);
        self
    }

    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.bookings.push(booking);
        self
    }
}

impl SchedulingSource for InMemorySource {
    fn service(&self, id: &str) -> Result<Option<Service>> {
        Ok(self.services.get(id).cloned())
    }

    fn staff(&self, id: &str) -> Result<Option<StaffMember>> {
        Ok(self.staff.get(id).cloned())
    }

    fn business_schedule(&self) -> Result<BusinessSchedule> {
        Ok(self.business.clone())
    }

    fn bookings(&self, day: DayBounds, staff_id: Option<&str>) -> Result<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| !b.is_cancelled() && day.contains(b.start))
            .filter(|b| staff_id.is_none_or(|id| b.staff_id.as_deref() == Some(id)))
            .cloned()
            .collect())
    }
}
