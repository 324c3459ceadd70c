//! # slot-engine
//!
//! Deterministic bookable-slot computation for appointment scheduling.
//!
//! Given a service, an optional staff member and a civil date, the engine
//! intersects business hours with staff hours, applies breaks, buffers and the
//! advance-booking policy, and classifies a fixed-cadence candidate grid against
//! already-committed bookings. It performs no I/O and holds no state; records come
//! from a [`source::SchedulingSource`].
//!
//! ## Modules
//!
//! - [`interval`] — `HH:MM` parsing and half-open minute ranges
//! - [`model`] — services, staff, business schedule, bookings, slots
//! - [`schedule`] — business and staff weekday resolution, break merging
//! - [`window`] — minimum/maximum advance-booking policy
//! - [`conflict`] — bookings → blocked minute ranges
//! - [`slots`] — candidate grid generation
//! - [`clock`] — instants ↔ business-local minutes-of-day
//! - [`source`] — the data collaborator trait and an in-memory store
//! - [`engine`] — request validation order and response assembly
//! - [`error`] — Error types

pub mod clock;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod interval;
pub mod model;
pub mod schedule;
pub mod slots;
pub mod source;
pub mod window;

pub use engine::{available_slots, compute_slots, EmptyReason, SlotRequest, SlotResponse};
pub use error::{PolicyViolation, SlotError};
pub use interval::MinuteRange;
pub use model::{
    Booking, BookingStatus, BusinessDay, BusinessSchedule, Service, Slot, StaffDay, StaffMember,
    Weekday,
};
pub use source::{InMemorySource, SchedulingSource};
