//! Error types for slot-engine operations.

use thiserror::Error;

/// A booking-policy refusal. The request was well-formed but the rules say no.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Service is not available for booking")]
    InactiveService,

    #[error("Staff member is not taking appointments")]
    StaffNotTakingAppointments,

    #[error("Staff member does not provide this service")]
    StaffDoesNotProvideService,

    #[error("Must book at least {min_hours} hours in advance")]
    TooSoon { min_hours: u32 },

    #[error("Cannot book more than {max_days} days in advance")]
    TooLate { max_days: u32 },
}

/// Which kind of record failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Service,
    Staff,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Service => f.write_str("Service"),
            RecordKind::Staff => f.write_str("Staff member"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Missing or malformed request parameters.
    #[error("{0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// Business configuration integrity fault (never the caller's fault).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure in the data collaborator.
    #[error("Data source error: {0}")]
    Source(String),
}

impl SlotError {
    /// HTTP-style status code for this failure category.
    pub fn status_code(&self) -> u16 {
        match self {
            SlotError::Validation(_) | SlotError::Policy(_) => 400,
            SlotError::NotFound { .. } => 404,
            SlotError::Config(_) | SlotError::Source(_) => 500,
        }
    }

    /// Message safe to hand back to a caller. Internal faults are not leaked.
    pub fn public_message(&self) -> String {
        match self {
            SlotError::Config(_) | SlotError::Source(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
