//! Core data types and enums for schedule data.

use std::fmt;

use crate::identifiers::*;
use crate::models::time::TimeOfDay;

// ============================================================================
// Enums
// ============================================================================

/// Trip direction (0 = outbound, 1 = inbound per GTFS)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
#[repr(u8)]
pub enum DirectionId {
    Outbound = 0,
    Inbound = 1,
}

impl DirectionId {
    pub fn from_gtfs(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Outbound),
            1 => Some(Self::Inbound),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl From<DirectionId> for u8 {
    fn from(direction: DirectionId) -> u8 {
        direction.as_u8()
    }
}

impl TryFrom<u8> for DirectionId {
    type Error = TransitError;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_gtfs(value)
            .ok_or_else(|| TransitError::InvalidData(format!("invalid direction_id {value}")))
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single stop event in a trip (arrival at a stop)
///
/// `arrival` is `None` when the source leaves the arrival time blank,
/// e.g. for untimed intermediate stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopEvent {
    pub stop_id: StopIdentifier,
    pub arrival: Option<TimeOfDay>,
    pub stop_sequence: u32,
}

impl StopEvent {
    pub fn new(stop_id: StopIdentifier, arrival: Option<TimeOfDay>, stop_sequence: u32) -> Self {
        Self {
            stop_id,
            arrival,
            stop_sequence,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Stop not found: {0}")]
    StopNotFound(StopIdentifier),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceIdentifier),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Failed to read schedule: {0}")]
    ScheduleReadError(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
