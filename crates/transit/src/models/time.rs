//! Service-day clock times.

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;
use std::time::Duration;

use crate::models::types::TransitError;

/// Time elapsed since midnight of the service day, in whole seconds.
///
/// Per GTFS, times can exceed 24 hours for trips past midnight
/// (e.g., 25:30:00 for 1:30am the next day).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// For constants; hours large enough to overflow `u32` seconds panic.
    pub const fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    pub const fn seconds(&self) -> u32 {
        self.0
    }

    pub const fn hours(&self) -> u32 {
        self.0 / 3600
    }

    pub const fn minutes(&self) -> u32 {
        (self.0 % 3600) / 60
    }
}

impl Sub for TimeOfDay {
    type Output = Duration;

    /// Saturates at zero when `rhs` is later than `self`.
    fn sub(self, rhs: TimeOfDay) -> Duration {
        Duration::from_secs(u64::from(self.0.saturating_sub(rhs.0)))
    }
}

impl From<u32> for TimeOfDay {
    fn from(seconds: u32) -> Self {
        Self(seconds)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.0 % 60
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = TransitError;

    /// Parses `H:MM:SS` / `HH:MM:SS`, hours may exceed 23.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TransitError::InvalidData(format!("invalid time of day '{s}'"));

        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }
        let mut values = [0u32; 3];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| invalid())?;
        }
        let [hours, minutes, seconds] = values;
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }
        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .map(Self)
            .ok_or_else(invalid)
    }
}
