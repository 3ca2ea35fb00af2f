use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FrequencyError, Result};
use crate::headway::MiddayWindow;

/// Default frequency threshold: 15 seconds and 1 microsecond.
///
/// This is the value the map was historically produced with. It reads like
/// a typo for 15 minutes, which is why the threshold is configurable rather
/// than fixed; with whole-second schedule times it admits headways of at
/// most 15 seconds.
pub const DEFAULT_MAX_HEADWAY: Duration = Duration::new(15, 1_000);

/// Analysis settings for a frequent-service run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyConfig {
    pub midday: MiddayWindow,
    /// A stop pair is frequent when its combined headway is at most this.
    /// Given in seconds, like the window bounds.
    #[serde(with = "seconds")]
    pub max_headway: Duration,
}

/// `Duration` as a plain, possibly fractional, number of seconds
mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            midday: MiddayWindow::default(),
            max_headway: DEFAULT_MAX_HEADWAY,
        }
    }
}

impl FrequencyConfig {
    /// Read settings from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FrequencyError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| FrequencyError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn with_max_headway(mut self, max_headway: Duration) -> Self {
        self.max_headway = max_headway;
        self
    }

    pub fn is_frequent(&self, headway: Option<Duration>) -> bool {
        headway.is_some_and(|h| h <= self.max_headway)
    }
}
