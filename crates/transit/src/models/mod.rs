//! Schedule data models, types, and traits.

pub mod calendar;
pub mod time;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use calendar::{ServiceCalendar, WeekdayFlags};
pub use time::TimeOfDay;
pub use traits::{Route, ScheduleProvider, TransitStop, Trip};
pub use types::{DirectionId, StopEvent, TransitError, Result};
