//! # frequent-transit
//!
//! Read-only schedule model consumed by the frequent-service analysis.
//!
//! ## Features
//!
//! - **Typed identifiers**: cheap-to-clone ids for stops, routes, trips and services
//! - **Service-day clock**: [`TimeOfDay`] values that may run past 24:00:00
//! - **Typical weekday calendars**: weekly service patterns
//! - **GTFS loading** (feature `compiler`): build an in-memory provider from a feed
//!
//! ## Example
//!
//! ```
//! use frequent_transit::prelude::*;
//! use geo::Point;
//!
//! let stop = StopImpl {
//!     id: StopIdentifier::new("downtown"),
//!     location: Point::new(-79.9959, 40.4406),
//! };
//!
//! let provider = StaticScheduleProvider::from_data(
//!     Some("Port Authority of Allegheny County".into()),
//!     vec![stop],
//!     vec![],
//!     vec![],
//! );
//!
//! assert!(provider.get_stop(&StopIdentifier::new("downtown")).is_some());
//! assert_eq!(provider.agency_name(), Some("Port Authority of Allegheny County"));
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{
        calendar::{ServiceCalendar, WeekdayFlags},
        time::TimeOfDay,
        traits::*,
        types::*,
    };
    pub use crate::provider::{
        static_provider::StaticScheduleProvider, RouteImpl, StopImpl, TripImpl,
    };
}

pub use prelude::*;
