//! Schedule providers.

#[cfg(feature = "compiler")]
pub mod gtfs;
pub mod static_provider;

pub use static_provider::{RouteImpl, StaticScheduleProvider, StopImpl, TripImpl};
