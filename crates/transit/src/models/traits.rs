//! Core traits for schedule entities.
//!
//! These traits define the read-only interface the frequency analysis
//! consumes. Implementations can be in-memory, database-backed, or remote.

use geo::Point;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::calendar::ServiceCalendar;
use crate::models::time::TimeOfDay;
use crate::models::types::*;

// ============================================================================
// Core Entity Traits
// ============================================================================

/// A single transit trip (vehicle run with specific stops and times)
pub trait Trip: Send + Sync {
    fn id(&self) -> &TripIdentifier;
    fn service_id(&self) -> &ServiceIdentifier;

    /// Stop events in source order; `stop_sequence` defines trip order
    fn stop_events(&self) -> &[StopEvent];

    /// Direction, if the source states one
    fn direction_id(&self) -> Option<DirectionId>;

    /// Arrival time at the first stop event for `stop_id` that has one
    fn arrival_at(&self, stop_id: &StopIdentifier) -> Option<TimeOfDay> {
        self.stop_events()
            .iter()
            .filter(|event| &event.stop_id == stop_id)
            .find_map(|event| event.arrival)
    }
}

/// A transit route (e.g., "Red Line", "Route 66")
pub trait Route: Send + Sync {
    fn id(&self) -> &RouteIdentifier;

    /// Short name (e.g., "1", "A", "Red"), used as the route's name
    fn short_name(&self) -> &str;

    /// All trips on this route, in a stable order
    fn trips(&self) -> &[Arc<dyn Trip>];
}

/// A boarding location
pub trait TransitStop: Send + Sync {
    fn id(&self) -> &StopIdentifier;

    /// Longitude/latitude point
    fn location(&self) -> Point;
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Read-only provider of a schedule snapshot
pub trait ScheduleProvider: Send + Sync {
    /// Name of the (first) agency publishing the schedule
    fn agency_name(&self) -> Option<&str>;

    // ---- Lookups ----
    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<dyn TransitStop>>;
    fn get_service(&self, id: &ServiceIdentifier) -> Option<Arc<ServiceCalendar>>;

    /// Route by short name
    fn get_route(&self, short_name: &str) -> Option<Arc<dyn Route>>;

    // ---- Collections ----
    fn all_routes(&self) -> Vec<Arc<dyn Route>>;

    /// Short names of every route reachable through [`ScheduleProvider::get_route`]
    fn route_names(&self) -> Vec<String> {
        self.all_routes()
            .iter()
            .map(|route| route.short_name().to_string())
            .collect()
    }

    // ---- Fallible lookups ----

    fn stop(&self, id: &StopIdentifier) -> Result<Arc<dyn TransitStop>> {
        self.get_stop(id)
            .ok_or_else(|| TransitError::StopNotFound(id.clone()))
    }

    fn service(&self, id: &ServiceIdentifier) -> Result<Arc<ServiceCalendar>> {
        self.get_service(id)
            .ok_or_else(|| TransitError::ServiceNotFound(id.clone()))
    }

    fn route(&self, short_name: &str) -> Result<Arc<dyn Route>> {
        self.get_route(short_name)
            .ok_or_else(|| TransitError::RouteNotFound(short_name.to_string()))
    }
}
