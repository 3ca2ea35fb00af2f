//! In-memory schedule provider.
//!
//! Stores a whole schedule snapshot in memory with lookup maps for the
//! queries the frequency analysis makes.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::{calendar::ServiceCalendar, traits::*, types::*};

// ============================================================================
// Concrete Implementations of Traits
// ============================================================================

#[derive(Clone, Debug)]
pub struct StopImpl {
    pub id: StopIdentifier,
    pub location: Point,
}

impl TransitStop for StopImpl {
    fn id(&self) -> &StopIdentifier {
        &self.id
    }

    fn location(&self) -> Point {
        self.location
    }
}

#[derive(Clone, Debug)]
pub struct TripImpl {
    pub id: TripIdentifier,
    pub service_id: ServiceIdentifier,
    pub direction_id: Option<DirectionId>,
    pub stop_events: Vec<StopEvent>,
}

impl Trip for TripImpl {
    fn id(&self) -> &TripIdentifier {
        &self.id
    }

    fn service_id(&self) -> &ServiceIdentifier {
        &self.service_id
    }

    fn stop_events(&self) -> &[StopEvent] {
        &self.stop_events
    }

    fn direction_id(&self) -> Option<DirectionId> {
        self.direction_id
    }
}

#[derive(Clone)]
pub struct RouteImpl {
    pub id: RouteIdentifier,
    pub short_name: Arc<str>,
    pub trips: Vec<Arc<dyn Trip>>,
}

impl Route for RouteImpl {
    fn id(&self) -> &RouteIdentifier {
        &self.id
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn trips(&self) -> &[Arc<dyn Trip>] {
        &self.trips
    }
}

// ============================================================================
// Static Provider
// ============================================================================

/// In-memory schedule provider
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Default)]
pub struct StaticScheduleProvider {
    agency_name: Option<Arc<str>>,

    // Core data
    routes: Vec<Arc<RouteImpl>>,

    // Lookup maps
    stop_map: HashMap<StopIdentifier, Arc<StopImpl>>,
    service_map: HashMap<ServiceIdentifier, Arc<ServiceCalendar>>,
    route_map: HashMap<Arc<str>, Arc<RouteImpl>>,
}

impl StaticScheduleProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Build provider from raw data
    ///
    /// Routes are addressed by short name. When several routes share a short
    /// name, the last one in `routes` takes the name and the earlier ones are
    /// dropped.
    pub fn from_data(
        agency_name: Option<String>,
        stops: Vec<StopImpl>,
        services: Vec<ServiceCalendar>,
        routes: Vec<RouteImpl>,
    ) -> Self {
        let stop_map: HashMap<_, _> = stops
            .into_iter()
            .map(|s| (s.id.clone(), Arc::new(s)))
            .collect();

        let service_map: HashMap<_, _> = services
            .into_iter()
            .map(|c| (c.service_id.clone(), Arc::new(c)))
            .collect();

        let mut positions: HashMap<Arc<str>, usize> = HashMap::new();
        let mut kept: Vec<Arc<RouteImpl>> = Vec::with_capacity(routes.len());
        for route in routes {
            let route = Arc::new(route);
            match positions.get(&route.short_name) {
                Some(&pos) => {
                    tracing::warn!(
                        "route {} shares short name '{}' with route {}, replacing it",
                        route.id,
                        route.short_name,
                        kept[pos].id
                    );
                    kept[pos] = route;
                }
                None => {
                    positions.insert(route.short_name.clone(), kept.len());
                    kept.push(route);
                }
            }
        }
        let route_map = kept
            .iter()
            .map(|route| (route.short_name.clone(), route.clone()))
            .collect();

        Self {
            agency_name: agency_name.map(Arc::from),
            routes: kept,
            stop_map,
            service_map,
            route_map,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stop_map.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl ScheduleProvider for StaticScheduleProvider {
    fn agency_name(&self) -> Option<&str> {
        self.agency_name.as_deref()
    }

    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<dyn TransitStop>> {
        self.stop_map.get(id).map(|s| s.clone() as Arc<dyn TransitStop>)
    }

    fn get_service(&self, id: &ServiceIdentifier) -> Option<Arc<ServiceCalendar>> {
        self.service_map.get(id).cloned()
    }

    fn get_route(&self, short_name: &str) -> Option<Arc<dyn Route>> {
        self.route_map
            .get(short_name)
            .map(|r| r.clone() as Arc<dyn Route>)
    }

    fn all_routes(&self) -> Vec<Arc<dyn Route>> {
        self.routes
            .iter()
            .map(|r| r.clone() as Arc<dyn Route>)
            .collect()
    }
}
