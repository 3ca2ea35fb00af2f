//! Builds a [`StaticScheduleProvider`] from a GTFS archive or directory.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use geo::Point;
use gtfs_structures::{DirectionType, Gtfs};

use crate::identifiers::*;
use crate::models::calendar::{ServiceCalendar, WeekdayFlags};
use crate::models::time::TimeOfDay;
use crate::models::traits::Trip;
use crate::models::types::*;
use crate::provider::static_provider::{RouteImpl, StaticScheduleProvider, StopImpl, TripImpl};

impl StaticScheduleProvider {
    /// Read a GTFS zip archive or unpacked directory
    pub fn from_gtfs_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let gtfs = Gtfs::from_path(path).map_err(|e| {
            TransitError::ScheduleReadError(format!("{}: {e}", path.display()))
        })?;
        Self::from_gtfs(&gtfs)
    }

    /// Convert a parsed feed.
    ///
    /// Routes are ordered by route id and trips by trip id, so "first trip"
    /// queries are stable across runs. Services only present in
    /// calendar_dates.txt get no regular weekdays.
    pub fn from_gtfs(gtfs: &Gtfs) -> Result<Self> {
        let agency_name = gtfs.agencies.first().map(|agency| agency.name.clone());

        let mut stops = Vec::with_capacity(gtfs.stops.len());
        for (stop_id, stop) in &gtfs.stops {
            match (stop.longitude, stop.latitude) {
                (Some(lon), Some(lat)) => stops.push(StopImpl {
                    id: StopIdentifier::new(stop_id),
                    location: Point::new(lon, lat),
                }),
                _ => tracing::warn!(
                    "stop {stop_id} has no coordinates, skipping it; corridors through it cannot be drawn"
                ),
            }
        }

        let mut services: Vec<ServiceCalendar> = gtfs
            .calendar
            .values()
            .map(|c| {
                ServiceCalendar::new(
                    ServiceIdentifier::new(&c.id),
                    WeekdayFlags::from_bools(
                        c.monday, c.tuesday, c.wednesday, c.thursday, c.friday, c.saturday,
                        c.sunday,
                    ),
                )
            })
            .collect();
        let known: HashSet<&str> = gtfs.calendar.keys().map(String::as_str).collect();
        for service_id in gtfs.calendar_dates.keys() {
            if !known.contains(service_id.as_str()) {
                services.push(ServiceCalendar::new(
                    ServiceIdentifier::new(service_id),
                    WeekdayFlags::new(),
                ));
            }
        }

        let mut route_ids: Vec<&String> = gtfs.routes.keys().collect();
        route_ids.sort();

        let mut trips_by_route: HashMap<&str, Vec<&gtfs_structures::Trip>> = HashMap::new();
        for trip in gtfs.trips.values() {
            trips_by_route.entry(trip.route_id.as_str()).or_default().push(trip);
        }

        let mut routes = Vec::with_capacity(route_ids.len());
        for route_id in route_ids {
            let route = &gtfs.routes[route_id];
            let short_name = route
                .short_name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| route_id.clone());

            let mut trips = trips_by_route.remove(route_id.as_str()).unwrap_or_default();
            trips.sort_by(|a, b| a.id.cmp(&b.id));

            let trips = trips
                .into_iter()
                .map(|trip| Arc::new(convert_trip(trip)) as Arc<dyn Trip>)
                .collect();

            routes.push(RouteImpl {
                id: RouteIdentifier::new(route_id),
                short_name: short_name.into(),
                trips,
            });
        }

        tracing::debug!(
            "converted GTFS feed: {} stops, {} services, {} routes",
            stops.len(),
            services.len(),
            routes.len()
        );

        Ok(Self::from_data(agency_name, stops, services, routes))
    }
}

fn convert_trip(trip: &gtfs_structures::Trip) -> TripImpl {
    let direction_id = trip.direction_id.as_ref().map(|direction| match direction {
        DirectionType::Outbound => DirectionId::Outbound,
        DirectionType::Inbound => DirectionId::Inbound,
    });

    let stop_events = trip
        .stop_times
        .iter()
        .map(|st| {
            StopEvent::new(
                StopIdentifier::new(&st.stop.id),
                st.arrival_time.map(TimeOfDay::from_seconds),
                st.stop_sequence,
            )
        })
        .collect();

    TripImpl {
        id: TripIdentifier::new(&trip.id),
        service_id: ServiceIdentifier::new(&trip.service_id),
        direction_id,
        stop_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::ScheduleProvider;

    fn gtfs_stop(id: &str, lat: Option<f64>, lon: Option<f64>) -> (String, Arc<gtfs_structures::Stop>) {
        let stop = gtfs_structures::Stop {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
            ..Default::default()
        };
        (id.to_string(), Arc::new(stop))
    }

    #[test]
    fn test_stops_without_coordinates_are_skipped() {
        let gtfs = Gtfs {
            stops: HashMap::from([
                gtfs_stop("placed", Some(40.44), Some(-79.99)),
                gtfs_stop("station_entrance", None, None),
            ]),
            ..Default::default()
        };

        let provider = StaticScheduleProvider::from_gtfs(&gtfs).unwrap();

        assert_eq!(provider.stop_count(), 1);
        assert!(provider.get_stop(&StopIdentifier::new("placed")).is_some());
        assert!(matches!(
            provider.stop(&StopIdentifier::new("station_entrance")),
            Err(TransitError::StopNotFound(_))
        ));
    }
}
