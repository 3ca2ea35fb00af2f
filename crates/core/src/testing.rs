//! Small schedule fixtures for unit tests. Times are minutes after midnight.

use std::collections::BTreeSet;
use std::sync::Arc;

use frequent_transit::prelude::*;
use geo::Point;

use crate::segment::StopPairKey;

pub(crate) const WEEKDAY: &str = "weekday";
pub(crate) const MON_THU: &str = "mon_thu";
pub(crate) const SATURDAY: &str = "saturday";

pub(crate) fn pair(upstream: &str, downstream: &str) -> StopPairKey {
    StopPairKey::new(StopIdentifier::new(upstream), StopIdentifier::new(downstream))
}

pub(crate) fn minutes(m: u32) -> TimeOfDay {
    TimeOfDay::from_seconds(m * 60)
}

pub(crate) fn stop(id: &str) -> StopIdentifier {
    StopIdentifier::new(id)
}

pub(crate) struct RouteBuilder {
    name: String,
    trips: Vec<TripImpl>,
    stops: BTreeSet<String>,
}

impl RouteBuilder {
    fn push(&mut self, direction: Option<DirectionId>, service: &str, events: Vec<StopEvent>) {
        for event in &events {
            self.stops.insert(event.stop_id.to_string());
        }
        let id = format!("{}-{:04}", self.name, self.trips.len());
        self.trips.push(TripImpl {
            id: TripIdentifier::new(id),
            service_id: ServiceIdentifier::new(service),
            direction_id: direction,
            stop_events: events,
        });
    }

    /// Trip visiting `stops` in order, sequence numbers 1, 2, ...
    pub(crate) fn trip(mut self, direction: DirectionId, service: &str, stops: &[(&str, u32)]) -> Self {
        let events = stops
            .iter()
            .zip(1..)
            .map(|((id, m), seq)| StopEvent::new(stop(id), Some(minutes(*m)), seq))
            .collect();
        self.push(Some(direction), service, events);
        self
    }

    /// Trip with explicit `(stop, minute, stop_sequence)` events in source order
    pub(crate) fn trip_with_sequences(
        mut self,
        direction: DirectionId,
        service: &str,
        stops: &[(&str, u32, u32)],
    ) -> Self {
        let events = stops
            .iter()
            .map(|(id, m, seq)| StopEvent::new(stop(id), Some(minutes(*m)), *seq))
            .collect();
        self.push(Some(direction), service, events);
        self
    }

    /// One trip every `headway` minutes departing `first..=last`, `travel`
    /// minutes between consecutive stops.
    pub(crate) fn every(
        mut self,
        direction: DirectionId,
        service: &str,
        stops: &[&str],
        (first, last): (u32, u32),
        headway: u32,
        travel: u32,
    ) -> Self {
        let mut departure = first;
        while departure <= last {
            let events = stops
                .iter()
                .zip(0u32..)
                .map(|(id, i)| StopEvent::new(stop(id), Some(minutes(departure + i * travel)), i + 1))
                .collect();
            self.push(Some(direction), service, events);
            departure += headway;
        }
        self
    }
}

#[derive(Default)]
pub(crate) struct ScheduleBuilder {
    routes: Vec<RouteImpl>,
    stops: BTreeSet<String>,
}

impl ScheduleBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, name: &str, f: impl FnOnce(RouteBuilder) -> RouteBuilder) -> Self {
        let built = f(RouteBuilder {
            name: name.to_string(),
            trips: Vec::new(),
            stops: BTreeSet::new(),
        });
        self.stops.extend(built.stops);
        self.routes.push(RouteImpl {
            id: RouteIdentifier::new(format!("route-{name}")),
            short_name: name.into(),
            trips: built
                .trips
                .into_iter()
                .map(|trip| Arc::new(trip) as Arc<dyn Trip>)
                .collect(),
        });
        self
    }

    pub(crate) fn build(self) -> StaticScheduleProvider {
        let stops = self
            .stops
            .into_iter()
            .enumerate()
            .map(|(i, id)| StopImpl {
                id: StopIdentifier::new(id),
                location: Point::new(-80.0 + i as f64 * 0.01, 40.0),
            })
            .collect();
        let services = vec![
            ServiceCalendar::new(
                ServiceIdentifier::new(WEEKDAY),
                WeekdayFlags::from_bools(true, true, true, true, true, false, false),
            ),
            ServiceCalendar::new(
                ServiceIdentifier::new(MON_THU),
                WeekdayFlags::from_bools(true, true, true, true, false, false, false),
            ),
            ServiceCalendar::new(
                ServiceIdentifier::new(SATURDAY),
                WeekdayFlags::from_bools(false, false, false, false, false, true, false),
            ),
        ];
        StaticScheduleProvider::from_data(Some("Test Transit".into()), stops, services, self.routes)
    }
}
