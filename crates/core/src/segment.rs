//! Stop-pair indexing over representative trips.

use std::fmt;
use std::sync::Arc;

use frequent_transit::{DirectionId, Route, ScheduleProvider, StopEvent, StopIdentifier, Trip};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::natural::sort_naturally;
use crate::signature::RouteTag;

/// Directed pair of consecutive stops; `(A, B)` and `(B, A)` are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopPairKey {
    pub upstream: StopIdentifier,
    pub downstream: StopIdentifier,
}

impl StopPairKey {
    pub fn new(upstream: StopIdentifier, downstream: StopIdentifier) -> Self {
        Self {
            upstream,
            downstream,
        }
    }
}

impl fmt::Display for StopPairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.upstream, self.downstream)
    }
}

/// Stop pair -> route tags that traverse it, in first-seen order.
///
/// Every key holds at least one tag; a tag is recorded once per key.
#[derive(Clone, Debug, Default)]
pub struct SegmentIndex {
    segments: IndexMap<StopPairKey, Vec<RouteTag>>,
}

impl SegmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: StopPairKey, tag: RouteTag) {
        let tags = self.segments.entry(key).or_default();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    pub fn tags(&self, key: &StopPairKey) -> Option<&[RouteTag]> {
        self.segments.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StopPairKey, &[RouteTag])> {
        self.segments.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Picks the first outbound and the first inbound trip of a route.
///
/// Routes with fewer than two trips, or without a trip in either direction,
/// have no representative pair.
pub fn representative_trips(route: &dyn Route) -> Option<(Arc<dyn Trip>, Arc<dyn Trip>)> {
    let trips = route.trips();
    if trips.len() < 2 {
        return None;
    }
    let first_in = |direction: DirectionId| {
        trips
            .iter()
            .find(|trip| trip.direction_id() == Some(direction))
            .cloned()
    };
    Some((first_in(DirectionId::Outbound)?, first_in(DirectionId::Inbound)?))
}

/// Stop events ordered by `stop_sequence`, equal sequences keep source order
fn ordered_stop_events(trip: &dyn Trip) -> Vec<&StopEvent> {
    let mut events: Vec<&StopEvent> = trip.stop_events().iter().collect();
    events.sort_by_key(|event| event.stop_sequence);
    events
}

/// Builds the [`SegmentIndex`] from one representative trip per route and
/// direction.
pub struct StopPairIndexer<'a> {
    provider: &'a dyn ScheduleProvider,
    index: SegmentIndex,
}

impl<'a> StopPairIndexer<'a> {
    pub fn new(provider: &'a dyn ScheduleProvider) -> Self {
        Self {
            provider,
            index: SegmentIndex::new(),
        }
    }

    /// Trace the named routes in natural order.
    ///
    /// Fails only when a name is not a route of the schedule.
    pub fn index_routes<S: AsRef<str>>(mut self, names: &[S]) -> Result<SegmentIndex> {
        let mut names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        sort_naturally(&mut names);

        tracing::info!("Tracing {} routes", names.len());
        for name in names {
            let route = self.provider.route(name)?;
            self.index_route(name, route.as_ref());
        }
        tracing::info!("Indexed {} stop pairs", self.index.len());

        Ok(self.index)
    }

    fn index_route(&mut self, name: &str, route: &dyn Route) {
        match representative_trips(route) {
            Some((outbound, inbound)) => {
                tracing::debug!(
                    "route {name}: tracing trips {} and {}",
                    outbound.id(),
                    inbound.id()
                );
                self.index_trip(name, DirectionId::Outbound, outbound.as_ref());
                self.index_trip(name, DirectionId::Inbound, inbound.as_ref());
            }
            None => tracing::debug!(
                "route {name}: skipped, needs a trip in each direction ({} trips)",
                route.trips().len()
            ),
        }
    }

    fn index_trip(&mut self, name: &str, direction: DirectionId, trip: &dyn Trip) {
        let events = ordered_stop_events(trip);
        for pair in events.windows(2) {
            let key = StopPairKey::new(pair[0].stop_id.clone(), pair[1].stop_id.clone());
            self.index.register(key, RouteTag::new(name, direction));
        }
    }
}
