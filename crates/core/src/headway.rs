//! Midday headway computation and its memoization caches.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use frequent_transit::{ScheduleProvider, StopIdentifier, TimeOfDay};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::segment::StopPairKey;
use crate::signature::{RouteSignature, RouteTag};

/// Open time interval characterizing typical daytime service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddayWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Default for MiddayWindow {
    fn default() -> Self {
        Self {
            start: TimeOfDay::from_hms(10, 0, 0),
            end: TimeOfDay::from_hms(14, 0, 0),
        }
    }
}

impl MiddayWindow {
    /// Both bounds are exclusive
    pub fn contains(&self, time: TimeOfDay) -> bool {
        time > self.start && time < self.end
    }

    /// Times inside the window, sorted ascending
    pub fn slice(&self, times: impl IntoIterator<Item = TimeOfDay>) -> Vec<TimeOfDay> {
        let mut inside: Vec<TimeOfDay> = times.into_iter().filter(|t| self.contains(*t)).collect();
        inside.sort_unstable();
        inside
    }
}

/// Largest gap between consecutive times of a sorted slice; `None` with
/// fewer than two times.
pub fn max_headway(sorted: &[TimeOfDay]) -> Option<Duration> {
    sorted.windows(2).map(|w| w[1] - w[0]).max()
}

/// Insertion-ordered memo of possibly-undefined headways.
///
/// The first value recorded for a key is kept; later records for the same
/// key are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadwayCache<K: Hash + Eq> {
    entries: IndexMap<K, Option<Duration>>,
}

impl<K: Hash + Eq> Default for HeadwayCache<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> HeadwayCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when nothing is cached, `Some(None)` for a cached undefined headway
    pub fn lookup<Q>(&self, key: &Q) -> Option<Option<Duration>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied()
    }

    /// Cached headway, `None` when undefined or never computed
    pub fn headway<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).flatten()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Store `headway` unless `key` is already cached; returns the cached value.
    pub fn record(&mut self, key: K, headway: Option<Duration>) -> Option<Duration> {
        *self.entries.entry(key).or_insert(headway)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, Option<Duration>)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes combined midday headways of stop pairs.
///
/// Holds two caches: one per route name, filled as a side effect the first
/// time a route is touched, and one per [`RouteSignature`] so that every stop
/// pair served by the same set of routes and directions shares one value.
pub struct HeadwayCalculator<'a> {
    provider: &'a dyn ScheduleProvider,
    window: MiddayWindow,
    route_headways: HeadwayCache<String>,
    combined: HeadwayCache<RouteSignature>,
}

impl<'a> HeadwayCalculator<'a> {
    pub fn new(provider: &'a dyn ScheduleProvider, window: MiddayWindow) -> Self {
        Self {
            provider,
            window,
            route_headways: HeadwayCache::new(),
            combined: HeadwayCache::new(),
        }
    }

    pub fn combined_midday_headway(
        &mut self,
        key: &StopPairKey,
        tags: &[RouteTag],
    ) -> Result<Option<Duration>> {
        let signature = RouteSignature::from_tags(tags);
        self.combined_for_signature(key, &signature, tags)
    }

    /// Like [`Self::combined_midday_headway`] with a precomputed signature.
    ///
    /// A signature evaluated before answers from the cache, whichever stop
    /// pair first produced it.
    pub fn combined_for_signature(
        &mut self,
        key: &StopPairKey,
        signature: &RouteSignature,
        tags: &[RouteTag],
    ) -> Result<Option<Duration>> {
        if let Some(cached) = self.combined.lookup(signature) {
            return Ok(cached);
        }

        let mut times = Vec::new();
        for tag in tags {
            let arrivals = self.weekday_arrivals(tag, &key.downstream)?;
            if !self.route_headways.contains_key(tag.route.as_str()) {
                let headway = max_headway(&self.window.slice(arrivals.iter().copied()));
                tracing::trace!("route {} headway at {}: {:?}", tag.route, key, headway);
                self.route_headways.record(tag.route.clone(), headway);
            }
            times.extend(arrivals);
        }

        let headway = max_headway(&self.window.slice(times));
        Ok(self.combined.record(signature.clone(), headway))
    }

    /// Arrival times at `stop` of the tag's trips that run every weekday
    pub fn weekday_arrivals(&self, tag: &RouteTag, stop: &StopIdentifier) -> Result<Vec<TimeOfDay>> {
        let route = self.provider.route(&tag.route)?;
        let mut arrivals = Vec::new();
        for trip in route
            .trips()
            .iter()
            .filter(|trip| trip.direction_id() == Some(tag.direction))
        {
            let service = self.provider.service(trip.service_id())?;
            if !service.runs_every_weekday() {
                continue;
            }
            if let Some(arrival) = trip.arrival_at(stop) {
                arrivals.push(arrival);
            }
        }
        Ok(arrivals)
    }

    pub fn route_headways(&self) -> &HeadwayCache<String> {
        &self.route_headways
    }

    pub fn combined_headways(&self) -> &HeadwayCache<RouteSignature> {
        &self.combined
    }

    pub fn into_route_headways(self) -> HeadwayCache<String> {
        self.route_headways
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use frequent_transit::DirectionId::{Inbound, Outbound};
    use frequent_transit::StaticScheduleProvider;

    fn mins(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    #[test]
    fn test_window_is_exclusive() {
        let window = MiddayWindow::default();
        assert!(!window.contains(TimeOfDay::from_hms(10, 0, 0)));
        assert!(window.contains(TimeOfDay::from_hms(10, 0, 1)));
        assert!(window.contains(TimeOfDay::from_hms(13, 59, 59)));
        assert!(!window.contains(TimeOfDay::from_hms(14, 0, 0)));
    }

    #[test]
    fn test_max_headway() {
        assert_eq!(max_headway(&[]), None);
        assert_eq!(max_headway(&[minutes(600)]), None);
        assert_eq!(
            max_headway(&[minutes(600), minutes(610), minutes(640), minutes(650)]),
            Some(mins(30))
        );
        assert_eq!(max_headway(&[minutes(700), minutes(700)]), Some(Duration::ZERO));
    }

    #[test]
    fn test_cache_keeps_first_value() {
        let mut cache: HeadwayCache<String> = HeadwayCache::new();
        assert_eq!(cache.record("1".into(), None), None);
        assert_eq!(cache.record("1".into(), Some(mins(5))), None);
        assert_eq!(cache.lookup("1"), Some(None));
        assert_eq!(cache.lookup("2"), None);

        cache.record("2".into(), Some(mins(12)));
        assert_eq!(cache.headway("2"), Some(mins(12)));
        let keys: Vec<&String> = cache.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    /// Three routes through A -> B outbound and B -> A inbound, arrival
    /// minutes at B (outbound) chosen by hand.
    fn three_route_schedule() -> StaticScheduleProvider {
        ScheduleBuilder::new()
            .route("1", |r| {
                r.trip(Outbound, WEEKDAY, &[("A", 595), ("B", 600)]) // 10:00, excluded
                    .trip(Outbound, WEEKDAY, &[("A", 605), ("B", 610)])
                    .trip(Outbound, WEEKDAY, &[("A", 655), ("B", 660)])
                    .trip(Inbound, WEEKDAY, &[("B", 600), ("A", 605)])
                    .trip(Inbound, WEEKDAY, &[("B", 640), ("A", 645)])
            })
            .route("2", |r| {
                r.trip(Outbound, WEEKDAY, &[("A", 620), ("B", 625)])
                    .trip(Outbound, WEEKDAY, &[("A", 675), ("B", 680)])
                    .trip(Outbound, SATURDAY, &[("A", 640), ("B", 645)])
                    .trip(Inbound, WEEKDAY, &[("B", 610), ("A", 615)])
            })
            .route("3", |r| {
                r.trip(Outbound, MON_THU, &[("A", 630), ("B", 635)])
                    .trip(Outbound, WEEKDAY, &[("A", 695), ("B", 700)])
                    .trip(Outbound, WEEKDAY, &[("A", 835), ("B", 840)]) // 14:00, excluded
                    .trip(Inbound, WEEKDAY, &[("B", 700), ("A", 705)])
            })
            .build()
    }

    #[test]
    fn test_combined_headway_is_max_gap_over_union() {
        let schedule = three_route_schedule();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());
        let tags = [
            RouteTag::new("1", Outbound),
            RouteTag::new("2", Outbound),
            RouteTag::new("3", Outbound),
        ];

        // qualifying arrivals at B: 610, 625, 660, 680, 700
        let headway = calculator
            .combined_midday_headway(&pair("A", "B"), &tags)
            .unwrap();
        assert_eq!(headway, Some(mins(35)));

        // per-route side effect: 1 -> [610, 660], 2 -> [625, 680], 3 -> [700]
        let routes = calculator.route_headways();
        assert_eq!(routes.headway("1"), Some(mins(50)));
        assert_eq!(routes.headway("2"), Some(mins(55)));
        assert_eq!(routes.lookup("3"), Some(None));
    }

    #[test]
    fn test_inbound_tags_use_inbound_trips() {
        let schedule = three_route_schedule();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());
        let tags = [RouteTag::new("1", Inbound), RouteTag::new("2", Inbound)];

        // arrivals at A: 605, 645 (route 1), 615 (route 2)
        let headway = calculator
            .combined_midday_headway(&pair("B", "A"), &tags)
            .unwrap();
        assert_eq!(headway, Some(mins(30)));
    }

    #[test]
    fn test_undefined_with_fewer_than_two_times() {
        let schedule = three_route_schedule();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());

        let headway = calculator
            .combined_midday_headway(&pair("B", "A"), &[RouteTag::new("3", Inbound)])
            .unwrap();
        assert_eq!(headway, None);
        assert_eq!(calculator.combined_headways().len(), 1);
    }

    #[test]
    fn test_signature_cache_answers_later_pairs() {
        let schedule = ScheduleBuilder::new()
            .route("7", |r| {
                // short turns every 10 minutes, one trip in three continues to C
                r.every(Outbound, WEEKDAY, &["A", "B"], (600, 840), 10, 1)
                    .every(Outbound, WEEKDAY, &["A", "B", "C"], (605, 835), 30, 1)
            })
            .build();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());
        let tags = [RouteTag::new("7", Outbound)];

        let first = calculator.combined_midday_headway(&pair("A", "B"), &tags).unwrap();
        let second = calculator.combined_midday_headway(&pair("B", "C"), &tags).unwrap();

        assert_eq!(first, Some(mins(10)));
        // C alone is served every 30 minutes, but the signature is already cached
        assert_eq!(second, first);
        assert_eq!(calculator.combined_headways().len(), 1);
        assert_eq!(calculator.route_headways().headway("7"), Some(mins(10)));
    }

    #[test]
    fn test_unknown_service_is_fatal() {
        let schedule = ScheduleBuilder::new()
            .route("X", |r| {
                r.trip(Outbound, "holiday", &[("A", 600), ("B", 610)])
                    .trip(Inbound, WEEKDAY, &[("B", 600), ("A", 610)])
            })
            .build();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());

        let result =
            calculator.combined_midday_headway(&pair("A", "B"), &[RouteTag::new("X", Outbound)]);
        assert!(result.is_err());
    }
}
