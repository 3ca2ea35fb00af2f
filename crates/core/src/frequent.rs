use crate::chain::Chain;
use crate::config::FrequencyConfig;
use crate::error::Result;
use crate::headway::HeadwayCalculator;
use crate::segment::SegmentIndex;
use crate::signature::RouteSignature;

/// Stop pairs whose combined midday headway passes the threshold, as
/// uncontracted edges in index order.
pub fn frequent_edges(
    index: &SegmentIndex,
    calculator: &mut HeadwayCalculator<'_>,
    config: &FrequencyConfig,
) -> Result<Vec<Chain>> {
    let total = index.len();
    let mut edges = Vec::new();

    for (n, (key, tags)) in index.iter().enumerate() {
        if n % 500 == 0 {
            tracing::debug!("Checking stop pair {}/{}", n, total);
        }

        let signature = RouteSignature::from_tags(tags);
        let headway = calculator.combined_for_signature(key, &signature, tags)?;
        if config.is_frequent(headway) {
            edges.push(Chain::edge(key, signature, tags.to_vec()));
        }
    }

    tracing::info!(
        "Segments indexed, {} unique schedules, {} of {} stop pairs frequent",
        calculator.combined_headways().len(),
        edges.len(),
        total
    );
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::headway::MiddayWindow;
    use crate::segment::StopPairIndexer;
    use crate::testing::*;
    use frequent_transit::DirectionId::{Inbound, Outbound};

    #[test]
    fn test_keeps_only_pairs_within_threshold() {
        let schedule = ScheduleBuilder::new()
            .route("fast", |r| {
                r.every(Outbound, WEEKDAY, &["A", "B"], (540, 900), 10, 2)
                    .every(Inbound, WEEKDAY, &["B", "A"], (540, 900), 10, 2)
            })
            .route("slow", |r| {
                r.every(Outbound, WEEKDAY, &["C", "D"], (540, 900), 30, 2)
                    .every(Inbound, WEEKDAY, &["D", "C"], (540, 900), 30, 2)
            })
            .build();
        let index = StopPairIndexer::new(&schedule)
            .index_routes(&["fast", "slow"])
            .unwrap();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());
        let config = FrequencyConfig::default().with_max_headway(Duration::from_secs(15 * 60));

        let edges = frequent_edges(&index, &mut calculator, &config).unwrap();

        let keys: Vec<String> = edges
            .iter()
            .map(|e| format!("{}-{}", e.left, e.right))
            .collect();
        assert_eq!(keys, vec!["A-B", "B-A"]);
        assert!(edges.iter().all(|e| e.stops.is_empty()));
        assert_eq!(edges[0].signature.as_str(), "fast#0-");
    }

    #[test]
    fn test_default_threshold_rejects_ten_minute_service() {
        let schedule = ScheduleBuilder::new()
            .route("fast", |r| {
                r.every(Outbound, WEEKDAY, &["A", "B"], (540, 900), 10, 2)
                    .every(Inbound, WEEKDAY, &["B", "A"], (540, 900), 10, 2)
            })
            .build();
        let index = StopPairIndexer::new(&schedule).index_routes(&["fast"]).unwrap();
        let mut calculator = HeadwayCalculator::new(&schedule, MiddayWindow::default());

        let edges = frequent_edges(&index, &mut calculator, &FrequencyConfig::default()).unwrap();

        assert!(edges.is_empty());
    }
}
