use anyhow::{Context, Result};
use frequent_core::{route_label, Chain, FrequentMap};
use frequent_transit::{DirectionId, ScheduleProvider};
use geo::Point;

/// Segments between text labels along a labelled polyline
const LABEL_SPACING: usize = 5;

/// A chain resolved to coordinates, ready to draw.
pub struct Polyline<'a> {
    pub chain: &'a Chain,
    pub label: String,
    pub points: Vec<Point>,
}

impl Polyline<'_> {
    /// Whether the chain gets text labels along it. Only one direction of a
    /// corridor is labelled so the text is not drawn twice.
    pub fn wants_labels(&self) -> bool {
        self.chain
            .tags
            .first()
            .is_some_and(|tag| tag.direction == DirectionId::Inbound)
    }

    /// Midpoints of every fifth segment, starting with the first
    pub fn label_points(&self) -> Vec<Point> {
        self.points
            .windows(2)
            .step_by(LABEL_SPACING)
            .map(|w| Point::new((w[0].x() + w[1].x()) / 2.0, (w[0].y() + w[1].y()) / 2.0))
            .collect()
    }
}

pub fn resolve_polylines<'a>(
    map: &'a FrequentMap,
    provider: &dyn ScheduleProvider,
) -> Result<Vec<Polyline<'a>>> {
    map.chains
        .iter()
        .map(|chain| {
            let points = chain
                .stops
                .iter()
                .map(|id| provider.stop(id).map(|stop| stop.location()))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Failed to place polyline {}-{}", chain.left, chain.right))?;
            Ok(Polyline {
                chain,
                label: route_label(&chain.tags, &map.route_headways),
                points,
            })
        })
        .collect()
}
