//! End-to-end frequent-corridor computation.

use frequent_transit::ScheduleProvider;
use serde::{Deserialize, Serialize};

use crate::chain::{Chain, ChainContractor};
use crate::config::FrequencyConfig;
use crate::error::Result;
use crate::frequent::frequent_edges;
use crate::headway::{HeadwayCache, HeadwayCalculator};
use crate::segment::StopPairIndexer;

/// Contracted frequent corridors plus the per-route headways needed to label
/// them. This is what gets persisted between runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequentMap {
    pub chains: Vec<Chain>,
    pub route_headways: HeadwayCache<String>,
}

pub struct FrequencyPipeline<'a> {
    provider: &'a dyn ScheduleProvider,
    config: FrequencyConfig,
}

impl<'a> FrequencyPipeline<'a> {
    pub fn new(provider: &'a dyn ScheduleProvider, config: FrequencyConfig) -> Self {
        Self { provider, config }
    }

    /// Index, filter and contract. `route_names` defaults to every route of
    /// the schedule.
    pub fn run(&self, route_names: Option<&[String]>) -> Result<FrequentMap> {
        let names = match route_names {
            Some(names) => names.to_vec(),
            None => self.provider.route_names(),
        };

        let index = StopPairIndexer::new(self.provider).index_routes(names.as_slice())?;

        let mut calculator = HeadwayCalculator::new(self.provider, self.config.midday);
        let edges = frequent_edges(&index, &mut calculator, &self.config)?;
        let chains = ChainContractor::new(edges).contract();

        Ok(FrequentMap {
            chains,
            route_headways: calculator.into_route_headways(),
        })
    }
}
