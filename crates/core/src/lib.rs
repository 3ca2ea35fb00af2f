//! Frequent-service corridor detection over a transit schedule.
//!
//! A run traces one representative trip per route and direction into a
//! [`SegmentIndex`] of stop pairs, computes each pair's combined midday
//! headway, keeps the pairs at or under the configured threshold and
//! contracts them into polylines ([`Chain`]s) of uniform route signature.

pub mod cache;
pub mod chain;
pub mod config;
pub mod error;
pub mod frequent;
pub mod headway;
pub mod label;
pub mod natural;
pub mod pipeline;
pub mod segment;
pub mod signature;

#[cfg(test)]
mod testing;

pub use chain::{Chain, ChainContractor};
pub use config::{DEFAULT_MAX_HEADWAY, FrequencyConfig};
pub use error::{FrequencyError, Result};
pub use frequent::frequent_edges;
pub use headway::{HeadwayCache, HeadwayCalculator, MiddayWindow};
pub use label::route_label;
pub use natural::{natural_cmp, sort_naturally};
pub use pipeline::{FrequencyPipeline, FrequentMap};
pub use segment::{SegmentIndex, StopPairIndexer, StopPairKey};
pub use signature::{RouteSignature, RouteTag};

// Re-export the schedule model
pub use frequent_transit as transit;
