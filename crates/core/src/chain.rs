//! Contraction of frequent stop-pair edges into maximal polylines.

use std::collections::HashMap;

use frequent_transit::StopIdentifier;
use serde::{Deserialize, Serialize};

use crate::segment::StopPairKey;
use crate::signature::{RouteSignature, RouteTag};

/// A frequent segment: a single stop-pair edge before contraction, a
/// polyline of merged edges after.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub left: StopIdentifier,
    pub right: StopIdentifier,
    pub signature: RouteSignature,
    pub tags: Vec<RouteTag>,
    /// Stops from `left` to `right`, both included. Empty on uncontracted edges.
    pub stops: Vec<StopIdentifier>,
}

impl Chain {
    pub fn edge(key: &StopPairKey, signature: RouteSignature, tags: Vec<RouteTag>) -> Self {
        Self {
            left: key.upstream.clone(),
            right: key.downstream.clone(),
            signature,
            tags,
            stops: Vec::new(),
        }
    }

    /// Endpoint across the edge from `stop`
    fn other_end(&self, stop: &StopIdentifier) -> &StopIdentifier {
        if &self.left == stop { &self.right } else { &self.left }
    }
}

/// Greedy merger of frequent edges sharing an endpoint and a signature.
///
/// Edges are consumed in pool order: the first unconsumed edge seeds a
/// chain, which grows leftward and then rightward, each step taking the
/// earliest unconsumed pool edge with the chain's signature at the frontier
/// stop. At a branch the earliest edge wins, so the result is not
/// guaranteed to contain the longest possible chains.
pub struct ChainContractor {
    pool: Vec<Chain>,
    consumed: Vec<bool>,
    remaining: usize,
    /// (stop, signature) -> pool positions touching that stop, ascending
    adjacency: HashMap<(StopIdentifier, RouteSignature), Vec<usize>>,
}

impl ChainContractor {
    pub fn new(pool: Vec<Chain>) -> Self {
        let mut adjacency: HashMap<(StopIdentifier, RouteSignature), Vec<usize>> = HashMap::new();
        for (idx, edge) in pool.iter().enumerate() {
            adjacency
                .entry((edge.left.clone(), edge.signature.clone()))
                .or_default()
                .push(idx);
            if edge.right != edge.left {
                adjacency
                    .entry((edge.right.clone(), edge.signature.clone()))
                    .or_default()
                    .push(idx);
            }
        }

        Self {
            consumed: vec![false; pool.len()],
            remaining: pool.len(),
            pool,
            adjacency,
        }
    }

    /// Consume the whole pool, returning chains in seed order.
    pub fn contract(mut self) -> Vec<Chain> {
        tracing::info!("Collating {} frequent segments...", self.pool.len());

        let mut chains = Vec::new();
        let mut seed = 0;
        while self.remaining > 0 {
            while self.consumed[seed] {
                seed += 1;
            }
            self.take(seed);
            chains.push(self.extend(seed));
        }

        tracing::info!("{} polylines generated", chains.len());
        chains
    }

    fn take(&mut self, idx: usize) {
        debug_assert!(!self.consumed[idx]);
        self.consumed[idx] = true;
        self.remaining -= 1;
    }

    /// Earliest unconsumed edge with `signature` touching `stop`
    fn find(&self, stop: &StopIdentifier, signature: &RouteSignature) -> Option<usize> {
        self.adjacency
            .get(&(stop.clone(), signature.clone()))?
            .iter()
            .copied()
            .find(|idx| !self.consumed[*idx])
    }

    /// Walk from `stop` across matching edges, returning the stops reached
    /// in walk order.
    fn walk(&mut self, mut stop: StopIdentifier, signature: &RouteSignature) -> Vec<StopIdentifier> {
        let mut reached = Vec::new();
        while let Some(idx) = self.find(&stop, signature) {
            self.take(idx);
            stop = self.pool[idx].other_end(&stop).clone();
            reached.push(stop.clone());
        }
        reached
    }

    fn extend(&mut self, seed: usize) -> Chain {
        let Chain {
            left,
            right,
            signature,
            tags,
            ..
        } = self.pool[seed].clone();

        let leftward = self.walk(left.clone(), &signature);
        let rightward = self.walk(right.clone(), &signature);

        let mut stops = Vec::with_capacity(leftward.len() + rightward.len() + 2);
        stops.extend(leftward.iter().rev().cloned());
        stops.push(left.clone());
        stops.push(right.clone());
        stops.extend(rightward.iter().cloned());

        Chain {
            left: leftward.last().cloned().unwrap_or(left),
            right: rightward.last().cloned().unwrap_or(right),
            signature,
            tags,
            stops,
        }
    }
}
