use std::cmp::Ordering;
use std::fmt;

use frequent_transit::DirectionId;
use serde::{Deserialize, Serialize};

use crate::natural::natural_cmp;

/// One route running in one direction over a stop pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteTag {
    pub route: String,
    pub direction: DirectionId,
}

impl RouteTag {
    pub fn new(route: impl Into<String>, direction: DirectionId) -> Self {
        Self {
            route: route.into(),
            direction,
        }
    }

    /// Route name in natural order, then direction
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.route, &other.route).then(self.direction.cmp(&other.direction))
    }
}

impl fmt::Display for RouteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.route, self.direction)
    }
}

/// Canonical key of a set of [`RouteTag`]s.
///
/// Two stop pairs (or chains) share a signature exactly when the same routes
/// serve them in the same directions, regardless of the order the tags were
/// collected in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteSignature(String);

impl RouteSignature {
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a RouteTag>) -> Self {
        let mut tags: Vec<&RouteTag> = tags.into_iter().collect();
        tags.sort_by(|a, b| a.canonical_cmp(b));
        tags.dedup();

        let mut key = String::new();
        for tag in tags {
            key.push_str(&tag.to_string());
            key.push('-');
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
