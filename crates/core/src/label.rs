use itertools::Itertools;

use crate::headway::HeadwayCache;
use crate::natural::sort_naturally;
use crate::signature::RouteTag;

const NAMES_PER_LINE: usize = 5;

/// Display label of a chain: its route names with a defined midday headway,
/// in natural order, five per line.
pub fn route_label(tags: &[RouteTag], route_headways: &HeadwayCache<String>) -> String {
    let mut names: Vec<&str> = tags
        .iter()
        .map(|tag| tag.route.as_str())
        .filter(|route| route_headways.headway(*route).is_some())
        .unique()
        .collect();
    sort_naturally(&mut names);

    names
        .chunks(NAMES_PER_LINE)
        .map(|line| line.join(", "))
        .join(",\n")
}
