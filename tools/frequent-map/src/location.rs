use anyhow::{bail, Result};
use geo::Point;

/// Known agencies and the map center used for each.
const AGENCY_CENTERS: &[(&str, f64, f64)] = &[
    ("Port Authority of Allegheny County", 40.4486904, -79.9433273),
    ("Miami Dade Transit", 25.7084636, -80.2051862),
    ("Spokane Transit Authority", 47.6727552, -117.4183375),
    ("San Francisco Municipal Transportation Agency", 37.760665, -122.4640383),
    ("Central Ohio Transit Authority", 39.9986493, -82.9825982),
    ("Regional Transit System", 29.6772486, -82.3293686),
];

/// Latitude/longitude of a known agency
pub fn agency_center(agency: &str) -> Option<Point> {
    AGENCY_CENTERS
        .iter()
        .find(|(name, _, _)| *name == agency)
        .map(|(_, lat, lng)| Point::new(*lng, *lat))
}

/// Map center from `--loc LAT LONG` if given, else from the agency table.
pub fn resolve_center(explicit: Option<&[f64]>, agency: Option<&str>) -> Result<Point> {
    if let Some(loc) = explicit {
        let [lat, lng] = loc else {
            bail!("--loc takes a latitude and a longitude, got {} values", loc.len());
        };
        return Ok(Point::new(*lng, *lat));
    }

    match agency {
        Some(name) => match agency_center(name) {
            Some(center) => Ok(center),
            None => bail!("No map center known for agency {name:?}, pass --loc LAT LONG"),
        },
        None => bail!("Schedule names no agency, pass --loc LAT LONG"),
    }
}
