use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use std::path::Path;

use crate::polyline::Polyline;

/// Convert a polyline to a GeoJSON Feature with its routes as properties
fn polyline_to_feature(polyline: &Polyline) -> Feature {
    let line: Vec<Vec<f64>> = polyline.points.iter().map(|p| vec![p.x(), p.y()]).collect();
    let chain = polyline.chain;
    let routes: Vec<String> = chain.tags.iter().map(ToString::to_string).collect();

    let mut properties = serde_json::Map::new();
    properties.insert("label".to_string(), serde_json::json!(polyline.label));
    properties.insert("routes".to_string(), serde_json::json!(routes));
    properties.insert("signature".to_string(), serde_json::json!(chain.signature.as_str()));
    properties.insert("left".to_string(), serde_json::json!(chain.left.as_str()));
    properties.insert("right".to_string(), serde_json::json!(chain.right.as_str()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn polylines_to_collection(polylines: &[Polyline]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: polylines.iter().map(polyline_to_feature).collect(),
        foreign_members: None,
    }
}

/// Write polylines to a GeoJSON file (each polyline as separate feature)
pub fn write_polylines_geojson(polylines: &[Polyline], output_path: &Path) -> Result<()> {
    tracing::info!("Writing {} polylines to {}", polylines.len(), output_path.display());

    let geojson = GeoJson::from(polylines_to_collection(polylines));
    let json_string = serde_json::to_string_pretty(&geojson).context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(())
}
