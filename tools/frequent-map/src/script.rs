//! Google Maps script output: a self-invoking `initMap()` that draws every
//! polyline onto a `map` element.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geo::Point;

use crate::polyline::Polyline;

fn lat_lng(point: &Point) -> String {
    format!("{{lat:{}, lng:{}}}", point.y(), point.x())
}

/// Label as a JavaScript string literal
fn js_string(text: &str) -> Result<String> {
    serde_json::to_string(text).context("Failed to escape label")
}

fn write_polyline<W: Write>(out: &mut W, index: usize, polyline: &Polyline, labels: bool) -> Result<()> {
    let var = format!("chain{index}");
    let path: Vec<String> = polyline.points.iter().map(lat_lng).collect();
    let label = js_string(&polyline.label)?;

    writeln!(
        out,
        "        var {var} = new google.maps.Polyline({{path: [{}],geodesic: true,strokeColor: '#FF0000',strokeOpacity: 1.0,strokeWeight: 5 }});",
        path.join(",")
    )?;
    writeln!(out, "        {var}.setMap(map);")?;
    writeln!(out, "        var info{var} = new google.maps.InfoWindow({{content: {label}}});")?;
    writeln!(
        out,
        "        {var}.addListener('mouseover', function(e) {{ info{var}.open(map, {var}); info{var}.setPosition(e.latLng); }});"
    )?;
    writeln!(out, "        {var}.addListener('mouseout', function(e) {{ info{var}.close(); }});")?;

    if labels && polyline.wants_labels() {
        for point in polyline.label_points() {
            writeln!(
                out,
                "        new MapLabel({{text: {label}, position: new google.maps.LatLng({}, {}), map: map, fontSize: 8, align: 'center', zIndex: 15}}).setMap(map);",
                point.y(),
                point.x()
            )?;
        }
    }
    Ok(())
}

pub fn write_script<W: Write>(mut out: W, polylines: &[Polyline], center: Point, labels: bool) -> Result<()> {
    writeln!(out, "var map;")?;
    writeln!(out, "function initMap() {{")?;
    writeln!(
        out,
        "    map = new google.maps.Map(document.getElementById('map'), {{center: {}, zoom: 12}});",
        lat_lng(&center)
    )?;
    for (index, polyline) in polylines.iter().enumerate() {
        write_polyline(&mut out, index, polyline, labels)?;
    }
    writeln!(out, "}}")?;
    writeln!(out, "initMap();")?;
    out.flush()?;
    Ok(())
}

pub fn write_script_file(polylines: &[Polyline], center: Point, labels: bool, path: &Path) -> Result<()> {
    tracing::info!("Writing {} polylines to {}", polylines.len(), path.display());
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_script(BufWriter::new(file), polylines, center, labels)
        .with_context(|| format!("Failed to write map script to {}", path.display()))
}
