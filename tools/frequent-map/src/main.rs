use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use frequent_core::{FrequencyConfig, FrequencyPipeline, FrequentMap};
use frequent_transit::{ScheduleProvider, StaticScheduleProvider};
use std::path::PathBuf;
use std::time::Duration;

mod location;
mod output;
mod polyline;
mod script;

use location::resolve_center;
use output::write_polylines_geojson;
use polyline::resolve_polylines;
use script::write_script_file;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Google Maps script to be included in a map page
    Js,
    /// GeoJSON FeatureCollection of line strings
    Geojson,
}

#[derive(Parser, Debug)]
#[command(
    name = "frequent-map",
    author,
    version,
    about = "Creates a frequent transit map from GTFS data",
    long_about = "Finds the stretches of a transit network where the routes serving each \
                  pair of consecutive stops, taken together, arrive at least every few \
                  minutes through the weekday midday, and draws them as polylines.\n\n\
                  Computed corridors can be cached with --cache and redrawn later with \
                  --draw without recomputing headways."
)]
struct Args {
    /// GTFS feed (zip archive or directory)
    input: PathBuf,

    /// Output file (.js map script or .geojson)
    output: PathBuf,

    /// Latitude and longitude of the map center
    #[arg(long, num_args = 2, value_names = ["LAT", "LONG"], allow_negative_numbers = true)]
    loc: Option<Vec<f64>>,

    /// Cache frequent segments to this file
    #[arg(short, long, value_name = "CACHE")]
    cache: Option<PathBuf>,

    /// Read frequent segments from this cache instead of computing them
    #[arg(short, long, value_name = "CACHE")]
    draw: Option<PathBuf>,

    /// Add text labels along map routes
    #[arg(short, long)]
    label: bool,

    /// Only analyse this route (repeatable)
    #[arg(short, long = "route", value_name = "NAME")]
    routes: Vec<String>,

    /// Largest combined midday headway, in seconds, that counts as frequent
    #[arg(long, value_name = "SECONDS")]
    max_headway_secs: Option<u64>,

    /// JSON file with analysis settings (midday window, threshold)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Js)]
    format: Format,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<FrequencyConfig> {
    let mut config = match &args.config {
        Some(path) => FrequencyConfig::from_json_file(path)?,
        None => FrequencyConfig::default(),
    };
    if let Some(secs) = args.max_headway_secs {
        config = config.with_max_headway(Duration::from_secs(secs));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .without_time()
        .with_target(false)
        .init();

    tracing::info!("=== Frequent Transit Map ===");
    tracing::info!("Input: {}", args.input.display());
    tracing::info!("Output: {}", args.output.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let config = load_config(&args)?;

    // Phase 1: Load schedule
    tracing::info!("Phase 1: Loading schedule...");
    let schedule = StaticScheduleProvider::from_gtfs_path(&args.input)
        .with_context(|| format!("Failed to load GTFS from {}", args.input.display()))?;
    tracing::info!(
        "  {} routes, {} stops",
        schedule.route_count(),
        schedule.stop_count()
    );

    let center = resolve_center(args.loc.as_deref(), schedule.agency_name())?;
    tracing::info!("  Map center: {}, {}", center.y(), center.x());

    // Phase 2: Frequent corridors, computed or read back
    let map = if let Some(cache_path) = &args.draw {
        tracing::info!("Phase 2: Reading frequent routes from {}...", cache_path.display());
        FrequentMap::load(cache_path)?
    } else {
        tracing::info!("Phase 2: Computing frequent corridors...");
        let routes = (!args.routes.is_empty()).then_some(args.routes.as_slice());
        FrequencyPipeline::new(&schedule, config)
            .run(routes)
            .context("Failed to compute frequent corridors")?
    };

    if let Some(cache_path) = &args.cache {
        tracing::info!("  Caching frequent routes into {}...", cache_path.display());
        map.save(cache_path)?;
    }

    // Phase 3: Write output
    tracing::info!("Phase 3: Writing output...");
    let polylines = resolve_polylines(&map, &schedule)?;
    match args.format {
        Format::Js => write_script_file(&polylines, center, args.label, &args.output)?,
        Format::Geojson => write_polylines_geojson(&polylines, &args.output)?,
    }

    tracing::info!("Output written to: {}", args.output.display());
    tracing::info!("Done!");

    Ok(())
}
