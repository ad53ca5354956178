//! Command-line neighbourhood lookup.
//!
//! Loads the boundary dataset (and optionally the legacy code crosswalk),
//! resolves one coordinate, and prints the record the downstream API expects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hood140::NeighbourhoodResolver;

#[derive(Parser, Debug)]
#[command(name = "locate")]
#[command(about = "Resolve a latitude/longitude to a Toronto neighbourhood")]
struct Args {
    /// Boundary dataset file (extracted JSON)
    #[arg(short, long)]
    dataset: PathBuf,

    /// Optional legacy code crosswalk file (158 -> 140 scheme)
    #[arg(long)]
    crosswalk: Option<PathBuf>,

    /// Latitude (WGS84 degrees)
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude (WGS84 degrees)
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(rename = "HOOD_140")]
    code: &'a str,
    #[serde(rename = "NEIGHBOURHOOD_140")]
    name: &'a str,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Coordinate range validation is the boundary's job, not the resolver's
    if !(-90.0..=90.0).contains(&args.lat) {
        anyhow::bail!("latitude {} is out of range [-90, 90]", args.lat);
    }
    if !(-180.0..=180.0).contains(&args.lon) {
        anyhow::bail!("longitude {} is out of range [-180, 180]", args.lon);
    }

    let resolver = NeighbourhoodResolver::from_files(&args.dataset, args.crosswalk.as_ref())
        .context("failed to build neighbourhood resolver")?;

    info!(
        "Resolver ready: {} regions indexed",
        resolver.index().len()
    );

    let resolution = resolver.resolve(args.lat, args.lon);
    let (code, name) = resolution.as_pair();

    println!("{}", serde_json::to_string(&Output { code, name })?);

    Ok(())
}
