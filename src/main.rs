extern crate log;
pub mod blockface;
pub mod geofile;
pub mod geograph;
pub mod meters;
pub mod osm;
use crate::blockface::assembly::{compute_blockfaces, BlockfaceParams};
use crate::blockface::geometry::blockface_feature;
use crate::geofile::feature::Feature;
use crate::meters::matcher::MatchParams;
use crate::meters::record::{read_meters_from_csv, MeterRecord};
use crate::osm::primitives::OsmData;
use anyhow::anyhow;
use clap::Parser;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::PathBuf;
use std::{fs::read_to_string, path::Path};

/// Match parking meters to OpenStreetMap streets and draw their blockfaces.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: String,
}

#[derive(Deserialize, Debug)]
enum OsmSourceConfig {
    Xml { filepath: PathBuf },
    OverpassJson { filepath: PathBuf },
}

#[derive(Deserialize, Debug)]
struct Config {
    osm_source: OsmSourceConfig,
    meters_filepath: PathBuf,
    output_filepath: PathBuf,
    /// Only process the meter with this pole identifier.
    #[serde(default)]
    target_pole: Option<String>,
    #[serde(default)]
    matching: MatchParams,
    #[serde(default)]
    blockface: BlockfaceParams,
}

fn read_osm_data(osm_source: &OsmSourceConfig) -> anyhow::Result<OsmData> {
    match osm_source {
        OsmSourceConfig::Xml { filepath } => {
            log::info!("Reading OSM XML from {:?}", filepath);
            osm::conversion::read_osm_xml(filepath)
        }
        OsmSourceConfig::OverpassJson { filepath } => {
            log::info!("Reading Overpass JSON from {:?}", filepath);
            osm::conversion::read_overpass_json(filepath)
        }
    }
}

fn read_meters(config: &Config) -> anyhow::Result<Vec<MeterRecord>> {
    log::info!("Reading meters from {:?}", config.meters_filepath);
    let mut meters = read_meters_from_csv(&config.meters_filepath)?;
    if let Some(target_pole) = &config.target_pole {
        meters.retain(|meter| &meter.pole == target_pole);
        log::info!("Kept {} meters with pole {}", meters.len(), target_pole);
    }
    Ok(meters)
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    if !Path::new(&args.config_filepath).exists() {
        return Err(anyhow!("Config file {} not found", &args.config_filepath));
    }
    let config_contents = read_to_string(args.config_filepath)?;
    let config: Config = serde_yaml::from_str(&config_contents)?;
    config.blockface.validate()?;

    let osm_data = read_osm_data(&config.osm_source)?;
    log::info!(
        "Read {} nodes and {} ways",
        osm_data.nodes().len(),
        osm_data.ways().len()
    );
    let meters = read_meters(&config)?;
    log::info!("Read {} meters", meters.len());

    let blockfaces =
        compute_blockfaces(&osm_data, &meters, &config.matching, &config.blockface);
    let features: Vec<Feature> = blockfaces
        .par_iter()
        .filter_map(|blockface| blockface_feature(blockface, config.blockface.ribbon_width))
        .collect();
    log::info!(
        "{} of {} blockfaces are too short to draw",
        blockfaces.len() - features.len(),
        blockfaces.len()
    );
    geofile::geojson::write_features_to_geojson(&features, &config.output_filepath)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
