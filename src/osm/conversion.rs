extern crate osm_xml as osm;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use super::primitives::{Node, OsmData, Way, WayTags};

/// Read nodes and ways from an OSM XML file.
pub fn read_osm_xml(filepath: &Path) -> anyhow::Result<OsmData> {
    let infile = std::fs::File::open(filepath)
        .with_context(|| format!("Opening OSM file {:?}", filepath))?;
    let data = osm::OSM::parse(infile)?;
    let nodes = data
        .nodes
        .values()
        .map(|node| Node::new(node.id, node.lat, node.lon))
        .collect();
    let ways = data.ways.values().map(osm_way_to_way).collect();
    Ok(OsmData::new(nodes, ways))
}

fn osm_way_to_way(way: &osm::Way) -> Way {
    let nodes = way
        .nodes
        .iter()
        .filter_map(|reference| match reference {
            osm::UnresolvedReference::Node(id) => Some(*id),
            _ => None,
        })
        .collect();
    let tag_value = |key: &str| {
        way.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.val.clone())
    };
    Way {
        id: way.id,
        nodes,
        tags: WayTags {
            highway: tag_value("highway"),
            name: tag_value("name"),
        },
    }
}

#[derive(Deserialize, Debug)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node(Node),
    Way(Way),
    #[serde(other)]
    Other,
}

/// Read nodes and ways from a file holding an Overpass API response in JSON format.
pub fn read_overpass_json(filepath: &Path) -> anyhow::Result<OsmData> {
    let contents = std::fs::read_to_string(filepath)
        .with_context(|| format!("Reading Overpass JSON file {:?}", filepath))?;
    parse_overpass_json(&contents)
}

pub fn parse_overpass_json(contents: &str) -> anyhow::Result<OsmData> {
    let response: OverpassResponse =
        serde_json::from_str(contents).context("Parsing Overpass JSON")?;
    let mut nodes = Vec::new();
    let mut ways = Vec::new();
    for element in response.elements {
        match element {
            OverpassElement::Node(node) => nodes.push(node),
            OverpassElement::Way(way) => ways.push(way),
            OverpassElement::Other => {}
        }
    }
    log::debug!("Parsed {} nodes and {} ways", nodes.len(), ways.len());
    Ok(OsmData::new(nodes, ways))
}
