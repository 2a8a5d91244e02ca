use std::collections::HashMap;

use serde::Deserialize;

/// Identifier of an OSM node.
pub type NodeId = i64;

/// Identifier of an OSM way.
pub type WayId = i64;

/// Highway types that never carry parking meters. Ways tagged with one of these are not
/// indexed, so they are invisible to matching and chaining.
pub const EXCLUDED_HIGHWAYS: [&str; 7] = [
    "footway",
    "service",
    "path",
    "cycleway",
    "steps",
    "pedestrian",
    "corridor",
];

/// OSM node with WGS84 coordinates in degrees.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon }
    }

    /// The node as a `geo::Point`. Note that x is the longitude and y the latitude.
    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.lon, self.lat)
    }
}

/// The subset of way tags the blockface computation looks at.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WayTags {
    pub highway: Option<String>,
    pub name: Option<String>,
}

/// OSM way, an ordered list of node references plus tags.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: WayTags,
}

impl Way {
    /// Whether the way is a road that can carry meters: it needs a highway tag which is not in
    /// `EXCLUDED_HIGHWAYS`.
    pub fn is_road(&self) -> bool {
        match &self.tags.highway {
            Some(highway) => !EXCLUDED_HIGHWAYS.contains(&highway.as_str()),
            None => false,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.name.as_deref()
    }
}

/// Node and way graph as delivered by one of the OSM readers.
#[derive(Debug, Clone, Default)]
pub struct OsmData {
    nodes: HashMap<NodeId, Node>,
    ways: Vec<Way>,
}

impl OsmData {
    /// Ways are ordered by id so that everything derived from them is independent of the
    /// order the source listed them in.
    pub fn new(nodes: Vec<Node>, mut ways: Vec<Way>) -> Self {
        ways.sort_by_key(|way| way.id);
        Self {
            nodes: nodes.into_iter().map(|node| (node.id, node)).collect(),
            ways,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> &HashMap<NodeId, Node> {
        &self.nodes
    }

    pub fn ways(&self) -> &[Way] {
        &self.ways
    }
}
