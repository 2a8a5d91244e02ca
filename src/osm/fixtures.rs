//! Small hand-built road graphs shared by the unit tests.

use super::primitives::{Node, NodeId, OsmData, Way, WayId, WayTags};

/// Degrees of longitude per meter along the equator, for the mean earth radius used by `geo`.
pub const DEGREES_PER_METER: f64 = 1.0 / 111_195.08;

pub fn road(id: WayId, nodes: &[NodeId], name: Option<&str>) -> Way {
    highway(id, nodes, "residential", name)
}

pub fn highway(id: WayId, nodes: &[NodeId], highway: &str, name: Option<&str>) -> Way {
    Way {
        id,
        nodes: nodes.to_vec(),
        tags: WayTags {
            highway: Some(highway.to_string()),
            name: name.map(str::to_string),
        },
    }
}

/// Three nodes along the equator, A(0, 0) B(0, 0.0002) C(0, 0.0004), joined by one way named
/// "Test St".
pub fn straight_street() -> OsmData {
    OsmData::new(
        vec![
            Node::new(1, 0.0, 0.0),
            Node::new(2, 0.0, 0.0002),
            Node::new(3, 0.0, 0.0004),
        ],
        vec![road(100, &[1, 2, 3], Some("Test St"))],
    )
}

/// An east-west main street A-B-C with a side street joining at B from the north (node D).
///
/// ```text
///          D
///          |
///   A ---- B ---- C
/// ```
pub fn t_junction() -> OsmData {
    OsmData::new(
        vec![
            Node::new(1, 0.0, 0.0),
            Node::new(2, 0.0, 0.001),
            Node::new(3, 0.0, 0.002),
            Node::new(4, 0.001, 0.001),
        ],
        vec![
            road(100, &[1, 2, 3], Some("Main Street")),
            road(200, &[2, 4], Some("Side Street")),
        ],
    )
}

/// Like `t_junction`, with the side street continuing south of B to node E.
pub fn four_way_intersection() -> OsmData {
    OsmData::new(
        vec![
            Node::new(1, 0.0, 0.0),
            Node::new(2, 0.0, 0.001),
            Node::new(3, 0.0, 0.002),
            Node::new(4, 0.001, 0.001),
            Node::new(5, -0.001, 0.001),
        ],
        vec![
            road(100, &[1, 2, 3], Some("Main Street")),
            road(200, &[5, 2, 4], Some("Side Street")),
        ],
    )
}
