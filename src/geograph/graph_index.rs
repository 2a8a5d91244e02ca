use std::collections::HashMap;

use crate::osm::primitives::{Node, NodeId, OsmData};

use super::primitives::RoadSegment;

/// Road segments of all qualifying ways, and for every node the segments touching it.
///
/// Segments are listed in the order they are encountered while scanning the ways, both in
/// `segments()` and per node.
pub struct GraphIndex<'a> {
    segments: Vec<RoadSegment<'a>>,
    node_segments: HashMap<NodeId, Vec<RoadSegment<'a>>>,
}

impl<'a> GraphIndex<'a> {
    /// Index all ways of `osm_data` that pass `Way::is_road`.
    ///
    /// Node references which do not resolve to a node are dropped before segments are formed,
    /// and segments joining a node to itself are skipped.
    pub fn build(osm_data: &'a OsmData) -> Self {
        let mut segments = Vec::new();
        let mut node_segments: HashMap<NodeId, Vec<RoadSegment<'a>>> = HashMap::new();

        for way in osm_data.ways().iter().filter(|way| way.is_road()) {
            let nodes: Vec<&'a Node> = way
                .nodes
                .iter()
                .filter_map(|node_id| {
                    let node = osm_data.node(*node_id);
                    if node.is_none() {
                        log::debug!("Way {} references unknown node {}", way.id, node_id);
                    }
                    node
                })
                .collect();

            for (node_index, pair) in nodes.windows(2).enumerate() {
                let (p0, p1) = (pair[0], pair[1]);
                if p0.id == p1.id {
                    log::debug!("Skipping zero-length segment {} of way {}", node_index, way.id);
                    continue;
                }
                let segment = RoadSegment::new(p0, p1, way, node_index);
                segments.push(segment);
                node_segments.entry(p0.id).or_default().push(segment);
                node_segments.entry(p1.id).or_default().push(segment);
            }
        }
        log::debug!(
            "Indexed {} road segments touching {} nodes",
            segments.len(),
            node_segments.len()
        );

        Self {
            segments,
            node_segments,
        }
    }

    /// All indexed segments.
    pub fn segments(&self) -> &[RoadSegment<'a>] {
        &self.segments
    }

    /// Segments having `node_id` as one of their endpoints. Empty for unknown nodes.
    pub fn segments_at(&self, node_id: NodeId) -> &[RoadSegment<'a>] {
        self.node_segments
            .get(&node_id)
            .map(|segments| segments.as_slice())
            .unwrap_or(&[])
    }
}
