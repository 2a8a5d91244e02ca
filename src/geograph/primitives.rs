use crate::osm::primitives::{Node, NodeId, Way, WayId};

use super::utils::{haversine_distance, rhumb_bearing};

/// Stable identity of a road segment: the owning way and the position of the segment's first
/// node within that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    pub way_id: WayId,
    pub node_index: usize,
}

/// One edge of a way between two consecutive nodes.
///
/// Segments borrow their nodes and way from the loaded `OsmData`. A segment may be traversed
/// against the direction of its way, in which case `p0` and `p1` are swapped and `reversed`
/// is set; the key stays the same.
#[derive(Debug, Clone, Copy)]
pub struct RoadSegment<'a> {
    pub p0: &'a Node,
    pub p1: &'a Node,
    pub way: &'a Way,
    /// Index of the way's node at which the segment starts, in the way's own direction.
    pub node_index: usize,
    pub reversed: bool,
}

impl<'a> RoadSegment<'a> {
    pub fn new(p0: &'a Node, p1: &'a Node, way: &'a Way, node_index: usize) -> Self {
        Self {
            p0,
            p1,
            way,
            node_index,
            reversed: false,
        }
    }

    pub fn key(&self) -> SegmentKey {
        SegmentKey {
            way_id: self.way.id,
            node_index: self.node_index,
        }
    }

    /// The same segment traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
            reversed: !self.reversed,
            ..*self
        }
    }

    /// The segment oriented so that it starts at `node_id`. Returns the segment unchanged if
    /// `node_id` is not its end node.
    pub fn starting_at(&self, node_id: NodeId) -> Self {
        if self.p1.id == node_id && self.p0.id != node_id {
            self.reversed()
        } else {
            *self
        }
    }

    /// Whether both segments belong to ways carrying the same name. Two unnamed ways count as
    /// the same street.
    pub fn same_street(&self, other: &RoadSegment) -> bool {
        self.way.name() == other.way.name()
    }

    /// Forward bearing from `p0` to `p1` in degrees.
    pub fn bearing(&self) -> f64 {
        rhumb_bearing(self.p0.point(), self.p1.point())
    }

    /// Great-circle length in meters.
    pub fn length(&self) -> f64 {
        haversine_distance(self.p0.point(), self.p1.point())
    }
}

/// Which 90 degree rotation of a segment's forward bearing points towards a curb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerpendicularDirection {
    Clockwise,
    CounterClockwise,
}

impl PerpendicularDirection {
    pub fn opposite(&self) -> Self {
        match self {
            PerpendicularDirection::Clockwise => PerpendicularDirection::CounterClockwise,
            PerpendicularDirection::CounterClockwise => PerpendicularDirection::Clockwise,
        }
    }

    /// Rotate `bearing` by 90 degrees in this direction.
    pub fn rotate(&self, bearing: f64) -> f64 {
        match self {
            PerpendicularDirection::Clockwise => bearing + 90.0,
            PerpendicularDirection::CounterClockwise => bearing - 90.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PerpendicularDirection::Clockwise => "CLOCKWISE",
            PerpendicularDirection::CounterClockwise => "COUNTERCLOCKWISE",
        }
    }
}

/// Identity of a chain, independent of the seed it was grown from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainKey {
    pub first: (SegmentKey, bool),
    pub last: (SegmentKey, bool),
}

/// A run of same-named segments without branches, each starting where the previous one ends.
#[derive(Debug, Clone)]
pub struct RoadSegmentChain<'a> {
    pub segments: Vec<RoadSegment<'a>>,
}

impl<'a> RoadSegmentChain<'a> {
    pub fn new(segments: Vec<RoadSegment<'a>>) -> Self {
        Self { segments }
    }

    pub fn key(&self) -> Option<ChainKey> {
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        Some(ChainKey {
            first: (first.key(), first.reversed),
            last: (last.key(), last.reversed),
        })
    }

    /// The chain traversed from its last node to its first.
    pub fn reversed(&self) -> Self {
        Self::new(
            self.segments
                .iter()
                .rev()
                .map(|segment| segment.reversed())
                .collect(),
        )
    }

    /// Pick one of the two orientations of the chain deterministically, carrying `direction`
    /// along so it keeps pointing at the same curb.
    pub fn canonical(self, direction: PerpendicularDirection) -> (Self, PerpendicularDirection) {
        let reversed = self.reversed();
        match (self.key(), reversed.key()) {
            (Some(key), Some(reversed_key)) if reversed_key < key => {
                (reversed, direction.opposite())
            }
            _ => (self, direction),
        }
    }

    /// Sum of the great-circle lengths of all segments, in meters.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(|segment| segment.length()).sum()
    }

    /// Name of the street the chain runs along.
    pub fn street_name(&self) -> Option<&'a str> {
        self.segments.first().and_then(|segment| segment.way.name())
    }
}
