use std::collections::HashSet;

use crate::osm::primitives::NodeId;

use super::{
    graph_index::GraphIndex,
    primitives::{PerpendicularDirection, RoadSegment, RoadSegmentChain},
    side::side_of_segment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkDirection {
    /// Walking along the seed's direction, starting from its `p1`.
    Forward,
    /// Walking against the seed's direction, starting from its `p0`.
    Backward,
}

/// Grow the longest run of same-named segments around `seed` that forms one uninterrupted
/// blockface on the `side` curb.
///
/// The chain is oriented like `seed`. Walking stops at nodes with more than three attached
/// segments, at street name changes, and at three-way junctions whose joining street meets the
/// `side` curb. A junction where the joining street approaches from the opposite curb does not
/// interrupt the blockface. No node is visited twice, so the walk always terminates.
pub fn build_chain<'a>(
    seed: RoadSegment<'a>,
    index: &GraphIndex<'a>,
    side: PerpendicularDirection,
) -> RoadSegmentChain<'a> {
    let mut visited: HashSet<NodeId> = HashSet::from([seed.p0.id, seed.p1.id]);
    let backward = walk(seed.reversed(), index, side, WalkDirection::Backward, &mut visited);
    let forward = walk(seed, index, side, WalkDirection::Forward, &mut visited);

    let segments: Vec<RoadSegment<'a>> = backward
        .iter()
        .rev()
        .map(|segment| segment.reversed())
        .chain(std::iter::once(seed))
        .chain(forward)
        .collect();
    log::trace!(
        "Built chain of {} segments around segment {:?}",
        segments.len(),
        seed.key()
    );
    RoadSegmentChain::new(segments)
}

/// Walk away from `start.p1` and return the segments passed, each oriented in walking
/// direction.
fn walk<'a>(
    start: RoadSegment<'a>,
    index: &GraphIndex<'a>,
    side: PerpendicularDirection,
    direction: WalkDirection,
    visited: &mut HashSet<NodeId>,
) -> Vec<RoadSegment<'a>> {
    let mut walked = Vec::new();
    let mut current = start;
    while let Some(next) = next_segment(&current, index, side, direction) {
        let next = next.starting_at(current.p1.id);
        if !visited.insert(next.p1.id) {
            log::trace!("Node {} already in chain, stopping", next.p1.id);
            break;
        }
        walked.push(next);
        current = next;
    }
    walked
}

/// The segment continuing the chain past `current.p1`, if the chain continues there.
fn next_segment<'a>(
    current: &RoadSegment<'a>,
    index: &GraphIndex<'a>,
    side: PerpendicularDirection,
    direction: WalkDirection,
) -> Option<RoadSegment<'a>> {
    let boundary = current.p1;
    let attached = index.segments_at(boundary.id);
    let others: Vec<RoadSegment<'a>> = attached
        .iter()
        .filter(|segment| segment.key() != current.key())
        .copied()
        .collect();

    match attached.len() {
        2 => {
            let [other] = others[..] else {
                return None;
            };
            if other.same_street(current) {
                Some(other)
            } else {
                log::trace!("Street name changes at node {}", boundary.id);
                None
            }
        }
        3 => {
            let (joining, continuing): (Vec<_>, Vec<_>) = others
                .into_iter()
                .partition(|segment| !segment.same_street(current));
            let ([joining], [continuation]) = (&joining[..], &continuing[..]) else {
                log::trace!("Three-way junction at node {} is a branch", boundary.id);
                return None;
            };

            // Sides are relative to the chain's orientation, which is the reverse of the
            // walking direction when walking backward.
            let reference = match direction {
                WalkDirection::Forward => *current,
                WalkDirection::Backward => current.reversed(),
            };
            let joining_far_node = joining.starting_at(boundary.id).p1;
            if side_of_segment(&reference, joining_far_node.point()) == side {
                log::trace!(
                    "Street {:?} joins node {} on the blockface side",
                    joining.way.name(),
                    boundary.id
                );
                None
            } else {
                Some(*continuation)
            }
        }
        _ => None,
    }
}
