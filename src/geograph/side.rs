use super::{
    primitives::{PerpendicularDirection, RoadSegment},
    utils::{bearing_difference, rhumb_bearing},
};

/// Which side of `segment` the `point` lies on, relative to the segment's forward direction.
///
/// Compares the bearing from `p0` to the point with the bearing of the segment itself. This is
/// a heuristic rather than an exact cross product test, good for points reasonably close to
/// the segment.
pub fn side_of_segment(segment: &RoadSegment, point: geo::Point) -> PerpendicularDirection {
    let road_bearing = segment.bearing();
    let point_bearing = rhumb_bearing(segment.p0.point(), point);
    if bearing_difference(road_bearing, point_bearing) > 0.0 {
        PerpendicularDirection::Clockwise
    } else {
        PerpendicularDirection::CounterClockwise
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{
        geograph::primitives::{PerpendicularDirection, RoadSegment},
        osm::{
            fixtures::road,
            primitives::{Node, OsmData},
        },
    };

    use super::side_of_segment;

    fn single_segment(start: (f64, f64), end: (f64, f64)) -> OsmData {
        OsmData::new(
            vec![Node::new(1, start.0, start.1), Node::new(2, end.0, end.1)],
            vec![road(1, &[1, 2], None)],
        )
    }

    #[rstest]
    // Eastbound on the equator: north is to the left.
    #[case((0.0, 0.0), (0.0, 0.001), (0.0002, 0.0005), PerpendicularDirection::CounterClockwise)]
    // Northbound: east is to the right.
    #[case((0.0, 0.0), (0.001, 0.0), (0.0005, 0.0002), PerpendicularDirection::Clockwise)]
    // Southwest-bound in Berkeley: the point to the north-west is to the right.
    #[case((37.8702, -122.2680), (37.8690, -122.2695), (37.8698, -122.2694), PerpendicularDirection::Clockwise)]
    fn test_side_of_segment(
        #[case] start: (f64, f64),
        #[case] end: (f64, f64),
        #[case] point: (f64, f64),
        #[case] expected: PerpendicularDirection,
    ) {
        let data = single_segment(start, end);
        let segment = RoadSegment::new(
            data.node(1).unwrap(),
            data.node(2).unwrap(),
            &data.ways()[0],
            0,
        );
        let point = geo::Point::new(point.1, point.0);
        assert_eq!(expected, side_of_segment(&segment, point));
        assert_eq!(expected.opposite(), side_of_segment(&segment.reversed(), point));
    }

    #[rstest]
    #[case(0.0001)]
    #[case(0.0004)]
    #[case(0.0009)]
    #[case(0.0015)]
    fn test_reflection_flips_side(#[case] along: f64) {
        let data = single_segment((0.0, 0.0), (0.0, 0.001));
        let segment = RoadSegment::new(
            data.node(1).unwrap(),
            data.node(2).unwrap(),
            &data.ways()[0],
            0,
        );
        let north = side_of_segment(&segment, geo::Point::new(along, 0.0003));
        let south = side_of_segment(&segment, geo::Point::new(along, -0.0003));
        assert_ne!(north, south);
    }
}
