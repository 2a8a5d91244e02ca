use geo::{Closest, HaversineClosestPoint, HaversineDestination, HaversineDistance, RhumbBearing};

/// Rhumb line bearing from `from` to `to`, in degrees clockwise from north.
pub fn rhumb_bearing(from: geo::Point, to: geo::Point) -> f64 {
    from.rhumb_bearing(to)
}

/// Great-circle distance between two WGS84 points, in meters.
pub fn haversine_distance(from: geo::Point, to: geo::Point) -> f64 {
    from.haversine_distance(&to)
}

/// The point reached by travelling `distance` meters from `origin` along `bearing` degrees.
pub fn destination(origin: geo::Point, bearing: f64, distance: f64) -> geo::Point {
    origin.haversine_destination(bearing, distance)
}

/// Signed difference `bearing - reference` in degrees, normalized into (-180, 180].
///
/// Both bearings are expected to be in [0, 360) or (-180, 180], so a single correction by a
/// full turn is enough.
pub fn bearing_difference(reference: f64, bearing: f64) -> f64 {
    let diff = bearing - reference;
    if diff > 180.0 {
        diff - 360.0
    } else if diff <= -180.0 {
        diff + 360.0
    } else {
        diff
    }
}

/// Distance in meters from `point` to the closest point of the segment between `start` and
/// `end`, or infinity if there is no single closest point.
pub fn distance_to_segment(point: geo::Point, start: geo::Point, end: geo::Point) -> f64 {
    match geo::Line::new(start, end).haversine_closest_point(&point) {
        Closest::Intersection(_) => 0.0,
        Closest::SinglePoint(closest) => haversine_distance(point, closest),
        Closest::Indeterminate => f64::INFINITY,
    }
}
