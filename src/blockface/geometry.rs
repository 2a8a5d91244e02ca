use crate::{
    geofile::feature::Feature,
    geograph::{primitives::PerpendicularDirection, utils::destination},
};

use super::assembly::Blockface;

/// Near and far edges of a ribbon running alongside a street.
struct Ribbon {
    near_offset: f64,
    far_offset: f64,
    direction: PerpendicularDirection,
    front: Vec<geo::Point>,
    back: Vec<geo::Point>,
}

impl Ribbon {
    /// Add the ribbon's cross-section at `point`, for a street heading along `bearing`.
    fn push(&mut self, point: geo::Point, bearing: f64) {
        let perpendicular_bearing = self.direction.rotate(bearing);
        self.front
            .push(destination(point, perpendicular_bearing, self.near_offset));
        self.back
            .push(destination(point, perpendicular_bearing, self.far_offset));
    }

    /// Close the ribbon by running back along the far edge.
    fn into_polygon(self) -> geo::Polygon {
        let mut exterior = self.front;
        exterior.extend(self.back.into_iter().rev());
        geo::Polygon::new(exterior.into(), vec![])
    }
}

/// Polygon covering the blockface: a ribbon `ribbon_width` meters wide, starting
/// `perpendicular_offset` meters from the street centerline, trimmed by `start_offset` and
/// `end_offset` meters at the ends of the chain.
///
/// Returns `None` if the chain is too short for the requested trims. Sharp bends in the chain
/// can make the ribbon self-intersect.
pub fn to_polygon(blockface: &Blockface, ribbon_width: f64) -> Option<geo::Polygon> {
    let chain = &blockface.road_segment_chain;
    let total_distance = chain.length();
    let start_distance = blockface.start_offset;
    let end_distance = total_distance - blockface.end_offset;
    if chain.segments.is_empty() || total_distance < blockface.start_offset + blockface.end_offset
    {
        return None;
    }

    let mut ribbon = Ribbon {
        near_offset: blockface.perpendicular_offset,
        far_offset: blockface.perpendicular_offset + ribbon_width,
        direction: blockface.perpendicular_direction,
        front: Vec::new(),
        back: Vec::new(),
    };
    let mut distance_drawn = 0.0;
    for segment in &chain.segments {
        let bearing = segment.bearing();
        let length = segment.length();
        if distance_drawn + length < start_distance {
            distance_drawn += length;
            continue;
        }

        let start_point = if distance_drawn < start_distance {
            destination(segment.p0.point(), bearing, start_distance - distance_drawn)
        } else {
            segment.p0.point()
        };
        ribbon.push(start_point, bearing);

        if distance_drawn + length >= end_distance {
            let end_point = destination(segment.p0.point(), bearing, end_distance - distance_drawn);
            ribbon.push(end_point, bearing);
            break;
        }
        distance_drawn += length;
    }
    Some(ribbon.into_polygon())
}

/// The blockface's polygon as a feature carrying its describing properties, or `None` if the
/// blockface has no polygon.
pub fn blockface_feature(blockface: &Blockface, ribbon_width: f64) -> Option<Feature> {
    let polygon = to_polygon(blockface, ribbon_width)?;
    let chain = &blockface.road_segment_chain;
    let first_segment = chain.segments.first()?;
    Some(
        Feature::new(polygon)
            .with_property("street", chain.street_name().unwrap_or_default())
            .with_property("parity", blockface.side_of_street_parity.name())
            .with_property(
                "perpendicular_direction",
                blockface.perpendicular_direction.name(),
            )
            .with_property("way_id", first_segment.way.id)
            .with_property("node_index", first_segment.node_index)
            .with_property("segment_count", chain.segments.len()),
    )
}
