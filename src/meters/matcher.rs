use std::collections::HashMap;

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::Deserialize;

use crate::geograph::{
    graph_index::GraphIndex,
    primitives::{PerpendicularDirection, RoadSegment},
    side::side_of_segment,
    utils::distance_to_segment,
};

use super::{record::MeterRecord, street_name::normalize_street_name};

/// Road segments grouped by the normalized name of their way. Unnamed ways are grouped under
/// the empty string.
pub type SegmentsByName<'a> = HashMap<String, Vec<RoadSegment<'a>>>;

#[derive(Deserialize, Debug, Clone)]
pub struct MatchParams {
    /// Meters farther than this from every candidate segment stay unmatched, in meters.
    #[serde(default = "MatchParams::default_distance_threshold")]
    pub distance_threshold: f64,
}

impl MatchParams {
    fn default_distance_threshold() -> f64 {
        100.0
    }
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            distance_threshold: Self::default_distance_threshold(),
        }
    }
}

/// The segment a meter was matched to, and the side of the segment the meter is on.
#[derive(Debug, Clone, Copy)]
pub struct SegmentMatch<'a> {
    pub segment: RoadSegment<'a>,
    pub direction: PerpendicularDirection,
    /// Distance from the meter to the segment, in meters.
    pub distance: f64,
}

pub fn segments_by_name<'a>(index: &GraphIndex<'a>) -> SegmentsByName<'a> {
    let mut by_name: SegmentsByName<'a> = HashMap::new();
    for segment in index.segments() {
        let name = normalize_street_name(segment.way.name().unwrap_or_default());
        by_name.entry(name).or_default().push(*segment);
    }
    by_name
}

/// Find the segment closest to `meter` among those whose street name matches the meter's
/// sub-area.
///
/// Returns `None` if the meter has no sub-area, if no segment carries its street name, or if
/// the closest one is farther away than the distance threshold. Of several equally close
/// segments the first one in `segments_by_name` order wins.
pub fn match_meter<'a>(
    meter: &MeterRecord,
    segments_by_name: &SegmentsByName<'a>,
    params: &MatchParams,
) -> Option<SegmentMatch<'a>> {
    let sub_area = meter.sub_area.as_deref()?;
    let candidates = segments_by_name.get(&normalize_street_name(sub_area))?;
    let point = meter.point();

    let mut closest: Option<(RoadSegment<'a>, f64)> = None;
    for segment in candidates {
        let distance = distance_to_segment(point, segment.p0.point(), segment.p1.point());
        if closest.map_or(true, |(_, closest_distance)| distance < closest_distance) {
            closest = Some((*segment, distance));
        }
    }

    let (segment, distance) = closest?;
    if distance.is_nan() || distance > params.distance_threshold {
        return None;
    }
    Some(SegmentMatch {
        segment,
        direction: side_of_segment(&segment, point),
        distance,
    })
}

/// Match every meter, keeping only those that found a segment. The result is in the order of
/// `meters`.
pub fn match_meters<'m, 'a>(
    meters: &'m [MeterRecord],
    segments_by_name: &SegmentsByName<'a>,
    params: &MatchParams,
) -> Vec<(&'m MeterRecord, SegmentMatch<'a>)> {
    let matches: Vec<(&'m MeterRecord, SegmentMatch<'a>)> = meters
        .par_iter()
        .progress_count(meters.len() as u64)
        .filter_map(|meter| {
            let Some(segment_match) = match_meter(meter, segments_by_name, params) else {
                log::debug!("No road segment found for meter {}", meter.pole);
                return None;
            };
            log::trace!(
                "Meter {} matched way {} at {:.1} m",
                meter.pole,
                segment_match.segment.way.id,
                segment_match.distance
            );
            Some((meter, segment_match))
        })
        .collect();
    log::info!("Matched {} of {} meters", matches.len(), meters.len());
    matches
}
