use std::collections::{HashMap, HashSet};

use anyhow::anyhow;
use serde::Deserialize;

use crate::{
    geograph::{
        chain::build_chain,
        graph_index::GraphIndex,
        primitives::{ChainKey, PerpendicularDirection, RoadSegmentChain, SegmentKey},
    },
    meters::{
        matcher::{match_meters, segments_by_name, MatchParams, SegmentMatch},
        record::{parity_from_pole, MeterRecord, Parity},
    },
    osm::primitives::OsmData,
};

/// Offsets applied to every blockface, all in meters.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BlockfaceParams {
    /// Distance from the street centerline to the near edge of the ribbon.
    pub perpendicular_offset: f64,
    /// Length trimmed from the start of the chain, e.g. to clear an intersection.
    pub start_offset: f64,
    /// Length trimmed from the end of the chain.
    pub end_offset: f64,
    /// Width of the drawn ribbon.
    pub ribbon_width: f64,
}

impl Default for BlockfaceParams {
    fn default() -> Self {
        Self {
            perpendicular_offset: 3.0,
            start_offset: 8.0,
            end_offset: 8.0,
            ribbon_width: 5.0,
        }
    }
}

impl BlockfaceParams {
    /// Check that every offset is a finite, non-negative length.
    pub fn validate(&self) -> anyhow::Result<()> {
        let offsets = [
            ("perpendicular_offset", self.perpendicular_offset),
            ("start_offset", self.start_offset),
            ("end_offset", self.end_offset),
            ("ribbon_width", self.ribbon_width),
        ];
        for (name, value) in offsets {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("Blockface {} must be a non-negative length, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// The curb-side strip of one chain holding the meters of one parity.
#[derive(Debug, Clone)]
pub struct Blockface<'a> {
    pub road_segment_chain: RoadSegmentChain<'a>,
    pub side_of_street_parity: Parity,
    pub perpendicular_direction: PerpendicularDirection,
    pub perpendicular_offset: f64,
    pub start_offset: f64,
    pub end_offset: f64,
}

/// Turn matched meters into blockfaces, one per distinct chain and parity.
///
/// Chains are grown from the matched segment on the meter's side of the street and brought
/// into a canonical orientation, so meters matched to different segments of the same stretch
/// of curb end up sharing one blockface. The first meter of a chain and parity determines the
/// blockface. Meters whose pole gives no parity are skipped.
pub fn assemble_blockfaces<'a>(
    matches: &[(&MeterRecord, SegmentMatch<'a>)],
    index: &GraphIndex<'a>,
    params: &BlockfaceParams,
) -> Vec<Blockface<'a>> {
    let mut chains: HashMap<
        (SegmentKey, PerpendicularDirection),
        (RoadSegmentChain<'a>, PerpendicularDirection),
    > = HashMap::new();
    let mut assembled: HashSet<(ChainKey, Parity)> = HashSet::new();
    let mut blockfaces = Vec::new();

    for (meter, segment_match) in matches {
        let Some(parity) = parity_from_pole(&meter.pole) else {
            log::debug!("Cannot tell parity of pole {}", meter.pole);
            continue;
        };
        let (chain, direction) = chains
            .entry((segment_match.segment.key(), segment_match.direction))
            .or_insert_with(|| {
                build_chain(segment_match.segment, index, segment_match.direction)
                    .canonical(segment_match.direction)
            });
        let Some(chain_key) = chain.key() else {
            log::warn!("No chain for segment {:?}", segment_match.segment.key());
            continue;
        };
        if !assembled.insert((chain_key, parity)) {
            continue;
        }
        blockfaces.push(Blockface {
            road_segment_chain: chain.clone(),
            side_of_street_parity: parity,
            perpendicular_direction: *direction,
            perpendicular_offset: params.perpendicular_offset,
            start_offset: params.start_offset,
            end_offset: params.end_offset,
        });
    }
    log::info!(
        "Assembled {} blockfaces from {} chains",
        blockfaces.len(),
        chains.len()
    );
    blockfaces
}

/// Match `meters` to the roads of `osm_data` and assemble the resulting blockfaces.
pub fn compute_blockfaces<'a>(
    osm_data: &'a OsmData,
    meters: &[MeterRecord],
    match_params: &MatchParams,
    blockface_params: &BlockfaceParams,
) -> Vec<Blockface<'a>> {
    log::info!("Indexing road segments");
    let index = GraphIndex::build(osm_data);
    let by_name = segments_by_name(&index);
    log::info!(
        "Finding closest road segments for {} meters among {} segments",
        meters.len(),
        index.segments().len()
    );
    let matches = match_meters(meters, &by_name, match_params);
    log::info!("Creating road segment chains and blockfaces");
    assemble_blockfaces(&matches, &index, blockface_params)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::{
        geograph::primitives::PerpendicularDirection,
        meters::{
            matcher::MatchParams,
            record::{MeterRecord, Parity},
        },
        osm::{
            fixtures::{road, straight_street, t_junction},
            primitives::{Node, OsmData},
        },
    };

    use super::{compute_blockfaces, BlockfaceParams};

    fn meter(latitude: f64, longitude: f64, sub_area: &str, pole: &str) -> MeterRecord {
        MeterRecord {
            latitude,
            longitude,
            sub_area: Some(sub_area.to_string()),
            pole: pole.to_string(),
        }
    }

    #[rstest]
    #[case(BlockfaceParams::default(), true)]
    #[case(BlockfaceParams { start_offset: 0.0, end_offset: 0.0, ..BlockfaceParams::default() }, true)]
    #[case(BlockfaceParams { perpendicular_offset: -1.0, ..BlockfaceParams::default() }, false)]
    #[case(BlockfaceParams { start_offset: -8.0, ..BlockfaceParams::default() }, false)]
    #[case(BlockfaceParams { end_offset: f64::NAN, ..BlockfaceParams::default() }, false)]
    #[case(BlockfaceParams { ribbon_width: -5.0, ..BlockfaceParams::default() }, false)]
    fn test_blockface_params_validate(#[case] params: BlockfaceParams, #[case] valid: bool) {
        assert_eq!(valid, params.validate().is_ok());
    }

    #[test]
    fn test_negative_offset_in_config_is_rejected() {
        let params: BlockfaceParams = serde_yaml::from_str("perpendicular_offset: -3.0").unwrap();
        assert_eq!(8.0, params.start_offset);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_one_blockface_per_chain_and_parity() {
        let data = straight_street();
        let meters = vec![
            // Both on the northern curb, matched to different segments of the same chain.
            meter(0.00005, 0.00005, "TEST ST", "U2"),
            meter(0.00005, 0.00035, "TEST ST", "U4"),
            // Southern curb.
            meter(-0.00005, 0.0001, "TEST ST", "U1"),
            meter(-0.00005, 0.0003, "TEST ST", "U3"),
        ];
        let blockfaces = compute_blockfaces(
            &data,
            &meters,
            &MatchParams::default(),
            &BlockfaceParams::default(),
        );

        assert_eq!(2, blockfaces.len());
        assert_eq!(Parity::Even, blockfaces[0].side_of_street_parity);
        assert_eq!(
            PerpendicularDirection::CounterClockwise,
            blockfaces[0].perpendicular_direction
        );
        assert_eq!(Parity::Odd, blockfaces[1].side_of_street_parity);
        assert_eq!(
            PerpendicularDirection::Clockwise,
            blockfaces[1].perpendicular_direction
        );
        for blockface in &blockfaces {
            assert_eq!(2, blockface.road_segment_chain.segments.len());
            assert_eq!(3.0, blockface.perpendicular_offset);
            assert_eq!(8.0, blockface.start_offset);
            assert_eq!(8.0, blockface.end_offset);
        }
    }

    #[test]
    fn test_same_curb_from_opposite_ways_is_one_blockface() {
        // One street drawn as two ways pointing at each other.
        let data = OsmData::new(
            vec![
                Node::new(1, 0.0, 0.0),
                Node::new(2, 0.0, 0.001),
                Node::new(3, 0.0, 0.002),
            ],
            vec![
                road(100, &[1, 2], Some("Main Street")),
                road(200, &[3, 2], Some("Main Street")),
            ],
        );
        let meters = vec![
            meter(0.0001, 0.0005, "MAIN ST", "U2"),
            meter(0.0001, 0.0015, "MAIN ST", "U4"),
        ];
        let blockfaces = compute_blockfaces(
            &data,
            &meters,
            &MatchParams::default(),
            &BlockfaceParams::default(),
        );
        assert_eq!(1, blockfaces.len());
        assert_eq!(2, blockfaces[0].road_segment_chain.segments.len());
    }

    #[test]
    fn test_t_junction_splits_only_the_joined_curb() {
        let data = t_junction();
        let meters = vec![
            // Southern curb, west and east of the side street.
            meter(-0.0001, 0.0005, "MAIN ST", "U1"),
            meter(-0.0001, 0.0015, "MAIN ST", "U3"),
            // Northern curb, west and east of the side street.
            meter(0.0001, 0.0005, "MAIN ST", "U2"),
            meter(0.0001, 0.0015, "MAIN ST", "U4"),
        ];
        let blockfaces = compute_blockfaces(
            &data,
            &meters,
            &MatchParams::default(),
            &BlockfaceParams::default(),
        );
        let chain_lengths: Vec<usize> = blockfaces
            .iter()
            .map(|blockface| blockface.road_segment_chain.segments.len())
            .collect();
        assert_eq!(vec![2, 1, 1], chain_lengths);
    }

    #[test]
    fn test_meters_without_parity_or_match_are_skipped() {
        let data = straight_street();
        let meters = vec![
            meter(0.00005, 0.0001, "TEST ST", "U2A"),
            meter(0.00005, 0.0001, "ELM ST", "U2"),
            meter(0.005, 0.0001, "TEST ST", "U2"),
        ];
        let blockfaces = compute_blockfaces(
            &data,
            &meters,
            &MatchParams::default(),
            &BlockfaceParams::default(),
        );
        assert!(blockfaces.is_empty());
    }
}
