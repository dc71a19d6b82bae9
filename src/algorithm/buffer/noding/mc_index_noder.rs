use super::monotone_chain::MonotoneChain;
use super::segment_string::SegmentString;
use super::{Noder, SegmentIntersector};
use crate::algorithm::line_intersection::LineIntersector;
use crate::{Error, PrecisionModel};
use rstar::{RTree, RTreeObject, AABB};

/// The default noder: monotone chains indexed in an R-tree, with a robust
/// line intersector adding the split nodes.
///
/// Each string is decomposed into monotone chains, all chain envelopes are
/// bulk-loaded into the tree, and every chain is intersected against the
/// chains with a later id whose envelope overlaps its own. Segments inside
/// one chain never intersect, so chain pairs are the complete candidate
/// set.
pub(crate) struct McIndexNoder {
    precision_model: PrecisionModel,
    interior_intersection_count: usize,
}

struct ChainEntry {
    chain_index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for ChainEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl McIndexNoder {
    pub fn new(precision_model: PrecisionModel) -> McIndexNoder {
        McIndexNoder {
            precision_model,
            interior_intersection_count: 0,
        }
    }

    /// Interior intersections seen by the most recent `node` call.
    pub fn interior_intersection_count(&self) -> usize {
        self.interior_intersection_count
    }
}

impl Noder for McIndexNoder {
    fn node(&mut self, strings: Vec<SegmentString>) -> Result<Vec<SegmentString>, Error> {
        let mut strings = strings;

        let chains: Vec<MonotoneChain> = strings
            .iter()
            .enumerate()
            .flat_map(|(index, string)| MonotoneChain::chains_of(string, index))
            .collect();

        let entries: Vec<ChainEntry> = chains
            .iter()
            .enumerate()
            .map(|(chain_index, chain)| ChainEntry {
                chain_index,
                envelope: AABB::from_corners(
                    [chain.envelope.min().x, chain.envelope.min().y],
                    [chain.envelope.max().x, chain.envelope.max().y],
                ),
            })
            .collect();
        let tree = RTree::bulk_load(entries);

        let mut intersector =
            SegmentIntersector::new(LineIntersector::with_precision_model(self.precision_model));

        for (query_index, query_chain) in chains.iter().enumerate() {
            let query_envelope = AABB::from_corners(
                [query_chain.envelope.min().x, query_chain.envelope.min().y],
                [query_chain.envelope.max().x, query_chain.envelope.max().y],
            );
            for entry in tree.locate_in_envelope_intersecting(&query_envelope) {
                // each unordered chain pair is processed once
                if entry.chain_index > query_index {
                    query_chain.compute_overlaps(
                        &chains[entry.chain_index],
                        &mut strings,
                        &mut intersector,
                    );
                }
            }
        }

        self.interior_intersection_count = intersector.interior_intersection_count();

        let mut noded = Vec::with_capacity(strings.len());
        for string in &strings {
            string.add_split_edges(&mut noded);
        }
        Ok(noded)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::buffer::graph::Label;
    use crate::algorithm::coordinate_position::CoordPos;
    use geo_types::coord;

    fn string(coords: &[(f64, f64)]) -> SegmentString {
        SegmentString::new(
            coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect(),
            Label::new(
                0,
                CoordPos::OnBoundary,
                CoordPos::Outside,
                CoordPos::Inside,
            ),
        )
    }

    #[test]
    fn disjoint_strings_pass_through() {
        let strings = vec![
            string(&[(0.0, 0.0), (1.0, 0.0)]),
            string(&[(10.0, 10.0), (11.0, 10.0)]),
        ];
        let mut noder = McIndexNoder::new(PrecisionModel::Floating);
        let noded = noder.node(strings).unwrap();
        assert_eq!(noded.len(), 2);
        assert_eq!(noder.interior_intersection_count(), 0);
    }

    #[test]
    fn self_intersecting_string_is_noded() {
        // a figure-eight style bow tie crossing itself at (2, 1)
        let strings = vec![string(&[
            (0.0, 0.0),
            (4.0, 2.0),
            (4.0, 0.0),
            (0.0, 2.0),
        ])];
        let mut noder = McIndexNoder::new(PrecisionModel::Floating);
        let noded = noder.node(strings).unwrap();
        assert_eq!(noded.len(), 5);
        assert!(noder.interior_intersection_count() > 0);
        let crossing = coord! { x: 2.0, y: 1.0 };
        let touching = noded
            .iter()
            .filter(|s| s.coords.contains(&crossing))
            .count();
        assert_eq!(touching, 4);
    }

    #[test]
    fn intersections_are_rounded_by_the_precision_model() {
        let strings = vec![
            string(&[(0.0, 0.0), (10.0, 10.0)]),
            string(&[(0.0, 10.0), (10.0, 0.0)]),
        ];
        let mut noder = McIndexNoder::new(PrecisionModel::new_fixed(1.0).unwrap());
        let noded = noder.node(strings).unwrap();
        for piece in &noded {
            for coord in &piece.coords {
                assert_eq!(coord.x, coord.x.round());
                assert_eq!(coord.y, coord.y.round());
            }
        }
    }
}
