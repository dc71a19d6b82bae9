use super::segment_string::SegmentString;
use super::SegmentIntersector;
use crate::algorithm::buffer::graph::Quadrant;
use crate::utils::{rect_expanded_to_include, rects_intersect};
use geo_types::{Coord, Rect};

/// A maximal run of segments of one segment string whose direction vectors
/// all lie in a single quadrant.
///
/// Monotone chains have two properties the noder exploits:
///
/// 1. the segments within a chain cannot intersect each other, and
/// 2. the envelope of any contiguous run of segments is the envelope of the
///    run's endpoints, so overlap tests against another chain can binary
///    subdivide on coordinates alone.
#[derive(Debug, Clone)]
pub(crate) struct MonotoneChain {
    /// Index of the owning string in the noder's working set.
    pub string_index: usize,
    /// First vertex of the chain.
    pub start: usize,
    /// Last vertex of the chain (inclusive; `end > start`).
    pub end: usize,
    pub envelope: Rect<f64>,
}

impl MonotoneChain {
    /// Split `string` (at `string_index`) into monotone chains.
    pub fn chains_of(string: &SegmentString, string_index: usize) -> Vec<MonotoneChain> {
        let coords = &string.coords;
        let mut chains = vec![];
        let mut chain_start = 0;
        while chain_start < coords.len() - 1 {
            let chain_end = Self::find_chain_end(coords, chain_start);
            let mut envelope = Rect::new(coords[chain_start], coords[chain_start]);
            for coord in &coords[chain_start..=chain_end] {
                envelope = rect_expanded_to_include(envelope, *coord);
            }
            chains.push(MonotoneChain {
                string_index,
                start: chain_start,
                end: chain_end,
                envelope,
            });
            chain_start = chain_end;
        }
        chains
    }

    /// The index of the last vertex of the monotone chain starting at
    /// `start`.
    fn find_chain_end(coords: &[Coord<f64>], start: usize) -> usize {
        let chain_quadrant =
            Quadrant::new(coords[start + 1].x - coords[start].x, coords[start + 1].y - coords[start].y);
        let mut last = start + 1;
        while last < coords.len() - 1 {
            let quadrant = Quadrant::new(
                coords[last + 1].x - coords[last].x,
                coords[last + 1].y - coords[last].y,
            );
            // zero-length segments (None) stay inside the current chain
            if quadrant.is_some() && quadrant != chain_quadrant {
                break;
            }
            last += 1;
        }
        last
    }

    /// Run the segment intersector over every overlapping segment pair of
    /// `self` and `other`, by recursive envelope subdivision.
    pub fn compute_overlaps(
        &self,
        other: &MonotoneChain,
        strings: &mut [SegmentString],
        intersector: &mut SegmentIntersector,
    ) {
        self.overlap_ranges(
            self.start,
            self.end,
            other,
            other.start,
            other.end,
            strings,
            intersector,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn overlap_ranges(
        &self,
        start0: usize,
        end0: usize,
        other: &MonotoneChain,
        start1: usize,
        end1: usize,
        strings: &mut [SegmentString],
        intersector: &mut SegmentIntersector,
    ) {
        // a single segment pair: test it directly
        if end0 - start0 == 1 && end1 - start1 == 1 {
            intersector.process_intersections(
                strings,
                self.string_index,
                start0,
                other.string_index,
                start1,
            );
            return;
        }
        if !self.ranges_overlap(start0, end0, other, start1, end1, strings) {
            return;
        }

        let mid0 = (start0 + end0) / 2;
        let mid1 = (start1 + end1) / 2;
        if start0 < mid0 {
            if start1 < mid1 {
                self.overlap_ranges(start0, mid0, other, start1, mid1, strings, intersector);
            }
            if mid1 < end1 {
                self.overlap_ranges(start0, mid0, other, mid1, end1, strings, intersector);
            }
        }
        if mid0 < end0 {
            if start1 < mid1 {
                self.overlap_ranges(mid0, end0, other, start1, mid1, strings, intersector);
            }
            if mid1 < end1 {
                self.overlap_ranges(mid0, end0, other, mid1, end1, strings, intersector);
            }
        }
    }

    fn ranges_overlap(
        &self,
        start0: usize,
        end0: usize,
        other: &MonotoneChain,
        start1: usize,
        end1: usize,
        strings: &[SegmentString],
    ) -> bool {
        // monotonicity makes the endpoints' envelope the range's envelope
        let coords0 = &strings[self.string_index].coords;
        let coords1 = &strings[other.string_index].coords;
        let env0 = Rect::new(coords0[start0], coords0[end0]);
        let env1 = Rect::new(coords1[start1], coords1[end1]);
        rects_intersect(&env0, &env1)
    }
}
