//! Noding: breaking a collection of segment strings at every mutual
//! intersection point, so the output contains no interior crossings.

use crate::algorithm::line_intersection::{LineIntersection, LineIntersector};
use crate::Error;
use geo_types::Coord;

pub(crate) mod mc_index_noder;
pub(crate) mod monotone_chain;
pub(crate) mod segment_string;

pub(crate) use mc_index_noder::McIndexNoder;
pub(crate) use segment_string::SegmentString;

/// Computes a set of fully-noded segment strings: every returned substring
/// meets other substrings only at its endpoints.
pub(crate) trait Noder {
    fn node(&mut self, strings: Vec<SegmentString>) -> Result<Vec<SegmentString>, Error>;
}

/// Computes the intersections between the segments of the strings handed to
/// it, recording each intersection point as a split node on both strings.
///
/// Trivial self-intersections (the shared vertex of adjacent segments, and
/// the wrap-around pair of a closed string) are ignored.
pub(crate) struct SegmentIntersector {
    li: LineIntersector,
    interior_intersection_count: usize,
}

impl SegmentIntersector {
    pub fn new(li: LineIntersector) -> SegmentIntersector {
        SegmentIntersector {
            li,
            interior_intersection_count: 0,
        }
    }

    /// The number of intersections found in the interior of a segment.
    /// The iterated noder watches this count to detect convergence.
    pub fn interior_intersection_count(&self) -> usize {
        self.interior_intersection_count
    }

    fn is_adjacent(i0: usize, i1: usize) -> bool {
        i0.abs_diff(i1) == 1
    }

    /// An apparent self-intersection which is simply the point shared by
    /// adjacent segments. Closed strings additionally share a point between
    /// their first and last segments.
    fn is_trivial_intersection(
        intersection: &LineIntersection,
        strings: &[SegmentString],
        e0: usize,
        i0: usize,
        e1: usize,
        i1: usize,
    ) -> bool {
        if e0 != e1 {
            return false;
        }
        if matches!(intersection, LineIntersection::Collinear { .. }) {
            return false;
        }
        if Self::is_adjacent(i0, i1) {
            return true;
        }
        if strings[e0].is_closed() {
            let max_segment_index = strings[e0].segment_count() - 1;
            if (i0 == 0 && i1 == max_segment_index) || (i1 == 0 && i0 == max_segment_index) {
                return true;
            }
        }
        false
    }

    /// An intersection is interior when some intersection point lies in the
    /// interior of at least one of the two segments.
    fn is_interior_intersection(
        intersection: &LineIntersection,
        line0: &[Coord<f64>; 2],
        line1: &[Coord<f64>; 2],
    ) -> bool {
        let is_interior_point = |pt: &Coord<f64>| {
            (pt != &line0[0] && pt != &line0[1]) || (pt != &line1[0] && pt != &line1[1])
        };
        match intersection {
            LineIntersection::SinglePoint { intersection, .. } => is_interior_point(intersection),
            LineIntersection::Collinear { intersection } => {
                is_interior_point(&intersection.start) || is_interior_point(&intersection.end)
            }
        }
    }

    /// Intersect segment `i0` of `strings[e0]` with segment `i1` of
    /// `strings[e1]`, adding split nodes to both strings.
    pub fn process_intersections(
        &mut self,
        strings: &mut [SegmentString],
        e0: usize,
        i0: usize,
        e1: usize,
        i1: usize,
    ) {
        if e0 == e1 && i0 == i1 {
            return;
        }

        let line0 = strings[e0].line(i0);
        let line1 = strings[e1].line(i1);
        let Some(intersection) = self.li.compute_segment_intersection(line0, line1) else {
            return;
        };

        if Self::is_interior_intersection(
            &intersection,
            &[line0.start, line0.end],
            &[line1.start, line1.end],
        ) {
            self.interior_intersection_count += 1;
        }

        if Self::is_trivial_intersection(&intersection, strings, e0, i0, e1, i1) {
            return;
        }

        strings[e0].add_intersections(&intersection, i0);
        strings[e1].add_intersections(&intersection, i1);
    }
}

/// A noder which renodes its own output until no further interior
/// intersections appear.
///
/// Rounding the intersection points of one pass (under a fixed precision
/// model) can introduce new crossings, so a single pass is not always a
/// fixed point. If the interior-intersection count fails to decrease within
/// the iteration budget, [`Error::NonConvergentNoding`] is surfaced so the
/// caller can retry under a coarser precision model.
pub(crate) struct IteratedNoder {
    precision_model: crate::PrecisionModel,
    max_iterations: usize,
}

impl IteratedNoder {
    pub const MAX_ITERATIONS: usize = 5;

    pub fn new(precision_model: crate::PrecisionModel) -> IteratedNoder {
        IteratedNoder {
            precision_model,
            max_iterations: Self::MAX_ITERATIONS,
        }
    }
}

impl Noder for IteratedNoder {
    fn node(&mut self, strings: Vec<SegmentString>) -> Result<Vec<SegmentString>, Error> {
        let mut noded = strings;
        let mut iterations = 0usize;
        let mut last_interior_count: Option<usize> = None;
        loop {
            let mut pass = McIndexNoder::new(self.precision_model);
            noded = pass.node(noded)?;
            let interior_count = pass.interior_intersection_count();
            iterations += 1;
            trace!(
                "noding iteration {}: {} interior intersections",
                iterations,
                interior_count
            );

            if interior_count == 0 {
                return Ok(noded);
            }
            // a pass which fails to reduce the intersection count past the
            // iteration budget will never reach a fixed point
            if let Some(last) = last_interior_count {
                if interior_count >= last && iterations > self.max_iterations {
                    return Err(Error::NonConvergentNoding { iterations });
                }
            }
            last_interior_count = Some(interior_count);
        }
    }
}
