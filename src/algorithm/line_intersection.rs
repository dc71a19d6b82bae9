use crate::algorithm::kernels::{orient2d, Orientation};
use crate::utils::{line_bounding_rect, point_segment_distance, rect_intersects_coord, rects_intersect};
use crate::PrecisionModel;
use geo_types::{coord, Coord, Line};

/// The result of intersecting two segments.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum LineIntersection {
    /// Lines intersect in a single point
    SinglePoint {
        intersection: Coord<f64>,
        /// For Lines which intersect in a single point, that point may be
        /// either an endpoint or in the interior of each Line. If the point
        /// lies in the interior of both Lines, we call it a _proper_
        /// intersection.
        ///
        /// # Note
        ///
        /// Due to the limited precision of most float data-types, the
        /// calculated intersection point may be snapped to one of the
        /// end-points even though all the end-points of the two lines are
        /// distinct points. In such cases, this field is still set to
        /// `true`.
        is_proper: bool,
    },

    /// Overlapping Lines intersect in a line segment
    Collinear { intersection: Line<f64> },
}

impl LineIntersection {
    pub fn is_proper(&self) -> bool {
        match self {
            Self::Collinear { .. } => false,
            Self::SinglePoint { is_proper, .. } => *is_proper,
        }
    }

    pub fn is_collinear(&self) -> bool {
        matches!(self, Self::Collinear { .. })
    }
}

/// Returns the intersection between two [`Lines`](Line), without precision
/// snapping.
///
/// Lines can intersect in a point or, for collinear lines, in a line
/// segment. See [`LineIntersection`] for details about the result.
///
/// # Examples
///
/// ```
/// use geo_planar::coord;
/// use geo_planar::Line;
/// use geo_planar::line_intersection::{line_intersection, LineIntersection};
///
/// let line_1 = Line::new(coord! {x: 0.0, y: 0.0}, coord! { x: 5.0, y: 5.0 } );
/// let line_2 = Line::new(coord! {x: 0.0, y: 5.0}, coord! { x: 5.0, y: 0.0 } );
/// let expected = LineIntersection::SinglePoint { intersection: coord! { x: 2.5, y: 2.5 }, is_proper: true };
/// assert_eq!(line_intersection(line_1, line_2), Some(expected));
/// ```
pub fn line_intersection(p: Line<f64>, q: Line<f64>) -> Option<LineIntersection> {
    line_intersection_with_precision(p, q, &PrecisionModel::Floating)
}

/// Returns the intersection between two [`Lines`](Line), rounding any
/// *computed* intersection point through `precision_model`.
///
/// Endpoint intersections are copied, never computed, so they bypass the
/// model: their coordinates are already precise inputs.
pub fn line_intersection_with_precision(
    p: Line<f64>,
    q: Line<f64>,
    precision_model: &PrecisionModel,
) -> Option<LineIntersection> {
    if !rects_intersect(&line_bounding_rect(p), &line_bounding_rect(q)) {
        return None;
    }

    use Orientation::*;
    let p_q1 = orient2d(p.start, p.end, q.start);
    let p_q2 = orient2d(p.start, p.end, q.end);
    if matches!(
        (p_q1, p_q2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    let q_p1 = orient2d(q.start, q.end, p.start);
    let q_p2 = orient2d(q.start, q.end, p.end);
    if matches!(
        (q_p1, q_p2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    if matches!(
        (p_q1, p_q2, q_p1, q_p2),
        (Collinear, Collinear, Collinear, Collinear)
    ) {
        return collinear_intersection(p, q);
    }

    // At this point we know that there is a single intersection point (since
    // the lines are not collinear).
    //
    // Check if the intersection is an endpoint. If it is, copy the endpoint
    // as the intersection point. Copying the point rather than computing it
    // ensures the point has the exact value, which is important for
    // robustness. It is sufficient to simply check for an endpoint which is
    // on the other line, since at this point we know that the input lines
    // must intersect.
    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        // Check for two equal endpoints.
        // This is done explicitly rather than by the orientation tests
        // below, in order to improve robustness: near a shared endpoint the
        // four orientation tests are not always mutually consistent.
        let intersection: Coord<f64>;
        #[allow(clippy::suspicious_operation_groupings)]
        if p.start == q.start || p.start == q.end {
            intersection = p.start;
        } else if p.end == q.start || p.end == q.end {
            intersection = p.end;
            // Now check to see if any endpoint lies on the interior of the
            // other segment.
        } else if p_q1 == Collinear {
            intersection = q.start;
        } else if p_q2 == Collinear {
            intersection = q.end;
        } else if q_p1 == Collinear {
            intersection = p.start;
        } else {
            debug_assert_eq!(q_p2, Collinear);
            intersection = p.end;
        }
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        })
    } else {
        let intersection = proper_intersection(p, q, precision_model);
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: true,
        })
    }
}

fn collinear_intersection(p: Line<f64>, q: Line<f64>) -> Option<LineIntersection> {
    fn collinear(intersection: Line<f64>) -> LineIntersection {
        LineIntersection::Collinear { intersection }
    }

    fn improper(intersection: Coord<f64>) -> LineIntersection {
        LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        }
    }

    let p_bounds = line_bounding_rect(p);
    let q_bounds = line_bounding_rect(q);
    Some(
        match (
            rect_intersects_coord(&p_bounds, &q.start),
            rect_intersects_coord(&p_bounds, &q.end),
            rect_intersects_coord(&q_bounds, &p.start),
            rect_intersects_coord(&q_bounds, &p.end),
        ) {
            (true, true, _, _) => collinear(q),
            (_, _, true, true) => collinear(p),
            (true, false, true, false) if q.start == p.start => improper(q.start),
            (true, _, true, _) => collinear(Line::new(q.start, p.start)),
            (true, false, false, true) if q.start == p.end => improper(q.start),
            (true, _, _, true) => collinear(Line::new(q.start, p.end)),
            (false, true, true, false) if q.end == p.start => improper(q.end),
            (_, true, true, _) => collinear(Line::new(q.end, p.start)),
            (false, true, false, true) if q.end == p.end => improper(q.end),
            (_, true, _, true) => collinear(Line::new(q.end, p.end)),
            _ => return None,
        },
    )
}

/// Finds the endpoint of the segments P and Q which is closest to the other
/// segment. This is a reasonable surrogate for the true intersection points
/// in ill-conditioned cases (e.g. where two segments are nearly coincident,
/// or where the endpoint of one segment lies almost on the other segment).
///
/// This replaces the older CentralEndpoint heuristic, which chose the wrong
/// endpoint in some cases where the segments had very distinct slopes and
/// one endpoint lay almost on the other segment.
///
/// `returns` the nearest endpoint to the other segment
fn nearest_endpoint(p: Line<f64>, q: Line<f64>) -> Coord<f64> {
    let mut nearest_pt = p.start;
    let mut min_dist = point_segment_distance(p.start, q);

    let dist = point_segment_distance(p.end, q);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = p.end;
    }
    let dist = point_segment_distance(q.start, p);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = q.start;
    }
    let dist = point_segment_distance(q.end, p);
    if dist < min_dist {
        nearest_pt = q.end;
    }
    nearest_pt
}

fn raw_line_intersection(p: Line<f64>, q: Line<f64>) -> Option<Coord<f64>> {
    let p_min_x = p.start.x.min(p.end.x);
    let p_min_y = p.start.y.min(p.end.y);
    let p_max_x = p.start.x.max(p.end.x);
    let p_max_y = p.start.y.max(p.end.y);

    let q_min_x = q.start.x.min(q.end.x);
    let q_min_y = q.start.y.min(q.end.y);
    let q_max_x = q.start.x.max(q.end.x);
    let q_max_y = q.start.y.max(q.end.y);

    let int_min_x = p_min_x.max(q_min_x);
    let int_max_x = p_max_x.min(q_max_x);
    let int_min_y = p_min_y.max(q_min_y);
    let int_max_y = p_max_y.min(q_max_y);

    let mid_x = (int_min_x + int_max_x) / 2.0;
    let mid_y = (int_min_y + int_max_y) / 2.0;

    // condition ordinate values by subtracting the midpoint of the envelope
    // intersection, which removes the common leading digits from the
    // homogeneous products below
    let p1x = p.start.x - mid_x;
    let p1y = p.start.y - mid_y;
    let p2x = p.end.x - mid_x;
    let p2y = p.end.y - mid_y;
    let q1x = q.start.x - mid_x;
    let q1y = q.start.y - mid_y;
    let q2x = q.end.x - mid_x;
    let q2y = q.end.y - mid_y;

    // unrolled computation using the homogeneous coordinates equation:
    // each segment maps to the projective line through its endpoints, and
    // the cross product of the two lines is the intersection
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = xw / w;
    let y_int = yw / w;

    // w == 0 means the projective intersection is a point at infinity: the
    // conditioned segments are parallel
    if (x_int.is_nan() || x_int.is_infinite()) || (y_int.is_nan() || y_int.is_infinite()) {
        None
    } else {
        // de-condition the intersection point
        Some(coord! {
            x: x_int + mid_x,
            y: y_int + mid_y,
        })
    }
}

/// This method computes the actual value of the intersection point. To
/// obtain the maximum precision from the intersection calculation, the
/// coordinates are normalized by subtracting the centre of the segments'
/// overlapping envelope, which keeps more significant digits available for
/// the products.
fn proper_intersection(p: Line<f64>, q: Line<f64>, precision_model: &PrecisionModel) -> Coord<f64> {
    // Round-off error can cause the raw computation to fail (usually due to
    // the segments being approximately parallel). If this happens, a
    // reasonable approximation is computed instead.
    let mut int_pt = raw_line_intersection(p, q).unwrap_or_else(|| nearest_endpoint(p, q));

    if !(rect_intersects_coord(&line_bounding_rect(p), &int_pt)
        && rect_intersects_coord(&line_bounding_rect(q), &int_pt))
    {
        debug!(
            "computed intersection {:?} escapes its segment envelopes; substituting nearest endpoint",
            int_pt
        );
        int_pt = nearest_endpoint(p, q);
    }
    precision_model.make_precise(&mut int_pt);
    int_pt
}

/// Computes the "edge distance" of an intersection point `intersection`
/// along `line`.
///
/// The edge distance is a metric of the point along the segment. The metric
/// used is a robust and easy-to-compute metric function. It is _not_
/// equivalent to the usual euclidean metric. It relies on the fact that
/// either the x or the y ordinates of the points in the edge are unique,
/// depending on whether the edge is longer in the horizontal or vertical
/// direction.
///
/// NOTE: This function may produce incorrect distances for inputs where
/// `intersection` is not precisely on `line`. It is safe for points which
/// are the result of _rounding_ points which lie on the line, but not for
/// _truncated_ points.
pub fn edge_distance(intersection: Coord<f64>, line: Line<f64>) -> f64 {
    let dx = (line.end.x - line.start.x).abs();
    let dy = (line.end.y - line.start.y).abs();

    let mut dist: f64;
    if intersection == line.start {
        dist = 0.0;
    } else if intersection == line.end {
        if dx > dy {
            dist = dx;
        } else {
            dist = dy;
        }
    } else {
        let intersection_dx = (intersection.x - line.start.x).abs();
        let intersection_dy = (intersection.y - line.start.y).abs();
        if dx > dy {
            dist = intersection_dx;
        } else {
            dist = intersection_dy;
        }
        // hack to ensure that non-endpoints always have a non-zero distance
        if dist == 0.0 && intersection != line.start {
            dist = intersection_dx.max(intersection_dy);
        }
    }
    debug_assert!(
        !(dist == 0.0 && intersection != line.start),
        "Bad distance calculation"
    );
    dist
}

/// A stateful wrapper around [`line_intersection_with_precision`], carrying
/// the working precision model and the most recent result.
///
/// Instances are not re-entrant: the stored result is overwritten by each
/// computation, so a `LineIntersector` must not be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct LineIntersector {
    precision_model: PrecisionModel,
    result: Option<LineIntersection>,
}

impl LineIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision_model(precision_model: PrecisionModel) -> Self {
        LineIntersector {
            precision_model,
            result: None,
        }
    }

    pub fn set_precision_model(&mut self, precision_model: PrecisionModel) {
        self.precision_model = precision_model;
    }

    pub fn precision_model(&self) -> &PrecisionModel {
        &self.precision_model
    }

    /// Compute the intersection of segments `p` and `q`, storing and
    /// returning the result.
    pub fn compute_segment_intersection(
        &mut self,
        p: Line<f64>,
        q: Line<f64>,
    ) -> Option<LineIntersection> {
        self.result = line_intersection_with_precision(p, q, &self.precision_model);
        self.result
    }

    /// Sets the intersection state for the point `coord` against the segment
    /// `line`: an intersection exists iff `coord` lies on the segment,
    /// endpoints included. The intersection is flagged proper iff `coord`
    /// is strictly interior to the segment.
    pub fn compute_point_on_line(&mut self, coord: Coord<f64>, line: Line<f64>) -> bool {
        self.result = None;
        // the envelope test is cheaper than the orientation tests, so it
        // runs first
        if rect_intersects_coord(&line_bounding_rect(line), &coord) {
            let collinear = orient2d(line.start, line.end, coord) == Orientation::Collinear
                && orient2d(line.end, line.start, coord) == Orientation::Collinear;
            if collinear {
                let is_proper = coord != line.start && coord != line.end;
                self.result = Some(LineIntersection::SinglePoint {
                    intersection: coord,
                    is_proper,
                });
                return true;
            }
        }
        false
    }

    pub fn has_intersection(&self) -> bool {
        self.result.is_some()
    }

    /// The number of intersection points found: 0, 1, or 2.
    pub fn intersection_count(&self) -> usize {
        match self.result {
            None => 0,
            Some(LineIntersection::SinglePoint { .. }) => 1,
            Some(LineIntersection::Collinear { .. }) => 2,
        }
    }

    /// The `index`th intersection point found.
    ///
    /// Panics when `index >= intersection_count()`.
    pub fn intersection(&self, index: usize) -> Coord<f64> {
        match (self.result, index) {
            (Some(LineIntersection::SinglePoint { intersection, .. }), 0) => intersection,
            (Some(LineIntersection::Collinear { intersection }), 0) => intersection.start,
            (Some(LineIntersection::Collinear { intersection }), 1) => intersection.end,
            _ => panic!("no intersection point {}", index),
        }
    }

    pub fn is_proper(&self) -> bool {
        self.result.map(|r| r.is_proper()).unwrap_or(false)
    }

    pub fn is_collinear(&self) -> bool {
        self.result.map(|r| r.is_collinear()).unwrap_or(false)
    }

    pub fn result(&self) -> Option<LineIntersection> {
        self.result
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn proper_crossing() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 2.0 });
        let line_2 = Line::new(coord! { x: 0.0, y: 2.0 }, coord! { x: 2.0, y: 0.0 });
        let actual = line_intersection(line_1, line_2);
        let expected = LineIntersection::SinglePoint {
            intersection: coord! { x: 1.0, y: 1.0 },
            is_proper: true,
        };
        assert_eq!(actual, Some(expected));
    }

    #[test]
    fn collinear_overlap() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 });
        let line_2 = Line::new(coord! { x: 2.0, y: 0.0 }, coord! { x: 6.0, y: 0.0 });
        let mut li = LineIntersector::new();
        li.compute_segment_intersection(line_1, line_2);
        assert!(li.is_collinear());
        assert_eq!(li.intersection_count(), 2);
        assert_eq!(li.intersection(0), coord! { x: 2.0, y: 0.0 });
        assert_eq!(li.intersection(1), coord! { x: 4.0, y: 0.0 });
    }

    #[test]
    fn endpoint_touch_is_improper() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 });
        let line_2 = Line::new(coord! { x: 5.0, y: 5.0 }, coord! { x: 5.0, y: 0.0 });
        let expected = LineIntersection::SinglePoint {
            intersection: coord! { x: 5.0, y: 5.0 },
            is_proper: false,
        };
        assert_eq!(line_intersection(line_1, line_2), Some(expected));
    }

    #[test]
    fn disjoint_parallel_lines() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 });
        let line_2 = Line::new(coord! { x: 0.0, y: 1.0 }, coord! { x: 5.0, y: 6.0 });
        assert_eq!(line_intersection(line_1, line_2), None);
    }

    #[test]
    fn intersection_is_idempotent_under_fixed_precision() {
        let pm = PrecisionModel::new_fixed(1_000.0).unwrap();
        let line_1 = Line::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 9.337, y: 6.154 },
        );
        let line_2 = Line::new(
            coord! { x: 0.0, y: 5.0 },
            coord! { x: 8.211, y: 0.001 },
        );
        let first = line_intersection_with_precision(line_1, line_2, &pm);
        let second = line_intersection_with_precision(line_1, line_2, &pm);
        assert_eq!(first, second);

        if let Some(LineIntersection::SinglePoint { intersection, .. }) = first {
            // the point sits exactly on the precision grid
            assert_eq!(intersection, pm.precise(intersection));
        } else {
            panic!("expected a single-point intersection");
        }
    }

    #[test]
    fn intersection_lies_within_both_envelopes() {
        let line_1 = Line::new(
            coord! { x: 4348433.262114629, y: 5552595.478385733 },
            coord! { x: 4348440.849387404, y: 5552599.272022122 },
        );
        let line_2 = Line::new(
            coord! { x: 4348433.26211463, y: 5552595.47838573 },
            coord! { x: 4348440.8493874, y: 5552599.27202212 },
        );
        let result = line_intersection(line_1, line_2).unwrap();
        if let LineIntersection::SinglePoint { intersection, .. } = result {
            assert!(rect_intersects_coord(
                &line_bounding_rect(line_1),
                &intersection
            ));
            assert!(rect_intersects_coord(
                &line_bounding_rect(line_2),
                &intersection
            ));
        } else {
            panic!("expected a single-point intersection");
        }
    }

    /// Based on JTS test `testCentralEndpointHeuristicFailure`
    /// > Following cases were failures when using the CentralEndpointIntersector heuristic.
    /// > This is because one segment lies at a significant angle to the other,
    /// > with only one endpoint is close to the other segment.
    /// > The CE heuristic chose the wrong endpoint to return.
    /// > The fix is to use a new heuristic which out of the 4 endpoints
    /// > chooses the one which is closest to the other segment.
    /// > This works in all known failure cases.
    #[test]
    fn test_central_endpoint_heuristic_failure_1() {
        let line_1 = Line::new(
            coord! { x: 163.81867067, y: -211.31840378 },
            coord! { x: 165.9174252, y: -214.1665075 },
        );
        let line_2 = Line::new(
            coord! { x: 2.84139601, y: -57.95412726 },
            coord! { x: 469.59990601, y: -502.63851732 },
        );
        let actual = line_intersection(line_1, line_2);
        let expected = LineIntersection::SinglePoint {
            intersection: coord! { x: 163.81867067, y: -211.31840378 },
            is_proper: true,
        };
        assert_eq!(actual, Some(expected));
    }

    /// Based on JTS test `testTomasFa_1`
    /// > Test from Tomas Fa - JTS list 6/13/2012
    /// >
    /// > Fails using original JTS DeVillers determine orientation test.
    /// > Succeeds using DD and Shewchuk orientation
    #[test]
    fn test_tomas_fa_1() {
        let line_1 = Line::new(coord! { x: -42.0, y: 163.2 }, coord! { x: 21.2, y: 265.2 });
        let line_2 = Line::new(coord! { x: -26.2, y: 188.7 }, coord! { x: 37.0, y: 290.7 });
        assert_eq!(line_intersection(line_1, line_2), None);
    }

    /// Based on JTS test `testDaveSkeaCase()`
    ///
    /// > This used to be a failure case (exception), but apparently works
    /// > now. Possibly normalization has fixed this?
    #[test]
    fn test_dave_skea_case() {
        let line_1 = Line::new(
            coord! { x: 2089426.5233462777, y: 1180182.387733969 },
            coord! { x: 2085646.6891757075, y: 1195618.7333999649 },
        );
        let line_2 = Line::new(
            coord! { x: 1889281.8148903656, y: 1997547.0560044837 },
            coord! { x: 2259977.3672236, y: 483675.17050843034 },
        );
        let actual = line_intersection(line_1, line_2);
        let expected = LineIntersection::SinglePoint {
            intersection: coord! { x: 2087536.6062609926, y: 1187900.560566967 },
            is_proper: true,
        };
        assert_eq!(actual, Some(expected));
    }

    #[test]
    fn point_on_line_flags() {
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 });
        let mut li = LineIntersector::new();

        assert!(li.compute_point_on_line(coord! { x: 2.0, y: 0.0 }, line));
        assert!(li.is_proper());

        assert!(li.compute_point_on_line(coord! { x: 4.0, y: 0.0 }, line));
        assert!(!li.is_proper());

        assert!(!li.compute_point_on_line(coord! { x: 2.0, y: 0.1 }, line));
        assert!(!li.has_intersection());
    }

    #[test]
    fn edge_distance_orders_points_along_segment() {
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 1.0 });
        let near = edge_distance(coord! { x: 2.0, y: 0.2 }, line);
        let far = edge_distance(coord! { x: 7.0, y: 0.7 }, line);
        assert!(near < far);
        assert_eq!(edge_distance(line.start, line), 0.0);
        assert_eq!(edge_distance(line.end, line), 10.0);
    }
}
