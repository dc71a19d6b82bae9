use super::graph::Position;
use super::EndCapStyle;
use crate::algorithm::kernels::{orient2d, Orientation};
use crate::algorithm::line_intersection::{LineIntersection, LineIntersector};
use crate::utils::CoordDistance;
use crate::PrecisionModel;
use geo_types::{Coord, Line};
use std::f64::consts::PI;

/// Factor controlling how close an inside-turn's offset endpoints must be
/// before they are merged into a single curve vertex.
const CURVE_VERTEX_SNAP_DISTANCE_FACTOR: f64 = 1.0 / 1000.0;

/// Computes the raw offset curve for a single line, ring, or point
/// component at a given distance.
///
/// The raw curve is not simple: it may self-intersect and cross other raw
/// curves, which is resolved later by noding. Every emitted vertex is
/// rounded by the precision model, and consecutive duplicates are
/// suppressed.
///
/// A builder instance carries per-curve scratch state and is not
/// re-entrant.
pub(crate) struct OffsetCurveBuilder {
    precision_model: PrecisionModel,
    end_cap_style: EndCapStyle,
    /// Max angular span of one fillet segment: `π / (2 · quadrant_segments)`.
    fillet_angle_quantum: f64,
    li: LineIntersector,

    distance: f64,
    side: Position,
    s0: Coord<f64>,
    s1: Coord<f64>,
    s2: Coord<f64>,
    offset0: Line<f64>,
    offset1: Line<f64>,
    vertices: Vec<Coord<f64>>,
}

impl OffsetCurveBuilder {
    pub fn new(
        precision_model: PrecisionModel,
        quadrant_segments: u32,
        end_cap_style: EndCapStyle,
    ) -> OffsetCurveBuilder {
        let quadrant_segments = quadrant_segments.max(1);
        OffsetCurveBuilder {
            precision_model,
            end_cap_style,
            fillet_angle_quantum: PI / 2.0 / quadrant_segments as f64,
            li: LineIntersector::new(),
            distance: 0.0,
            side: Position::Left,
            s0: Coord { x: 0.0, y: 0.0 },
            s1: Coord { x: 0.0, y: 0.0 },
            s2: Coord { x: 0.0, y: 0.0 },
            offset0: Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 }),
            offset1: Line::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 0.0 }),
            vertices: vec![],
        }
    }

    /// The offset curve of a line (or of a single point, which gets its cap
    /// shape). Lines buffered by a non-positive distance produce nothing.
    pub fn line_curve(&mut self, input_pts: &[Coord<f64>], distance: f64) -> Vec<Vec<Coord<f64>>> {
        if distance <= 0.0 {
            return vec![];
        }
        self.init(distance);

        if input_pts.len() <= 1 {
            match self.end_cap_style {
                EndCapStyle::Round => self.add_circle(input_pts[0], distance),
                EndCapStyle::Square => self.add_square(input_pts[0], distance),
                // a flat cap of a point is empty
                EndCapStyle::Flat => {}
            }
        } else {
            self.compute_line_buffer_curve(input_pts);
        }
        self.take_curve()
    }

    /// The one-sided offset curve of a ring. Distance zero reproduces the
    /// ring itself.
    pub fn ring_curve(
        &mut self,
        input_pts: &[Coord<f64>],
        side: Position,
        distance: f64,
    ) -> Vec<Vec<Coord<f64>>> {
        self.init(distance);
        if input_pts.len() <= 2 {
            return self.line_curve(input_pts, distance);
        }
        if distance == 0.0 {
            return vec![input_pts.to_vec()];
        }
        self.compute_ring_buffer_curve(input_pts, side);
        self.take_curve()
    }

    fn init(&mut self, distance: f64) {
        self.distance = distance;
        self.vertices.clear();
    }

    fn take_curve(&mut self) -> Vec<Vec<Coord<f64>>> {
        if self.vertices.len() < 2 {
            return vec![];
        }
        vec![std::mem::take(&mut self.vertices)]
    }

    fn compute_line_buffer_curve(&mut self, input_pts: &[Coord<f64>]) {
        let n = input_pts.len() - 1;

        // compute points for the left side of the line
        self.init_side_segments(input_pts[0], input_pts[1], Position::Left);
        for pt in &input_pts[2..=n] {
            self.add_next_segment(*pt, true);
        }
        self.add_last_segment();
        self.add_line_end_cap(input_pts[n - 1], input_pts[n]);

        // compute points for the right side, by traversing in reverse
        self.init_side_segments(input_pts[n], input_pts[n - 1], Position::Left);
        for pt in input_pts[..n - 1].iter().rev() {
            self.add_next_segment(*pt, true);
        }
        self.add_last_segment();
        self.add_line_end_cap(input_pts[1], input_pts[0]);

        self.close_ring();
    }

    fn compute_ring_buffer_curve(&mut self, input_pts: &[Coord<f64>], side: Position) {
        let n = input_pts.len() - 1;
        self.init_side_segments(input_pts[n - 1], input_pts[0], side);
        for (i, pt) in input_pts[1..=n].iter().enumerate() {
            let add_start_point = i != 0;
            self.add_next_segment(*pt, add_start_point);
        }
        self.close_ring();
    }

    fn init_side_segments(&mut self, s1: Coord<f64>, s2: Coord<f64>, side: Position) {
        self.s1 = s1;
        self.s2 = s2;
        self.side = side;
        self.offset1 = Self::offset_segment(Line::new(s1, s2), side, self.distance);
    }

    /// The segment offset perpendicular to `seg` on `side`, computed in
    /// full precision.
    fn offset_segment(seg: Line<f64>, side: Position, distance: f64) -> Line<f64> {
        let side_sign = if side == Position::Left { 1.0 } else { -1.0 };
        let dx = seg.end.x - seg.start.x;
        let dy = seg.end.y - seg.start.y;
        let len = dx.hypot(dy);
        // u is the perpendicular of the requested side, scaled to distance
        let ux = side_sign * distance * (-dy) / len;
        let uy = side_sign * distance * dx / len;
        Line::new(
            Coord {
                x: seg.start.x + ux,
                y: seg.start.y + uy,
            },
            Coord {
                x: seg.end.x + ux,
                y: seg.end.y + uy,
            },
        )
    }

    fn add_next_segment(&mut self, p: Coord<f64>, add_start_point: bool) {
        // do nothing if points are equal; a zero-length segment has no
        // offset direction
        if self.s2 == p {
            return;
        }

        self.s0 = self.s1;
        self.s1 = self.s2;
        self.s2 = p;
        self.offset0 = self.offset1;
        self.offset1 = Self::offset_segment(Line::new(self.s1, self.s2), self.side, self.distance);

        let orientation = orient2d(self.s0, self.s1, self.s2);
        let outside_turn = (orientation == Orientation::Clockwise && self.side == Position::Left)
            || (orientation == Orientation::CounterClockwise && self.side == Position::Right);

        if orientation == Orientation::Collinear {
            // segments are collinear: either parallel in the same direction
            // (the offsets stay parallel too and the point can be skipped)
            // or doubling back, which needs a half-circle cap fillet
            self.li
                .compute_segment_intersection(Line::new(self.s0, self.s1), Line::new(self.s1, self.s2));
            if self.li.intersection_count() >= 2 {
                self.add_fillet_between(
                    self.s1,
                    self.offset0.end,
                    self.offset1.start,
                    Orientation::Clockwise,
                    self.distance,
                );
            }
        } else if outside_turn {
            if add_start_point {
                self.add_pt(self.offset0.end);
            }
            self.add_fillet_between(
                self.s1,
                self.offset0.end,
                self.offset1.start,
                orientation,
                self.distance,
            );
            self.add_pt(self.offset1.start);
        } else {
            // inside turn: use the intersection of the offset segments when
            // they have one
            match self.li.compute_segment_intersection(self.offset0, self.offset1) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    self.add_pt(intersection);
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    self.add_pt(intersection.start);
                }
                None => {
                    // The angle is so sharp (or the offset so large) that the
                    // offset segments miss each other. If their endpoints
                    // nearly coincide the curve can be pinched to one point;
                    // otherwise route the curve back through the corner
                    // vertex itself, which keeps the topology of the closing
                    // segment correct.
                    if self.offset0.end.distance(self.offset1.start)
                        < self.distance * CURVE_VERTEX_SNAP_DISTANCE_FACTOR
                    {
                        self.add_pt(self.offset0.end);
                    } else {
                        self.add_pt(self.offset0.end);
                        self.add_pt(self.s1);
                        self.add_pt(self.offset1.start);
                    }
                }
            }
        }
    }

    /// Add the last offset point of the side currently being traversed.
    fn add_last_segment(&mut self) {
        self.add_pt(self.offset1.end);
    }

    fn add_line_end_cap(&mut self, p0: Coord<f64>, p1: Coord<f64>) {
        let seg = Line::new(p0, p1);
        let offset_l = Self::offset_segment(seg, Position::Left, self.distance);
        let offset_r = Self::offset_segment(seg, Position::Right, self.distance);

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let angle = dy.atan2(dx);

        match self.end_cap_style {
            EndCapStyle::Round => {
                self.add_pt(offset_l.end);
                self.add_fillet_arc(
                    p1,
                    angle + PI / 2.0,
                    angle - PI / 2.0,
                    Orientation::Clockwise,
                    self.distance,
                );
                self.add_pt(offset_r.end);
            }
            EndCapStyle::Flat => {
                self.add_pt(offset_l.end);
                self.add_pt(offset_r.end);
            }
            EndCapStyle::Square => {
                // extend both offsets past the end of the line
                let cap_offset = Coord {
                    x: self.distance.abs() * angle.cos(),
                    y: self.distance.abs() * angle.sin(),
                };
                self.add_pt(Coord {
                    x: offset_l.end.x + cap_offset.x,
                    y: offset_l.end.y + cap_offset.y,
                });
                self.add_pt(Coord {
                    x: offset_r.end.x + cap_offset.x,
                    y: offset_r.end.y + cap_offset.y,
                });
            }
        }
    }

    /// Add the fillet arc around `p` connecting the offset points `p0` and
    /// `p1`, sweeping in `direction`.
    fn add_fillet_between(
        &mut self,
        p: Coord<f64>,
        p0: Coord<f64>,
        p1: Coord<f64>,
        direction: Orientation,
        radius: f64,
    ) {
        let mut start_angle = (p0.y - p.y).atan2(p0.x - p.x);
        let end_angle = (p1.y - p.y).atan2(p1.x - p.x);

        if direction == Orientation::Clockwise {
            if start_angle <= end_angle {
                start_angle += 2.0 * PI;
            }
        } else if start_angle >= end_angle {
            start_angle -= 2.0 * PI;
        }

        self.add_pt(p0);
        self.add_fillet_arc(p, start_angle, end_angle, direction, radius);
        self.add_pt(p1);
    }

    /// Emit the interior points of a fillet arc around `p` from
    /// `start_angle` to `end_angle` (radians).
    fn add_fillet_arc(
        &mut self,
        p: Coord<f64>,
        start_angle: f64,
        end_angle: f64,
        direction: Orientation,
        radius: f64,
    ) {
        let direction_factor = if direction == Orientation::Clockwise {
            -1.0
        } else {
            1.0
        };

        let total_angle = (start_angle - end_angle).abs();
        let n_segs = (total_angle / self.fillet_angle_quantum).ceil() as usize;
        if n_segs < 1 {
            return;
        }

        // equal-length arc segments
        let angle_increment = total_angle / n_segs as f64;
        let mut curr_angle = 0.0;
        while curr_angle < total_angle {
            let angle = start_angle + direction_factor * curr_angle;
            self.add_pt(Coord {
                x: p.x + radius * angle.cos(),
                y: p.y + radius * angle.sin(),
            });
            curr_angle += angle_increment;
        }
    }

    /// A full circle around `p`, wound clockwise.
    fn add_circle(&mut self, p: Coord<f64>, distance: f64) {
        self.add_pt(Coord {
            x: p.x + distance,
            y: p.y,
        });
        self.add_fillet_arc(p, 0.0, 2.0 * PI, Orientation::Clockwise, distance);
        self.close_ring();
    }

    /// A full square around `p`, wound clockwise.
    fn add_square(&mut self, p: Coord<f64>, distance: f64) {
        self.add_pt(Coord {
            x: p.x + distance,
            y: p.y + distance,
        });
        self.add_pt(Coord {
            x: p.x + distance,
            y: p.y - distance,
        });
        self.add_pt(Coord {
            x: p.x - distance,
            y: p.y - distance,
        });
        self.add_pt(Coord {
            x: p.x - distance,
            y: p.y + distance,
        });
        self.add_pt(Coord {
            x: p.x + distance,
            y: p.y + distance,
        });
    }

    /// Round through the precision model and append, suppressing
    /// consecutive duplicates.
    fn add_pt(&mut self, coord: Coord<f64>) {
        let rounded = self.precision_model.precise(coord);
        if self.vertices.last() == Some(&rounded) {
            return;
        }
        self.vertices.push(rounded);
    }

    fn close_ring(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let start = self.vertices[0];
        if self.vertices.last() != Some(&start) {
            self.vertices.push(start);
        }
    }
}
