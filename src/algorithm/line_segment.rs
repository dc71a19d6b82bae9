use crate::algorithm::kernels::{orient2d, Orientation};
use crate::utils::{lex_cmp, point_segment_distance};
use geo_types::{Coord, Line};
use std::cmp::Ordering;

/// Segment operations on [`Line`]: normalization, projection, perpendicular
/// distance, and orientation indices.
pub trait LineSegmentOps {
    /// The segment with its endpoints exchanged.
    fn reversed(&self) -> Self;

    /// The segment re-oriented so that `start <= end` lexicographically.
    fn normalized(&self) -> Self;

    /// The projection factor of `coord` onto the infinite line through this
    /// segment: 0 at `start`, 1 at `end`.
    fn projection_factor(&self, coord: Coord<f64>) -> f64;

    /// The closest point to `coord` on this segment.
    fn project(&self, coord: Coord<f64>) -> Coord<f64>;

    /// The perpendicular distance from `coord` to this segment.
    fn distance_to_point(&self, coord: Coord<f64>) -> f64;

    /// The robust orientation of `coord` relative to the directed segment.
    fn orientation_of(&self, coord: Coord<f64>) -> Orientation;

    /// The orientation of `other` relative to this segment: `1` if `other`
    /// lies to the left, `-1` if to the right, `0` if it crosses or is
    /// collinear.
    fn orientation_index_of(&self, other: &Line<f64>) -> i32;

    /// Lexicographic segment ordering: `start` coordinates first, then
    /// `end`.
    fn cmp_segments(&self, other: &Line<f64>) -> Ordering;

    fn is_horizontal(&self) -> bool;

    fn is_vertical(&self) -> bool;

    fn midpoint(&self) -> Coord<f64>;
}

impl LineSegmentOps for Line<f64> {
    fn reversed(&self) -> Self {
        Line::new(self.end, self.start)
    }

    fn normalized(&self) -> Self {
        if lex_cmp(&self.end, &self.start) == Ordering::Less {
            self.reversed()
        } else {
            *self
        }
    }

    fn projection_factor(&self, coord: Coord<f64>) -> f64 {
        if coord == self.start {
            return 0.0;
        }
        if coord == self.end {
            return 1.0;
        }
        let d = self.delta();
        let len2 = d.x * d.x + d.y * d.y;
        ((coord.x - self.start.x) * d.x + (coord.y - self.start.y) * d.y) / len2
    }

    fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let r = self.projection_factor(coord);
        Coord {
            x: self.start.x + r * self.dx(),
            y: self.start.y + r * self.dy(),
        }
    }

    fn distance_to_point(&self, coord: Coord<f64>) -> f64 {
        point_segment_distance(coord, *self)
    }

    fn orientation_of(&self, coord: Coord<f64>) -> Orientation {
        orient2d(self.start, self.end, coord)
    }

    fn orientation_index_of(&self, other: &Line<f64>) -> i32 {
        let orient0 = self.orientation_of(other.start).index();
        let orient1 = self.orientation_of(other.end).index();
        if orient0 >= 0 && orient1 >= 0 {
            return orient0.max(orient1);
        }
        if orient0 <= 0 && orient1 <= 0 {
            return orient0.min(orient1);
        }
        // endpoints lie on opposite sides: indeterminate
        0
    }

    fn cmp_segments(&self, other: &Line<f64>) -> Ordering {
        lex_cmp(&self.start, &other.start).then_with(|| lex_cmp(&self.end, &other.end))
    }

    fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    fn midpoint(&self) -> Coord<f64> {
        Coord {
            x: (self.start.x + self.end.x) / 2.0,
            y: (self.start.y + self.end.y) / 2.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::coord;

    #[test]
    fn normalize_swaps_reversed_segments() {
        let seg = Line::new(coord! { x: 2.0, y: 0.0 }, coord! { x: 1.0, y: 5.0 });
        let norm = seg.normalized();
        assert_eq!(norm.start, coord! { x: 1.0, y: 5.0 });
        assert_eq!(norm.end, coord! { x: 2.0, y: 0.0 });
        assert_eq!(norm, norm.normalized());
    }

    #[test]
    fn projection_onto_diagonal() {
        let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 });
        assert_relative_eq!(seg.projection_factor(coord! { x: 5.0, y: 5.0 }), 0.5);
        let projected = seg.project(coord! { x: 0.0, y: 10.0 });
        assert_relative_eq!(projected.x, 5.0);
        assert_relative_eq!(projected.y, 5.0);
    }

    #[test]
    fn segment_orientation_index() {
        let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        let above = Line::new(coord! { x: 2.0, y: 1.0 }, coord! { x: 4.0, y: 2.0 });
        let below = Line::new(coord! { x: 2.0, y: -1.0 }, coord! { x: 4.0, y: -2.0 });
        let crossing = Line::new(coord! { x: 2.0, y: -1.0 }, coord! { x: 4.0, y: 2.0 });
        let touching = Line::new(coord! { x: 2.0, y: 0.0 }, coord! { x: 4.0, y: 2.0 });
        assert_eq!(seg.orientation_index_of(&above), 1);
        assert_eq!(seg.orientation_index_of(&below), -1);
        assert_eq!(seg.orientation_index_of(&crossing), 0);
        assert_eq!(seg.orientation_index_of(&touching), 1);
    }
}
