//! Internal utility functions, types, and data structures.

use geo_types::{Coord, Line, Rect};
use std::cmp::Ordering;

/// Compare two coordinates lexicographically: first by x, then by y.
///
/// Expects none of the coordinates to be `NaN`.
pub fn lex_cmp(p: &Coord<f64>, q: &Coord<f64>) -> Ordering {
    p.x.partial_cmp(&q.x)
        .unwrap()
        .then(p.y.partial_cmp(&q.y).unwrap())
}

/// The smallest `Rect` containing both `rect` and `coord`.
pub fn rect_expanded_to_include(rect: Rect<f64>, coord: Coord<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: rect.min().x.min(coord.x),
            y: rect.min().y.min(coord.y),
        },
        Coord {
            x: rect.max().x.max(coord.x),
            y: rect.max().y.max(coord.y),
        },
    )
}

/// The smallest `Rect` containing both arguments.
pub fn rect_union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// `rect` shifted by the vector `(dx, dy)`.
pub fn rect_translated_by(rect: Rect<f64>, dx: f64, dy: f64) -> Rect<f64> {
    Rect::new(
        Coord {
            x: rect.min().x + dx,
            y: rect.min().y + dy,
        },
        Coord {
            x: rect.max().x + dx,
            y: rect.max().y + dy,
        },
    )
}

/// `rect` grown by `distance` on every side.
pub fn rect_inflated_by(rect: Rect<f64>, distance: f64) -> Rect<f64> {
    Rect::new(
        Coord {
            x: rect.min().x - distance,
            y: rect.min().y - distance,
        },
        Coord {
            x: rect.max().x + distance,
            y: rect.max().y + distance,
        },
    )
}

/// True iff `coord` lies inside or on the boundary of `rect`.
pub fn rect_intersects_coord(rect: &Rect<f64>, coord: &Coord<f64>) -> bool {
    coord.x >= rect.min().x
        && coord.x <= rect.max().x
        && coord.y >= rect.min().y
        && coord.y <= rect.max().y
}

/// True iff the two rectangles share at least a boundary point.
pub fn rects_intersect(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x
        && a.max().x >= b.min().x
        && a.min().y <= b.max().y
        && a.max().y >= b.min().y
}

/// True iff `outer` contains every point of `inner` (boundaries included).
pub fn rect_contains_rect(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    inner.min().x >= outer.min().x
        && inner.max().x <= outer.max().x
        && inner.min().y >= outer.min().y
        && inner.max().y <= outer.max().y
}

/// The envelope of the segment `line`.
pub fn line_bounding_rect(line: Line<f64>) -> Rect<f64> {
    Rect::new(line.start, line.end)
}

/// The perpendicular distance from `p` to the segment `line` (not the
/// infinite line through it).
pub fn point_segment_distance(p: Coord<f64>, line: Line<f64>) -> f64 {
    if line.start == line.end {
        return line.start.distance(p);
    }
    // project p onto the segment, clamping the projection factor to [0, 1]
    let d = line.delta();
    let len2 = d.x * d.x + d.y * d.y;
    let r = ((p.x - line.start.x) * d.x + (p.y - line.start.y) * d.y) / len2;
    if r <= 0.0 {
        return line.start.distance(p);
    }
    if r >= 1.0 {
        return line.end.distance(p);
    }
    let s = ((line.start.y - p.y) * d.x - (line.start.x - p.x) * d.y) / len2;
    s.abs() * len2.sqrt()
}

/// Enumeration that allows for two distinct iterator types that yield the
/// same item type.
pub enum EitherIter<T, I1, I2>
where
    I1: Iterator<Item = T>,
    I2: Iterator<Item = T>,
{
    A(I1),
    B(I2),
}

impl<T, I1, I2> Iterator for EitherIter<T, I1, I2>
where
    I1: Iterator<Item = T>,
    I2: Iterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            EitherIter::A(iter) => iter.next(),
            EitherIter::B(iter) => iter.next(),
        }
    }
}

pub(crate) trait CoordDistance {
    fn distance(&self, other: Coord<f64>) -> f64;
    fn distance_squared(&self, other: Coord<f64>) -> f64;
}

impl CoordDistance for Coord<f64> {
    fn distance(&self, other: Coord<f64>) -> f64 {
        self.distance_squared(other).sqrt()
    }

    fn distance_squared(&self, other: Coord<f64>) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
