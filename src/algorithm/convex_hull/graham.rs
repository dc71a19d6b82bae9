use crate::algorithm::kernels::{orient2d, Orientation};
use crate::utils::CoordDistance;
use geo_types::Coord;
use std::cmp::Ordering;

/// Graham Scan: <https://en.wikipedia.org/wiki/Graham_scan>
///
/// `points` must hold at least three distinct coordinates. Returns the
/// strictly convex hull vertices in counter-clockwise order, starting at the
/// lowest-then-leftmost point, without a closing coordinate. Collinear
/// vertices along a hull edge are dropped.
pub fn graham_hull(points: &mut [Coord<f64>]) -> Vec<Coord<f64>> {
    debug_assert!(points.len() >= 3);

    // find the lowest-then-leftmost point and move it to the head; every
    // other point has a well-defined polar angle around it in [0, π]
    let mut origin_idx = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let origin = &points[origin_idx];
        if (p.y, p.x) < (origin.y, origin.x) {
            origin_idx = i;
        }
    }
    points.swap(0, origin_idx);
    let total_len = points.len();
    let (head, tail) = points.split_first_mut().expect("len checked above");
    let origin = *head;

    // radial presort around the origin; the robust orientation index is the
    // comparator, with ties between collinear points broken by distance
    tail.sort_unstable_by(|q, r| match orient2d(origin, *q, *r) {
        Orientation::CounterClockwise => Ordering::Less,
        Orientation::Clockwise => Ordering::Greater,
        Orientation::Collinear => origin
            .distance_squared(*q)
            .partial_cmp(&origin.distance_squared(*r))
            .unwrap(),
    });

    let mut stack: Vec<Coord<f64>> = Vec::with_capacity(total_len);
    stack.push(origin);
    for pt in tail.iter() {
        while stack.len() > 1 {
            let len = stack.len();
            match orient2d(stack[len - 2], stack[len - 1], *pt) {
                Orientation::CounterClockwise => break,
                // pop anything that no longer makes a strict left turn,
                // which also strips collinear interior vertices
                Orientation::Clockwise | Orientation::Collinear => {
                    stack.pop();
                }
            }
        }
        // corner case: a repeat of the origin must not be pushed on top of
        // the single stacked origin
        if pt != stack.last().unwrap() {
            stack.push(*pt);
        }
    }

    stack
}
