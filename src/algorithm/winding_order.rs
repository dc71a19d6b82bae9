use crate::algorithm::area::twice_signed_ring_area;
use crate::algorithm::kernels::{orient2d, Orientation};
use crate::utils::EitherIter;
use geo_types::{Coord, LineString};
use std::iter::Rev;
use std::slice::Iter;

/// How a linestring is wound, clockwise or counter-clockwise.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

impl WindingOrder {
    pub fn reversed(self) -> WindingOrder {
        match self {
            WindingOrder::Clockwise => WindingOrder::CounterClockwise,
            WindingOrder::CounterClockwise => WindingOrder::Clockwise,
        }
    }
}

/// Robust ring-orientation predicates.
///
/// Both variants decide using the orientation of the two distinct neighbours
/// of the highest vertex, so the answer depends on a single robust
/// orientation test rather than a summed area.
pub struct RingOrientation;

impl RingOrientation {
    /// Orientation of a closed ring, tolerating repeated coordinates.
    ///
    /// The neighbours of the highest vertex are found by scanning past any
    /// repetition of it. Returns `None` for degenerate rings: fewer than
    /// four coordinates, all points collapsing onto the highest one, or an
    /// A–B–A spike at the top.
    ///
    /// This is the variant used throughout the crate.
    pub fn of(ring: &[Coord<f64>]) -> Option<WindingOrder> {
        // number of points without the closing endpoint
        let n_pts = ring.len().checked_sub(1)?;
        if n_pts < 3 {
            return None;
        }

        let mut hi_index = 0;
        for (i, p) in ring.iter().enumerate().take(n_pts + 1).skip(1) {
            if p.y > ring[hi_index].y {
                hi_index = i;
            }
        }
        let hi_pt = ring[hi_index];

        // find a distinct point before the highest point
        let mut i_prev = hi_index;
        loop {
            i_prev = if i_prev == 0 { n_pts } else { i_prev - 1 };
            if ring[i_prev] != hi_pt || i_prev == hi_index {
                break;
            }
        }

        // find a distinct point after the highest point
        let mut i_next = hi_index;
        loop {
            i_next = (i_next + 1) % n_pts;
            if ring[i_next] != hi_pt || i_next == hi_index {
                break;
            }
        }

        let prev = ring[i_prev];
        let next = ring[i_next];

        // catches rings which collapse to a line or an A-B-A spike
        if prev == hi_pt || next == hi_pt || prev == next {
            return None;
        }

        Self::decide(prev, hi_pt, next)
    }

    /// Orientation of a closed ring, assuming no repeated coordinates.
    ///
    /// Cheaper than [`RingOrientation::of`], but an undetected repetition of
    /// the highest vertex yields a meaningless answer. Returns `None` for
    /// rings of fewer than four coordinates.
    pub fn of_strict(ring: &[Coord<f64>]) -> Option<WindingOrder> {
        let n_pts = ring.len().checked_sub(1)?;
        if n_pts < 3 {
            return None;
        }

        let mut hi_index = 0;
        for (i, p) in ring.iter().enumerate().take(n_pts).skip(1) {
            if p.y > ring[hi_index].y {
                hi_index = i;
            }
        }
        let prev = ring[(hi_index + n_pts - 1) % n_pts];
        let next = ring[(hi_index + 1) % n_pts];

        Self::decide(prev, ring[hi_index], next)
    }

    fn decide(prev: Coord<f64>, hi: Coord<f64>, next: Coord<f64>) -> Option<WindingOrder> {
        match orient2d(prev, hi, next) {
            Orientation::CounterClockwise => Some(WindingOrder::CounterClockwise),
            Orientation::Clockwise => Some(WindingOrder::Clockwise),
            // the three points are collinear; the ring is CCW iff prev is to
            // the right of next
            Orientation::Collinear => {
                if prev.x == next.x {
                    None
                } else if prev.x > next.x {
                    Some(WindingOrder::CounterClockwise)
                } else {
                    Some(WindingOrder::Clockwise)
                }
            }
        }
    }
}

/// True iff the closed ring is wound counter-clockwise.
///
/// Uses the repetition-tolerant [`RingOrientation::of`]; degenerate rings
/// report `false`.
pub fn is_ccw(ring: &[Coord<f64>]) -> bool {
    RingOrientation::of(ring) == Some(WindingOrder::CounterClockwise)
}

/// Iterates through a list of `Coord`s
pub struct Points<'a>(
    #[allow(clippy::type_complexity)]
    EitherIter<&'a Coord<f64>, Iter<'a, Coord<f64>>, Rev<Iter<'a, Coord<f64>>>>,
);

impl<'a> Iterator for Points<'a> {
    type Item = &'a Coord<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Calculate, and work with, the winding order.
pub trait Winding {
    /// Return the winding order of this object, `None` if it is degenerate.
    fn winding_order(&self) -> Option<WindingOrder>;

    /// True iff this is wound clockwise
    fn is_cw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::Clockwise)
    }

    /// True iff this is wound counterclockwise
    fn is_ccw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::CounterClockwise)
    }

    /// Iterate over the coordinates in a clockwise order
    fn points_cw(&self) -> Points<'_>;

    /// Iterate over the coordinates in a counter-clockwise order
    fn points_ccw(&self) -> Points<'_>;

    /// Change this object's coordinates so they are in clockwise winding
    /// order
    fn make_cw_winding(&mut self);

    /// Change this object's coordinates so they are in counterclockwise
    /// winding order
    fn make_ccw_winding(&mut self);

    /// Change the winding order to the given order
    fn make_winding_order(&mut self, winding_order: WindingOrder) {
        match winding_order {
            WindingOrder::Clockwise => self.make_cw_winding(),
            WindingOrder::CounterClockwise => self.make_ccw_winding(),
        }
    }
}

impl Winding for LineString<f64> {
    fn winding_order(&self) -> Option<WindingOrder> {
        RingOrientation::of(&self.0).or_else(|| {
            // ring is degenerate at its highest vertex; the summed area may
            // still be decisive
            let shoelace = twice_signed_ring_area(self);
            if shoelace < 0.0 {
                Some(WindingOrder::Clockwise)
            } else if shoelace > 0.0 {
                Some(WindingOrder::CounterClockwise)
            } else {
                None
            }
        })
    }

    fn points_cw(&self) -> Points<'_> {
        match self.winding_order() {
            Some(WindingOrder::CounterClockwise) => Points(EitherIter::B(self.0.iter().rev())),
            _ => Points(EitherIter::A(self.0.iter())),
        }
    }

    fn points_ccw(&self) -> Points<'_> {
        match self.winding_order() {
            Some(WindingOrder::Clockwise) => Points(EitherIter::B(self.0.iter().rev())),
            _ => Points(EitherIter::A(self.0.iter())),
        }
    }

    fn make_cw_winding(&mut self) {
        if let Some(WindingOrder::CounterClockwise) = self.winding_order() {
            self.0.reverse();
        }
    }

    fn make_ccw_winding(&mut self) {
        if let Some(WindingOrder::Clockwise) = self.winding_order() {
            self.0.reverse();
        }
    }
}
