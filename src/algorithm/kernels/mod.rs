use geo_types::Coord;

mod robust_determinant;
pub use robust_determinant::sign_of_det2x2;

/// The orientation of a turn through three 2-dimensional points.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    /// The orientation seen when the three points are visited in the
    /// opposite order.
    pub fn reversed(self) -> Orientation {
        match self {
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
        }
    }

    /// `+1` for counter-clockwise, `-1` for clockwise, `0` for collinear.
    pub fn index(self) -> i32 {
        match self {
            Orientation::CounterClockwise => 1,
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
        }
    }

    pub fn from_index(index: i32) -> Orientation {
        match index.signum() {
            1 => Orientation::CounterClockwise,
            -1 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }
}

/// Gives the orientation of the turn `p` → `q` → `r`.
///
/// The result is exact for all finite inputs: the decision reduces to the
/// sign of the determinant
///
/// ```text
/// | q.x - p.x    q.y - p.y |
/// | r.x - q.x    r.y - q.y |
/// ```
///
/// which [`sign_of_det2x2`] evaluates without rounding error affecting the
/// sign. Every orientation decision in this crate goes through this
/// function.
pub fn orient2d(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Orientation {
    let sign = sign_of_det2x2(q.x - p.x, q.y - p.y, r.x - q.x, r.y - q.y);
    Orientation::from_index(sign)
}
