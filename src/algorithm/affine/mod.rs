use crate::algorithm::map_coords::MapCoords;
use crate::Error;
use geo_types::Coord;

mod matrix;
pub use matrix::{GeneralMatrix, LuDecomposition};

/// A 2D affine transformation: a linear map plus a translation, stored as
/// the six active coefficients of a 3×3 homogeneous matrix whose last row is
/// implicitly `[0 0 1]`:
///
/// ```text
/// | a   b   xoff |   | x |
/// | d   e   yoff | · | y |
/// | 0   0   1    |   | 1 |
/// ```
///
/// Transforms compose: [`AffineTransform::compose`] appends a transform
/// (applied after `self`) and [`AffineTransform::compose_before`] prepends
/// one. The convenience builders (`translated`, `rotated`, …) append.
///
/// Angles are in radians, measured counter-clockwise.
///
/// # Examples
///
/// ```
/// use geo_planar::{coord, AffineTransform};
///
/// let transform = AffineTransform::rotate(std::f64::consts::FRAC_PI_2)
///     .translated(10.0, 0.0);
/// let out = transform.transform(coord! { x: 1.0, y: 0.0 });
/// assert!((out.x - 10.0).abs() < 1e-12);
/// assert!((out.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    a: f64,
    b: f64,
    xoff: f64,
    d: f64,
    e: f64,
    yoff: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// Construct a transform from its six coefficients, row-major.
    pub fn new(a: f64, b: f64, xoff: f64, d: f64, e: f64, yoff: f64) -> Self {
        AffineTransform {
            a,
            b,
            xoff,
            d,
            e,
            yoff,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// The six coefficients `(a, b, xoff, d, e, yoff)`.
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.a, self.b, self.xoff, self.d, self.e, self.yoff)
    }

    /// The determinant of the linear part, `a·e − b·d`. The transform is
    /// invertible iff this is non-zero.
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Apply the transform to a single coordinate.
    pub fn transform(&self, coord: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.a * coord.x + self.b * coord.y + self.xoff,
            y: self.d * coord.x + self.e * coord.y + self.yoff,
        }
    }

    /// Apply only the linear part of the transform, ignoring translation.
    /// This is the correct mapping for direction vectors.
    pub fn transform_vector(&self, vector: Coord<f64>) -> Coord<f64> {
        Coord {
            x: self.a * vector.x + self.b * vector.y,
            y: self.d * vector.x + self.e * vector.y,
        }
    }

    /// Apply the transform to every coordinate of a geometry.
    pub fn apply<G: MapCoords>(&self, geometry: &G) -> G {
        let transform = *self;
        geometry.map_coords(move |coord| transform.transform(coord))
    }

    /// The composition applying `self` first, then `other`.
    pub fn compose(&self, other: &Self) -> Self {
        // matrix product other · self
        Self::new(
            other.a * self.a + other.b * self.d,
            other.a * self.b + other.b * self.e,
            other.a * self.xoff + other.b * self.yoff + other.xoff,
            other.d * self.a + other.e * self.d,
            other.d * self.b + other.e * self.e,
            other.d * self.xoff + other.e * self.yoff + other.yoff,
        )
    }

    /// The composition applying `other` first, then `self`.
    pub fn compose_before(&self, other: &Self) -> Self {
        other.compose(self)
    }

    /// The inverse transform.
    ///
    /// Errors with [`Error::SingularMatrix`] iff the determinant is zero,
    /// i.e. iff the transform collapses the plane onto a line or a point.
    pub fn inverse(&self) -> Result<Self, Error> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(Error::SingularMatrix);
        }
        Ok(Self::new(
            self.e / det,
            -self.b / det,
            (self.b * self.yoff - self.e * self.xoff) / det,
            -self.d / det,
            self.a / det,
            (self.d * self.xoff - self.a * self.yoff) / det,
        ))
    }

    // primitive constructors

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Scaling about an arbitrary origin.
    pub fn scale_at(sx: f64, sy: f64, origin: Coord<f64>) -> Self {
        Self::new(
            sx,
            0.0,
            origin.x - origin.x * sx,
            0.0,
            sy,
            origin.y - origin.y * sy,
        )
    }

    /// Counter-clockwise rotation by `theta` radians about the origin.
    pub fn rotate(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0)
    }

    /// Counter-clockwise rotation by `theta` radians about `centre`.
    pub fn rotate_at(theta: f64, centre: Coord<f64>) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(
            cos,
            -sin,
            centre.x - centre.x * cos + centre.y * sin,
            sin,
            cos,
            centre.y - centre.x * sin - centre.y * cos,
        )
    }

    /// Shear parallel to the axes: `x' = x + shx·y`, `y' = shy·x + y`.
    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::new(1.0, shx, 0.0, shy, 1.0, 0.0)
    }

    /// Horizontal skew by the angle `theta`.
    pub fn skew_x(theta: f64) -> Self {
        Self::shear(theta.tan(), 0.0)
    }

    /// Vertical skew by the angle `theta`.
    pub fn skew_y(theta: f64) -> Self {
        Self::shear(0.0, theta.tan())
    }

    // appending builders

    pub fn translated(&self, tx: f64, ty: f64) -> Self {
        self.compose(&Self::translate(tx, ty))
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        self.compose(&Self::scale(sx, sy))
    }

    pub fn scaled_at(&self, sx: f64, sy: f64, origin: Coord<f64>) -> Self {
        self.compose(&Self::scale_at(sx, sy, origin))
    }

    pub fn rotated(&self, theta: f64) -> Self {
        self.compose(&Self::rotate(theta))
    }

    pub fn rotated_at(&self, theta: f64, centre: Coord<f64>) -> Self {
        self.compose(&Self::rotate_at(theta, centre))
    }

    pub fn sheared(&self, shx: f64, shy: f64) -> Self {
        self.compose(&Self::shear(shx, shy))
    }

    pub fn skewed_x(&self, theta: f64) -> Self {
        self.compose(&Self::skew_x(theta))
    }

    pub fn skewed_y(&self, theta: f64) -> Self {
        self.compose(&Self::skew_y(theta))
    }

    /// Construct the transform mapping each source control point to the
    /// corresponding destination point.
    ///
    /// - Three pairs determine a general affine transform, found by solving
    ///   the associated 6×6 linear system; degenerate configurations (e.g.
    ///   collinear control points) surface [`Error::SingularMatrix`].
    /// - Two pairs determine a similarity-style transform: a third pair is
    ///   synthesised by rotating the first control point 90° about the
    ///   second, on both the source and destination sides.
    /// - One pair determines a translation: two more pairs are synthesised
    ///   by shifting the pair 10 units along each axis.
    pub fn from_control_points(src: &[Coord<f64>], dst: &[Coord<f64>]) -> Result<Self, Error> {
        if src.len() != dst.len() {
            return Err(Error::InvalidArgument(
                "control point slices must have equal lengths",
            ));
        }
        match src.len() {
            1 => {
                let shift_x = Coord { x: 10.0, y: 0.0 };
                let shift_y = Coord { x: 0.0, y: 10.0 };
                Self::solve_three_points(
                    [src[0], src[0] + shift_x, src[0] + shift_y],
                    [dst[0], dst[0] + shift_x, dst[0] + shift_y],
                )
            }
            2 => {
                let src2 = rotate_90_about(src[0], src[1]);
                let dst2 = rotate_90_about(dst[0], dst[1]);
                Self::solve_three_points([src[0], src[1], src2], [dst[0], dst[1], dst2])
            }
            3 => Self::solve_three_points([src[0], src[1], src[2]], [dst[0], dst[1], dst[2]]),
            _ => Err(Error::InvalidArgument(
                "control point constructors take 1, 2, or 3 pairs",
            )),
        }
    }

    fn solve_three_points(src: [Coord<f64>; 3], dst: [Coord<f64>; 3]) -> Result<Self, Error> {
        // each pair contributes the two rows
        //   [px py 1 0 0 0] · x = qx
        //   [0 0 0 px py 1] · x = qy
        // with the unknown vector x = [a b xoff d e yoff]
        let mut a = GeneralMatrix::new(6, 6);
        let mut b = GeneralMatrix::new(6, 1);
        for (i, (p, q)) in src.iter().zip(dst.iter()).enumerate() {
            a.set(2 * i, 0, p.x);
            a.set(2 * i, 1, p.y);
            a.set(2 * i, 2, 1.0);
            a.set(2 * i + 1, 3, p.x);
            a.set(2 * i + 1, 4, p.y);
            a.set(2 * i + 1, 5, 1.0);
            b.set(2 * i, 0, q.x);
            b.set(2 * i + 1, 0, q.y);
        }
        let x = a.solve(&b)?;
        Ok(Self::new(
            x.get(0, 0),
            x.get(1, 0),
            x.get(2, 0),
            x.get(3, 0),
            x.get(4, 0),
            x.get(5, 0),
        ))
    }
}

/// `p` rotated 90° counter-clockwise about `c`.
fn rotate_90_about(p: Coord<f64>, c: Coord<f64>) -> Coord<f64> {
    Coord {
        x: c.x - (p.y - c.y),
        y: c.y + (p.x - c.x),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::{coord, polygon};

    #[test]
    fn three_point_translation() {
        let src = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        ];
        let dst = [
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 1.0 },
            coord! { x: 1.0, y: 2.0 },
        ];
        let t = AffineTransform::from_control_points(&src, &dst).unwrap();
        let (a, b, xoff, d, e, yoff) = t.coefficients();
        assert_relative_eq!(a, 1.0);
        assert_relative_eq!(b, 0.0);
        assert_relative_eq!(xoff, 1.0);
        assert_relative_eq!(d, 0.0);
        assert_relative_eq!(e, 1.0);
        assert_relative_eq!(yoff, 1.0);
    }

    #[test]
    fn collinear_control_points_are_singular() {
        let src = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 2.0 },
        ];
        let dst = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 },
        ];
        assert_eq!(
            AffineTransform::from_control_points(&src, &dst),
            Err(Error::SingularMatrix)
        );
    }

    #[test]
    fn one_point_constructor_is_translation() {
        let t = AffineTransform::from_control_points(
            &[coord! { x: 3.0, y: -2.0 }],
            &[coord! { x: 5.0, y: 4.0 }],
        )
        .unwrap();
        let moved = t.transform(coord! { x: 100.0, y: 100.0 });
        assert_relative_eq!(moved.x, 102.0);
        assert_relative_eq!(moved.y, 106.0);
    }

    #[test]
    fn two_point_constructor_preserves_both_pairs() {
        let src = [coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 }];
        let dst = [coord! { x: 1.0, y: 1.0 }, coord! { x: 1.0, y: 3.0 }];
        let t = AffineTransform::from_control_points(&src, &dst).unwrap();
        for (p, q) in src.iter().zip(dst.iter()) {
            let mapped = t.transform(*p);
            assert_relative_eq!(mapped.x, q.x, epsilon = 1e-12);
            assert_relative_eq!(mapped.y, q.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_round_trip() {
        let t = AffineTransform::rotate(0.73)
            .translated(12.0, -7.0)
            .scaled(2.0, 3.0)
            .sheared(0.5, 0.0);
        let inv = t.inverse().unwrap();
        for coord in [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 13.7, y: -42.0 },
            coord! { x: 1e6, y: 1e-6 },
        ] {
            let round_tripped = inv.transform(t.transform(coord));
            assert_relative_eq!(round_tripped.x, coord.x, epsilon = 1e-6);
            assert_relative_eq!(round_tripped.y, coord.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn invert_singular_errors() {
        // collapses the plane onto a line, so no inverse exists
        let collapse = AffineTransform::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0);
        assert_eq!(collapse.determinant(), 0.0);
        assert_eq!(collapse.inverse(), Err(Error::SingularMatrix));

        // while a proper transform inverts fine
        assert!(AffineTransform::rotate(1.0).inverse().is_ok());
    }

    #[test]
    fn composition_matches_sequential_application() {
        let t1 = AffineTransform::rotate(0.3);
        let t2 = AffineTransform::translate(5.0, 7.0);
        let composed = t1.compose(&t2);
        let coord = coord! { x: 2.0, y: -3.0 };
        let sequential = t2.transform(t1.transform(coord));
        let at_once = composed.transform(coord);
        assert_relative_eq!(sequential.x, at_once.x);
        assert_relative_eq!(sequential.y, at_once.y);

        let prepended = t2.compose_before(&t1);
        assert_eq!(composed, prepended);
    }

    #[test]
    fn rotate_at_fixes_centre() {
        let centre = coord! { x: 3.0, y: 4.0 };
        let t = AffineTransform::rotate_at(1.234, centre);
        let moved = t.transform(centre);
        assert_relative_eq!(moved.x, centre.x, epsilon = 1e-12);
        assert_relative_eq!(moved.y, centre.y, epsilon = 1e-12);
    }

    #[test]
    fn apply_transforms_whole_geometries() {
        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        let shifted = AffineTransform::translate(10.0, 20.0).apply(&square);
        assert_eq!(shifted.exterior().0[0], coord! { x: 10.0, y: 20.0 });
        assert_eq!(shifted.exterior().0[2], coord! { x: 11.0, y: 21.0 });
    }

    #[test]
    fn transform_vector_ignores_translation() {
        let t = AffineTransform::translate(100.0, 100.0).scaled(2.0, 2.0);
        let v = t.transform_vector(coord! { x: 1.0, y: 1.0 });
        assert_relative_eq!(v.x, 2.0);
        assert_relative_eq!(v.y, 2.0);
    }
}
