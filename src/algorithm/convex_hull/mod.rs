use crate::algorithm::coordinate_position::is_coord_in_ring;
use crate::algorithm::coords_iter::CoordsIter;
use crate::utils::lex_cmp;
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};

pub mod graham;
use graham::graham_hull;

/// Returns the convex hull of a geometry: the smallest convex set containing
/// all its coordinates.
///
/// The hull is emitted as the simplest geometry that can represent it: a
/// `Polygon` wound counter-clockwise in the general case, a `LineString`
/// when every input point is collinear, and a `Point` when the input has a
/// single distinct coordinate.
///
/// # Examples
///
/// ```
/// use geo_planar::{line_string, polygon, Geometry};
/// use geo_planar::convex_hull::ConvexHull;
///
/// // an L shape
/// let poly = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 4.0, y: 0.0),
///     (x: 4.0, y: 1.0),
///     (x: 1.0, y: 1.0),
///     (x: 1.0, y: 4.0),
///     (x: 0.0, y: 4.0),
/// ];
///
/// let hull = match poly.convex_hull() {
///     Geometry::Polygon(hull) => hull,
///     _ => unreachable!("non-degenerate input produces a polygon"),
/// };
/// // five hull vertices, plus the closing coordinate
/// assert_eq!(hull.exterior().0.len(), 6);
/// ```
pub trait ConvexHull {
    fn convex_hull(&self) -> Geometry<f64>;
}

/// Inputs larger than this are first reduced to the points outside an
/// octilateral spanned by eight extremal points.
const REDUCTION_THRESHOLD: usize = 50;

/// Compute the convex hull of a set of coordinates.
pub fn convex_hull_of_coords(coords: &[Coord<f64>]) -> Geometry<f64> {
    // deduplicate
    let mut unique: Vec<Coord<f64>> = coords.to_vec();
    unique.sort_unstable_by(lex_cmp);
    unique.dedup();

    match unique.len() {
        0 => Geometry::GeometryCollection(GeometryCollection(vec![])),
        1 => Geometry::Point(Point(unique[0])),
        2 => Geometry::LineString(LineString::new(unique)),
        _ => {
            if unique.len() > REDUCTION_THRESHOLD {
                unique = reduce(unique);
            }
            let hull = graham_hull(&mut unique);
            if hull.len() < 3 {
                // every input point was collinear
                let first = *hull.first().expect("hull of non-empty input");
                let last = *hull.last().unwrap();
                if first == last {
                    Geometry::Point(Point(first))
                } else {
                    Geometry::LineString(LineString::new(vec![first, last]))
                }
            } else {
                let mut shell = hull;
                shell.push(shell[0]);
                Geometry::Polygon(Polygon::new(LineString::new(shell), vec![]))
            }
        }
    }
}

/// Reduce the candidate set by discarding every point strictly inside the
/// octilateral spanned by the eight extremal points in the cardinal and
/// intercardinal directions. The extremal points themselves are always
/// retained, so the hull is unaffected.
fn reduce(pts: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    let oct_ring = match compute_oct_ring(&pts) {
        Some(ring) => ring,
        // degenerate octilateral: reduction not possible
        None => return pts,
    };

    let mut reduced: Vec<Coord<f64>> = oct_ring[..oct_ring.len() - 1].to_vec();
    for pt in &pts {
        if !is_coord_in_ring(*pt, &oct_ring) {
            reduced.push(*pt);
        }
    }
    reduced.sort_unstable_by(lex_cmp);
    reduced.dedup();
    reduced
}

fn compute_oct_ring(pts: &[Coord<f64>]) -> Option<Vec<Coord<f64>>> {
    let mut oct = [pts[0]; 8];
    for pt in pts.iter().copied() {
        if pt.x < oct[0].x {
            oct[0] = pt;
        }
        if pt.x - pt.y < oct[1].x - oct[1].y {
            oct[1] = pt;
        }
        if pt.y > oct[2].y {
            oct[2] = pt;
        }
        if pt.x + pt.y > oct[3].x + oct[3].y {
            oct[3] = pt;
        }
        if pt.x > oct[4].x {
            oct[4] = pt;
        }
        if pt.x - pt.y > oct[5].x - oct[5].y {
            oct[5] = pt;
        }
        if pt.y < oct[6].y {
            oct[6] = pt;
        }
        if pt.x + pt.y < oct[7].x + oct[7].y {
            oct[7] = pt;
        }
    }

    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(9);
    for pt in oct {
        if ring.last() != Some(&pt) {
            ring.push(pt);
        }
    }
    if ring.last() == Some(&ring[0]) {
        ring.pop();
    }
    if ring.len() < 3 {
        return None;
    }
    ring.push(ring[0]);
    Some(ring)
}

impl ConvexHull for MultiPoint<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        let coords: Vec<_> = self.coords_iter().collect();
        convex_hull_of_coords(&coords)
    }
}

impl ConvexHull for LineString<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        convex_hull_of_coords(&self.0)
    }
}

impl ConvexHull for MultiLineString<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        let coords: Vec<_> = self.coords_iter().collect();
        convex_hull_of_coords(&coords)
    }
}

impl ConvexHull for Polygon<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        // interior rings cannot contribute hull vertices
        convex_hull_of_coords(&self.exterior().0)
    }
}

impl ConvexHull for MultiPolygon<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        let coords: Vec<_> = self
            .0
            .iter()
            .flat_map(|polygon| polygon.exterior().0.iter().copied())
            .collect();
        convex_hull_of_coords(&coords)
    }
}

impl ConvexHull for GeometryCollection<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        let coords: Vec<_> = self.coords_iter().collect();
        convex_hull_of_coords(&coords)
    }
}

impl ConvexHull for Geometry<f64> {
    fn convex_hull(&self) -> Geometry<f64> {
        let coords: Vec<_> = self.coords_iter().collect();
        convex_hull_of_coords(&coords)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::kernels::{orient2d, Orientation};
    use geo_types::coord;

    pub(super) fn is_ccw_convex(ring: &[Coord<f64>]) -> bool {
        let n = ring.len() - 1;
        if n < 3 {
            return false;
        }
        (0..n).all(|i| {
            orient2d(ring[i], ring[(i + 1) % n], ring[(i + 2) % n])
                == Orientation::CounterClockwise
        })
    }

    fn hull_polygon(coords: &[(f64, f64)]) -> Polygon<f64> {
        let coords: Vec<_> = coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        match convex_hull_of_coords(&coords) {
            Geometry::Polygon(p) => p,
            other => panic!("expected polygon hull, got {:?}", other),
        }
    }

    #[test]
    fn l_shape_hull() {
        let hull = hull_polygon(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        assert!(is_ccw_convex(&hull.exterior().0));
        assert_eq!(hull.exterior().0.len(), 6);
    }

    #[test]
    fn collinear_input_yields_line() {
        let coords: Vec<_> = (0..8).map(|i| coord! { x: i as f64, y: i as f64 }).collect();
        match convex_hull_of_coords(&coords) {
            Geometry::LineString(line) => {
                assert_eq!(line.0.first(), Some(&coord! { x: 0.0, y: 0.0 }));
                assert_eq!(line.0.last(), Some(&coord! { x: 7.0, y: 7.0 }));
            }
            other => panic!("expected line string, got {:?}", other),
        }
    }

    #[test]
    fn single_point_input_yields_point() {
        let coords = vec![coord! { x: 3.0, y: 4.0 }; 5];
        assert!(matches!(
            convex_hull_of_coords(&coords),
            Geometry::Point(p) if p.0 == coords[0]
        ));
    }

    #[test]
    fn hull_contains_every_input_point() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let coords: Vec<_> = (0..300)
            .map(|_| coord! { x: rng.gen_range(-50.0..50.0), y: rng.gen_range(-50.0..50.0) })
            .collect();
        let hull = match convex_hull_of_coords(&coords) {
            Geometry::Polygon(p) => p,
            other => panic!("expected polygon hull, got {:?}", other),
        };
        let ring = &hull.exterior().0;
        assert!(is_ccw_convex(ring));
        // every hull vertex is an input coordinate
        for vertex in &ring[..ring.len() - 1] {
            assert!(coords.contains(vertex));
        }
        // every input point is inside or on the hull
        for pt in &coords {
            let inside = is_coord_in_ring(*pt, ring);
            let on_edge = LineString::new(ring.clone())
                .lines()
                .any(|line| crate::algorithm::coordinate_position::coord_on_segment(*pt, line));
            assert!(inside || on_edge, "point {:?} escaped the hull", pt);
        }
    }

    #[test]
    fn reduction_keeps_extremal_points() {
        // a dense grid forces the octagonal reduction path
        let mut coords = vec![];
        for x in 0..10 {
            for y in 0..10 {
                coords.push(coord! { x: x as f64, y: y as f64 });
            }
        }
        let hull = match convex_hull_of_coords(&coords) {
            Geometry::Polygon(p) => p,
            other => panic!("expected polygon hull, got {:?}", other),
        };
        let ring = &hull.exterior().0;
        assert_eq!(ring.len(), 5);
        for corner in [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 9.0, y: 0.0 },
            coord! { x: 9.0, y: 9.0 },
            coord! { x: 0.0, y: 9.0 },
        ] {
            assert!(ring.contains(&corner));
        }
    }
}
