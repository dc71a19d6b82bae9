use crate::algorithm::bounding_rect::BoundingRect;
use crate::algorithm::kernels::{orient2d, sign_of_det2x2, Orientation};
use crate::utils::{line_bounding_rect, rect_intersects_coord};
use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// The position of a `Coord` relative to a `Geometry`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPos {
    OnBoundary,
    Inside,
    Outside,
}

/// Determine whether a `Coord` lies inside, outside, or on the boundary of
/// a geometry.
///
/// # Examples
///
/// ```rust
/// use geo_planar::{polygon, coord};
/// use geo_planar::coordinate_position::{CoordinatePosition, CoordPos};
///
/// let square_poly = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)];
///
/// assert_eq!(square_poly.coordinate_position(&coord! { x: 1.0, y: 1.0 }), CoordPos::Inside);
/// assert_eq!(square_poly.coordinate_position(&coord! { x: 0.0, y: 1.0 }), CoordPos::OnBoundary);
/// assert_eq!(square_poly.coordinate_position(&coord! { x: 5.0, y: 5.0 }), CoordPos::Outside);
/// ```
pub trait CoordinatePosition {
    fn coordinate_position(&self, coord: &Coord<f64>) -> CoordPos {
        let mut is_inside = false;
        let mut boundary_count = 0;

        self.calculate_coordinate_position(coord, &mut is_inside, &mut boundary_count);

        // “The boundary of an arbitrary collection of geometries whose
        // interiors are disjoint consists of geometries drawn from the
        // boundaries of the element geometries by application of the
        // ‘mod 2’ union rule”
        //
        // ― OpenGIS Simple Feature Access § 6.1.15.1
        if boundary_count % 2 == 1 {
            CoordPos::OnBoundary
        } else if is_inside {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }

    // impls of this trait must:
    //  1. set `is_inside = true` if `coord` is contained within the interior
    //     of any component.
    //  2. increment `boundary_count` for each component whose boundary
    //     contains `coord`.
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    );
}

/// True iff `coord` lies on the segment `line`, endpoints included.
pub(crate) fn coord_on_segment(coord: Coord<f64>, line: Line<f64>) -> bool {
    rect_intersects_coord(&line_bounding_rect(line), &coord)
        && orient2d(line.start, line.end, coord) == Orientation::Collinear
}

/// True iff `coord` is strictly inside the ring described by `ring_coords`.
///
/// `ring_coords` must be closed (first coordinate equal to the last). A ray
/// is shot from `coord` in the positive x direction; an edge contributes a
/// crossing iff exactly one of its endpoints is strictly above the ray, and
/// the crossing point itself lies strictly right of `coord`. That last
/// comparison is made through the robust determinant of the translated
/// endpoints, so grazing contacts do not double-count.
///
/// Points on the ring itself are not distinguished: they may report either
/// answer. Use [`coord_pos_relative_to_ring`] when boundary cases matter.
pub fn is_coord_in_ring(coord: Coord<f64>, ring_coords: &[Coord<f64>]) -> bool {
    let mut crossings = 0usize;
    for i in 1..ring_coords.len() {
        let p1 = ring_coords[i];
        let p2 = ring_coords[i - 1];
        if (p1.y > coord.y && p2.y <= coord.y) || (p2.y > coord.y && p1.y <= coord.y) {
            let x1 = p1.x - coord.x;
            let y1 = p1.y - coord.y;
            let x2 = p2.x - coord.x;
            let y2 = p2.y - coord.y;
            // the sign of the x-intercept of the translated edge is the
            // sign of det / (y2 - y1)
            let x_int_sign = sign_of_det2x2(x1, y1, x2, y2) as f64 / (y2 - y1);
            if x_int_sign > 0.0 {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}

/// Position of `coord` relative to the closed ring `ring`: on the ring, in
/// its interior, or outside it.
pub fn coord_pos_relative_to_ring(coord: Coord<f64>, ring: &LineString<f64>) -> CoordPos {
    if ring.0.is_empty() {
        return CoordPos::Outside;
    }
    for line in ring.lines() {
        if coord_on_segment(coord, line) {
            return CoordPos::OnBoundary;
        }
    }
    // an open ring still encloses the area of its implicit closing segment
    if !ring.is_closed() {
        let closing = Line::new(*ring.0.last().unwrap(), ring.0[0]);
        if coord_on_segment(coord, closing) {
            return CoordPos::OnBoundary;
        }
        let mut closed = ring.0.clone();
        closed.push(ring.0[0]);
        return if is_coord_in_ring(coord, &closed) {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        };
    }
    if is_coord_in_ring(coord, &ring.0) {
        CoordPos::Inside
    } else {
        CoordPos::Outside
    }
}

impl CoordinatePosition for Coord<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self == coord {
            *is_inside = true;
        }
    }
}

impl CoordinatePosition for Point<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if &self.0 == coord {
            *is_inside = true;
        }
    }
}

impl CoordinatePosition for Line<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        // degenerate line is a point
        if self.start == self.end {
            self.start
                .calculate_coordinate_position(coord, is_inside, boundary_count);
            return;
        }

        if coord == &self.start || coord == &self.end {
            *boundary_count += 1;
        } else if coord_on_segment(*coord, *self) {
            *is_inside = true;
        }
    }
}

impl CoordinatePosition for LineString<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.0.len() < 2 {
            return;
        }

        if self.0.len() == 2 {
            // line string with two coords is just a line
            Line::new(self.0[0], self.0[1]).calculate_coordinate_position(
                coord,
                is_inside,
                boundary_count,
            );
            return;
        }

        // optimization: return early if there's no chance of an intersection
        // since self.0 is non-empty, it's safe to `unwrap`
        if !rect_intersects_coord(&self.bounding_rect().unwrap(), coord) {
            return;
        }

        // a closed linestring has no boundary, per SFS
        if !self.is_closed()
            && (coord == self.0.first().unwrap() || coord == self.0.last().unwrap())
        {
            *boundary_count += 1;
            return;
        }

        if self.lines().any(|line| coord_on_segment(*coord, line)) {
            // the boundary case was excluded above, so the point must lie on
            // the interior
            *is_inside = true;
        }
    }
}

impl CoordinatePosition for Polygon<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.exterior().0.is_empty() {
            return;
        }

        if !rect_intersects_coord(&self.bounding_rect().unwrap(), coord) {
            return;
        }

        // shell-first: the holes only matter for points inside the shell
        match coord_pos_relative_to_ring(*coord, self.exterior()) {
            CoordPos::Outside => {}
            CoordPos::OnBoundary => {
                *boundary_count += 1;
            }
            CoordPos::Inside => {
                for hole in self.interiors() {
                    match coord_pos_relative_to_ring(*coord, hole) {
                        CoordPos::Outside => {}
                        CoordPos::OnBoundary => {
                            *boundary_count += 1;
                            return;
                        }
                        CoordPos::Inside => {
                            // inside a hole means outside the polygon
                            return;
                        }
                    }
                }
                *is_inside = true;
            }
        }
    }
}

impl CoordinatePosition for MultiPoint<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self.0.iter().any(|p| &p.0 == coord) {
            *is_inside = true;
        }
    }
}

impl CoordinatePosition for MultiLineString<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for line_string in &self.0 {
            line_string.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl CoordinatePosition for MultiPolygon<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for polygon in &self.0 {
            polygon.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl CoordinatePosition for Rect<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        let on_min_edge = coord.x == self.min().x || coord.y == self.min().y;
        let on_max_edge = coord.x == self.max().x || coord.y == self.max().y;
        if rect_intersects_coord(self, coord) {
            if on_min_edge || on_max_edge {
                *boundary_count += 1;
            } else {
                *is_inside = true;
            }
        }
    }
}

impl CoordinatePosition for Triangle<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        self.to_polygon()
            .calculate_coordinate_position(coord, is_inside, boundary_count);
    }
}

impl CoordinatePosition for GeometryCollection<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for geometry in &self.0 {
            geometry.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl CoordinatePosition for Geometry<f64> {
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<f64>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        match self {
            Geometry::Point(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::Line(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::LineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::Polygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPoint(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiLineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPolygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::Rect(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::Triangle(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::GeometryCollection(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::{coord, line_string, polygon};

    #[test]
    fn ring_inclusion() {
        let ring = line_string![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 4.0),
            (x: 0.0, y: 4.0),
            (x: 0.0, y: 0.0),
        ];
        assert_eq!(
            coord_pos_relative_to_ring(coord! { x: 2.0, y: 2.0 }, &ring),
            CoordPos::Inside
        );
        assert_eq!(
            coord_pos_relative_to_ring(coord! { x: 4.0, y: 2.0 }, &ring),
            CoordPos::OnBoundary
        );
        assert_eq!(
            coord_pos_relative_to_ring(coord! { x: 5.0, y: 2.0 }, &ring),
            CoordPos::Outside
        );
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // the ray from the query point passes exactly through the vertex at
        // (2, 1); a naive crossing count would see two edges
        let ring = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 2.0, y: 1.0 },
            coord! { x: 4.0, y: 0.0 },
            coord! { x: 2.0, y: 4.0 },
            coord! { x: 0.0, y: 0.0 },
        ];
        assert!(is_coord_in_ring(coord! { x: 1.0, y: 1.0 }, &ring));
        assert!(!is_coord_in_ring(coord! { x: -1.0, y: 1.0 }, &ring));
    }

    #[test]
    fn polygon_with_hole() {
        let poly = polygon![
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 10.0),
            ],
            interiors: [[
                (x: 4.0, y: 4.0),
                (x: 6.0, y: 4.0),
                (x: 6.0, y: 6.0),
                (x: 4.0, y: 6.0),
            ]],
        ];
        assert_eq!(
            poly.coordinate_position(&coord! { x: 1.0, y: 1.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            poly.coordinate_position(&coord! { x: 5.0, y: 5.0 }),
            CoordPos::Outside
        );
        assert_eq!(
            poly.coordinate_position(&coord! { x: 4.0, y: 5.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            poly.coordinate_position(&coord! { x: 0.0, y: 5.0 }),
            CoordPos::OnBoundary
        );
    }

    #[test]
    fn open_line_string_endpoints_are_boundary() {
        let ls = line_string![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 4.0, y: 0.0),
        ];
        assert_eq!(
            ls.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 2.0, y: 0.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 5.0, y: 0.0 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn collection_applies_mod_2_rule() {
        // two touching squares: their shared edge is interior to the union's
        // closure but lies on the boundary of both members, so the mod-2
        // rule cancels it
        let left = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)];
        let right = polygon![(x: 2.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 2.0), (x: 2.0, y: 2.0)];
        let collection = GeometryCollection::<f64>(vec![left.into(), right.into()]);

        assert_eq!(
            collection.coordinate_position(&coord! { x: 2.0, y: 1.0 }),
            CoordPos::Outside
        );
        assert_eq!(
            collection.coordinate_position(&coord! { x: 1.0, y: 1.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            collection.coordinate_position(&coord! { x: 0.0, y: 1.0 }),
            CoordPos::OnBoundary
        );
    }
}
