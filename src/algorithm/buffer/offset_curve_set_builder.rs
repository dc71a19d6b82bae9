use super::graph::{Label, Position};
use super::noding::SegmentString;
use super::offset_curve_builder::OffsetCurveBuilder;
use crate::algorithm::bounding_rect::BoundingRect;
use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::winding_order::is_ccw;
use crate::utils::point_segment_distance;
use geo_types::{Coord, Geometry, Line, LineString, Point, Polygon};

/// Builds the raw offset curves for all the components of a geometry,
/// labelling each curve with the side locations it separates.
///
/// Rings which a negative distance would erode away completely are detected
/// here and contribute no curve at all.
pub(crate) struct OffsetCurveSetBuilder<'a> {
    geometry: &'a Geometry<f64>,
    distance: f64,
    curve_builder: OffsetCurveBuilder,
    curves: Vec<SegmentString>,
}

impl<'a> OffsetCurveSetBuilder<'a> {
    pub fn new(
        geometry: &'a Geometry<f64>,
        distance: f64,
        curve_builder: OffsetCurveBuilder,
    ) -> OffsetCurveSetBuilder<'a> {
        OffsetCurveSetBuilder {
            geometry,
            distance,
            curve_builder,
            curves: vec![],
        }
    }

    /// The labelled raw curves for every component of the input geometry.
    pub fn curves(mut self) -> Vec<SegmentString> {
        self.add_geometry(self.geometry);
        self.curves
    }

    fn add_geometry(&mut self, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(point) => self.add_point(point),
            Geometry::Line(line) => {
                self.add_line_string_coords(vec![line.start, line.end]);
            }
            Geometry::LineString(line_string) => {
                self.add_line_string_coords(line_string.0.clone());
            }
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::MultiPoint(multi) => {
                for point in &multi.0 {
                    self.add_point(point);
                }
            }
            Geometry::MultiLineString(multi) => {
                for line_string in &multi.0 {
                    self.add_line_string_coords(line_string.0.clone());
                }
            }
            Geometry::MultiPolygon(multi) => {
                for polygon in &multi.0 {
                    self.add_polygon(polygon);
                }
            }
            Geometry::Rect(rect) => self.add_polygon(&rect.to_polygon()),
            Geometry::Triangle(triangle) => self.add_polygon(&triangle.to_polygon()),
            Geometry::GeometryCollection(collection) => {
                for geometry in &collection.0 {
                    self.add_geometry(geometry);
                }
            }
        }
    }

    fn add_point(&mut self, point: &Point<f64>) {
        if self.distance <= 0.0 {
            return;
        }
        let curves = self.curve_builder.line_curve(&[point.0], self.distance);
        self.add_curves(curves, CoordPos::Outside, CoordPos::Inside);
    }

    fn add_line_string_coords(&mut self, coords: Vec<Coord<f64>>) {
        if self.distance <= 0.0 {
            return;
        }
        let coords = remove_repeated(coords);
        if coords.len() < 2 {
            // a degenerate line collapses to a point
            if let Some(first) = coords.first() {
                self.add_point(&Point(*first));
            }
            return;
        }
        let curves = self.curve_builder.line_curve(&coords, self.distance);
        self.add_curves(curves, CoordPos::Outside, CoordPos::Inside);
    }

    fn add_polygon(&mut self, polygon: &Polygon<f64>) {
        let mut offset_distance = self.distance;
        let mut offset_side = Position::Left;
        if self.distance < 0.0 {
            offset_distance = -self.distance;
            offset_side = Position::Right;
        }

        let shell = remove_repeated(polygon.exterior().0.clone());
        if shell.len() < 4 {
            return;
        }
        // a negative distance larger than the shell can absorb erodes the
        // polygon completely
        if self.distance < 0.0 && self.is_eroded_completely(&shell, self.distance) {
            return;
        }
        self.add_polygon_ring(
            &shell,
            offset_distance,
            offset_side,
            CoordPos::Outside,
            CoordPos::Inside,
        );

        for hole in polygon.interiors() {
            let hole = remove_repeated(hole.0.clone());
            if hole.len() < 4 {
                continue;
            }
            // holes erode under *positive* distances
            if self.distance > 0.0 && self.is_eroded_completely(&hole, -self.distance) {
                continue;
            }
            // the side and locations mirror the shell's: the interior of the
            // polygon lies outside the hole ring
            self.add_polygon_ring(
                &hole,
                offset_distance,
                offset_side.opposite(),
                CoordPos::Inside,
                CoordPos::Outside,
            );
        }
    }

    /// Add the offset curve of one polygon ring. `cw_left_loc` and
    /// `cw_right_loc` are the side locations for a clockwise-wound ring;
    /// a counter-clockwise ring flips both the locations and the offset
    /// side.
    fn add_polygon_ring(
        &mut self,
        coords: &[Coord<f64>],
        offset_distance: f64,
        side: Position,
        cw_left_loc: CoordPos,
        cw_right_loc: CoordPos,
    ) {
        let mut left_loc = cw_left_loc;
        let mut right_loc = cw_right_loc;
        let mut side = side;
        if is_ccw(coords) {
            left_loc = cw_right_loc;
            right_loc = cw_left_loc;
            side = side.opposite();
        }
        let curves = self.curve_builder.ring_curve(coords, side, offset_distance);
        self.add_curves(curves, left_loc, right_loc);
    }

    fn add_curves(&mut self, curves: Vec<Vec<Coord<f64>>>, left_loc: CoordPos, right_loc: CoordPos) {
        for curve in curves {
            if curve.len() < 2 {
                continue;
            }
            let label = Label::new(0, CoordPos::OnBoundary, left_loc, right_loc);
            self.curves.push(SegmentString::new(curve, label));
        }
    }

    /// Tests whether a ring buffered by `buffer_distance` (negative for
    /// shells, positive mirrored for holes) vanishes entirely.
    ///
    /// The cheap test compares the ring envelope's smaller dimension with
    /// twice the distance; triangles additionally get an exact test against
    /// the in-centre's distance to a side.
    fn is_eroded_completely(&self, ring: &[Coord<f64>], buffer_distance: f64) -> bool {
        let Some(env) = LineString::new(ring.to_vec()).bounding_rect() else {
            return true;
        };
        let env_min_dimension = env.height().min(env.width());
        if buffer_distance < 0.0 && 2.0 * buffer_distance.abs() > env_min_dimension {
            return true;
        }
        // a triangle's erosion threshold is exactly the radius of its
        // inscribed circle
        if ring.len() == 4 {
            return Self::is_triangle_eroded_completely(ring, buffer_distance);
        }
        false
    }

    fn is_triangle_eroded_completely(triangle: &[Coord<f64>], buffer_distance: f64) -> bool {
        let in_centre = triangle_in_centre(triangle[0], triangle[1], triangle[2]);
        let dist_to_side = point_segment_distance(in_centre, Line::new(triangle[0], triangle[1]));
        dist_to_side < buffer_distance.abs()
    }
}

fn remove_repeated(coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    let mut coords = coords;
    coords.dedup();
    coords
}

/// The centre of the circle inscribed in the triangle `(a, b, c)`: the
/// side-length-weighted average of the vertices.
fn triangle_in_centre(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> Coord<f64> {
    let len_a = (b.x - c.x).hypot(b.y - c.y);
    let len_b = (a.x - c.x).hypot(a.y - c.y);
    let len_c = (a.x - b.x).hypot(a.y - b.y);
    let circum = len_a + len_b + len_c;
    Coord {
        x: (len_a * a.x + len_b * b.x + len_c * c.x) / circum,
        y: (len_a * a.y + len_b * b.y + len_c * c.y) / circum,
    }
}
