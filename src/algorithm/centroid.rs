use crate::algorithm::euclidean_length::EuclideanLength;
use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// Calculation of the centroid.
///
/// The centroid is the arithmetic mean position of all points in the
/// geometry, weighted by the geometry's highest dimension: areal geometries
/// are weighted by area, linear geometries by length, puntal geometries by
/// count. Mixed collections are dominated by their highest-dimensional
/// members, so a polygon's centroid is unaffected by stray points.
///
/// # Examples
///
/// ```
/// use geo_planar::{line_string, point};
/// use geo_planar::centroid::Centroid;
///
/// let line_string = line_string![
///     (x: 0.0, y: 0.0),
///     (x: 4.0, y: 2.0),
/// ];
/// assert_eq!(line_string.centroid().unwrap(), point!(x: 2.0, y: 1.0));
/// ```
pub trait Centroid {
    type Output;

    fn centroid(&self) -> Self::Output;
}

/// Accumulates centroid contributions from point, line, and area components.
///
/// The three accumulators are kept separate; `finish` picks the highest
/// dimension that received any weight. Area sums are taken about a base
/// point to keep the shoelace products small.
#[derive(Debug, Default, Clone)]
pub(crate) struct CentroidAccumulator {
    base: Option<Coord<f64>>,

    // twice the signed area, and shoelace-weighted coordinate sums
    area_2: f64,
    area_sx: f64,
    area_sy: f64,

    line_length: f64,
    line_sx: f64,
    line_sy: f64,

    pt_count: usize,
    pt_sx: f64,
    pt_sy: f64,
}

impl CentroidAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_coord(&mut self, coord: Coord<f64>) {
        self.pt_count += 1;
        self.pt_sx += coord.x;
        self.pt_sy += coord.y;
    }

    pub fn add_line(&mut self, line: &Line<f64>) {
        let length = line.euclidean_length();
        self.line_length += length;
        self.line_sx += length * (line.start.x + line.end.x) / 2.0;
        self.line_sy += length * (line.start.y + line.end.y) / 2.0;
    }

    pub fn add_line_string(&mut self, line_string: &LineString<f64>) {
        if line_string.0.len() == 1 {
            self.add_coord(line_string.0[0]);
            return;
        }
        for line in line_string.lines() {
            self.add_line(&line);
        }
    }

    /// Add a ring's areal contribution. `positive` selects whether the ring
    /// adds (shell) or removes (hole) area, regardless of its winding.
    pub fn add_ring(&mut self, ring: &LineString<f64>, positive: bool) {
        if ring.0.len() < 4 {
            self.add_line_string(ring);
            return;
        }
        let base = *self.base.get_or_insert(ring.0[0]);

        let mut a2 = 0.0;
        let mut sx = 0.0;
        let mut sy = 0.0;
        for line in ring.lines() {
            let x0 = line.start.x - base.x;
            let y0 = line.start.y - base.y;
            let x1 = line.end.x - base.x;
            let y1 = line.end.y - base.y;
            let cross = x0 * y1 - x1 * y0;
            a2 += cross;
            sx += cross * (x0 + x1);
            sy += cross * (y0 + y1);
        }

        // normalize the winding so that `positive` decides the sign
        let flip = if (a2 < 0.0) == positive { -1.0 } else { 1.0 };
        self.area_2 += flip * a2;
        self.area_sx += flip * sx;
        self.area_sy += flip * sy;

        // a degenerate ring still contributes as a line
        if a2 == 0.0 {
            self.add_line_string(ring);
        }
    }

    pub fn add_polygon(&mut self, polygon: &Polygon<f64>) {
        self.add_ring(polygon.exterior(), true);
        for hole in polygon.interiors() {
            self.add_ring(hole, false);
        }
    }

    pub fn add_geometry(&mut self, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(g) => self.add_coord(g.0),
            Geometry::Line(g) => self.add_line(g),
            Geometry::LineString(g) => self.add_line_string(g),
            Geometry::Polygon(g) => self.add_polygon(g),
            Geometry::MultiPoint(g) => {
                for point in &g.0 {
                    self.add_coord(point.0);
                }
            }
            Geometry::MultiLineString(g) => {
                for line_string in &g.0 {
                    self.add_line_string(line_string);
                }
            }
            Geometry::MultiPolygon(g) => {
                for polygon in &g.0 {
                    self.add_polygon(polygon);
                }
            }
            Geometry::Rect(g) => self.add_polygon(&g.to_polygon()),
            Geometry::Triangle(g) => self.add_polygon(&g.to_polygon()),
            Geometry::GeometryCollection(g) => {
                for geometry in &g.0 {
                    self.add_geometry(geometry);
                }
            }
        }
    }

    pub fn finish(&self) -> Option<Point<f64>> {
        if self.area_2 != 0.0 {
            let base = self.base.unwrap_or(Coord { x: 0.0, y: 0.0 });
            return Some(Point::new(
                base.x + self.area_sx / (3.0 * self.area_2),
                base.y + self.area_sy / (3.0 * self.area_2),
            ));
        }
        if self.line_length > 0.0 {
            return Some(Point::new(
                self.line_sx / self.line_length,
                self.line_sy / self.line_length,
            ));
        }
        if self.pt_count > 0 {
            return Some(Point::new(
                self.pt_sx / self.pt_count as f64,
                self.pt_sy / self.pt_count as f64,
            ));
        }
        None
    }
}

impl Centroid for Point<f64> {
    type Output = Point<f64>;

    fn centroid(&self) -> Self::Output {
        *self
    }
}

impl Centroid for Line<f64> {
    type Output = Point<f64>;

    fn centroid(&self) -> Self::Output {
        Point::new(
            self.start.x + self.dx() / 2.0,
            self.start.y + self.dy() / 2.0,
        )
    }
}

impl Centroid for LineString<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        if self.0.is_empty() {
            return None;
        }
        let mut acc = CentroidAccumulator::new();
        acc.add_line_string(self);
        acc.finish()
    }
}

impl Centroid for MultiLineString<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        let mut acc = CentroidAccumulator::new();
        for line_string in &self.0 {
            acc.add_line_string(line_string);
        }
        acc.finish()
    }
}

impl Centroid for Polygon<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        if self.exterior().0.is_empty() {
            return None;
        }
        let mut acc = CentroidAccumulator::new();
        acc.add_polygon(self);
        acc.finish()
    }
}

impl Centroid for MultiPolygon<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        let mut acc = CentroidAccumulator::new();
        for polygon in &self.0 {
            acc.add_polygon(polygon);
        }
        acc.finish()
    }
}

impl Centroid for MultiPoint<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        let mut acc = CentroidAccumulator::new();
        for point in &self.0 {
            acc.add_coord(point.0);
        }
        acc.finish()
    }
}

impl Centroid for Rect<f64> {
    type Output = Point<f64>;

    fn centroid(&self) -> Self::Output {
        Point(self.center())
    }
}

impl Centroid for Triangle<f64> {
    type Output = Point<f64>;

    fn centroid(&self) -> Self::Output {
        let [a, b, c] = self.to_array();
        Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }
}

impl Centroid for GeometryCollection<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        let mut acc = CentroidAccumulator::new();
        for geometry in &self.0 {
            acc.add_geometry(geometry);
        }
        acc.finish()
    }
}

impl Centroid for Geometry<f64> {
    type Output = Option<Point<f64>>;

    fn centroid(&self) -> Self::Output {
        let mut acc = CentroidAccumulator::new();
        acc.add_geometry(self);
        acc.finish()
    }
}
