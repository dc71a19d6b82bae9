use geo_types::{
    Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Rect, Triangle,
};

pub(crate) fn twice_signed_ring_area(ring: &LineString<f64>) -> f64 {
    if ring.0.len() < 3 {
        return 0.0;
    }
    // shoelace formula, accumulated per segment
    let mut tmp = 0.0;
    for line in ring.lines() {
        tmp += line.start.x * line.end.y - line.end.x * line.start.y;
    }
    tmp
}

/// Signed and unsigned planar area of a geometry.
///
/// A counter-clockwise ring has positive signed area, a clockwise ring
/// negative. Interior rings of a valid polygon wind opposite to the shell
/// and therefore subtract from it.
///
/// # Examples
///
/// ```
/// use geo_planar::polygon;
/// use geo_planar::Area;
///
/// let square = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 4.0, y: 0.0),
///     (x: 4.0, y: 4.0),
///     (x: 0.0, y: 4.0),
/// ];
/// assert_eq!(square.signed_area(), 16.0);
/// ```
pub trait Area {
    fn signed_area(&self) -> f64;

    fn unsigned_area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl Area for Point<f64> {
    fn signed_area(&self) -> f64 {
        0.0
    }
}

impl Area for MultiPoint<f64> {
    fn signed_area(&self) -> f64 {
        0.0
    }
}

impl Area for Line<f64> {
    fn signed_area(&self) -> f64 {
        0.0
    }
}

impl Area for LineString<f64> {
    /// The signed area a `LineString` would enclose if treated as a ring.
    fn signed_area(&self) -> f64 {
        twice_signed_ring_area(self) / 2.0
    }
}

impl Area for MultiLineString<f64> {
    fn signed_area(&self) -> f64 {
        0.0
    }
}

impl Area for Polygon<f64> {
    fn signed_area(&self) -> f64 {
        let mut total = self.exterior().signed_area();
        for interior in self.interiors() {
            total += interior.signed_area();
        }
        total
    }

    // holes wind opposite to the shell, so the unsigned area must subtract
    // them rather than cancel through the signed sum
    fn unsigned_area(&self) -> f64 {
        let mut total = self.exterior().signed_area().abs();
        for interior in self.interiors() {
            total -= interior.signed_area().abs();
        }
        total.max(0.0)
    }
}

impl Area for MultiPolygon<f64> {
    fn signed_area(&self) -> f64 {
        self.0.iter().map(Area::signed_area).sum()
    }

    fn unsigned_area(&self) -> f64 {
        self.0.iter().map(Area::unsigned_area).sum()
    }
}

impl Area for Rect<f64> {
    fn signed_area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl Area for Triangle<f64> {
    fn signed_area(&self) -> f64 {
        let [a, b, c] = self.to_array();
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
    }
}

impl Area for GeometryCollection<f64> {
    fn signed_area(&self) -> f64 {
        self.0.iter().map(Area::signed_area).sum()
    }

    fn unsigned_area(&self) -> f64 {
        self.0.iter().map(Area::unsigned_area).sum()
    }
}

impl Area for Geometry<f64> {
    fn signed_area(&self) -> f64 {
        match self {
            Geometry::Point(g) => g.signed_area(),
            Geometry::Line(g) => g.signed_area(),
            Geometry::LineString(g) => g.signed_area(),
            Geometry::Polygon(g) => g.signed_area(),
            Geometry::MultiPoint(g) => g.signed_area(),
            Geometry::MultiLineString(g) => g.signed_area(),
            Geometry::MultiPolygon(g) => g.signed_area(),
            Geometry::Rect(g) => g.signed_area(),
            Geometry::Triangle(g) => g.signed_area(),
            Geometry::GeometryCollection(g) => g.signed_area(),
        }
    }

    fn unsigned_area(&self) -> f64 {
        match self {
            Geometry::Point(g) => g.unsigned_area(),
            Geometry::Line(g) => g.unsigned_area(),
            Geometry::LineString(g) => g.unsigned_area(),
            Geometry::Polygon(g) => g.unsigned_area(),
            Geometry::MultiPoint(g) => g.unsigned_area(),
            Geometry::MultiLineString(g) => g.unsigned_area(),
            Geometry::MultiPolygon(g) => g.unsigned_area(),
            Geometry::Rect(g) => g.unsigned_area(),
            Geometry::Triangle(g) => g.unsigned_area(),
            Geometry::GeometryCollection(g) => g.unsigned_area(),
        }
    }
}
