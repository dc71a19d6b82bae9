use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// Map a function over all the coordinates in a geometry, returning a new
/// geometry.
///
/// This is the crate's coordinate-visitor contract: affine transforms and
/// precision-model snapping are applied through it.
///
/// # Examples
///
/// ```
/// use geo_planar::map_coords::MapCoords;
/// use geo_planar::{point, Coord};
///
/// let p = point!(x: 10., y: 20.);
/// let shifted = p.map_coords(|Coord { x, y }| Coord { x: x + 1000., y });
/// assert_eq!(shifted, point!(x: 1010., y: 20.));
/// ```
pub trait MapCoords {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self;
}

/// Map a function over all the coordinates in a geometry in place.
pub trait MapCoordsInPlace {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy);
}

impl MapCoords for Point<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Point(func(self.0))
    }
}

impl MapCoordsInPlace for Point<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        self.0 = func(self.0);
    }
}

impl MapCoords for Line<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Line::new(func(self.start), func(self.end))
    }
}

impl MapCoordsInPlace for Line<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        self.start = func(self.start);
        self.end = func(self.end);
    }
}

impl MapCoords for LineString<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        LineString::new(self.0.iter().copied().map(func).collect())
    }
}

impl MapCoordsInPlace for LineString<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        for coord in &mut self.0 {
            *coord = func(*coord);
        }
    }
}

impl MapCoords for Polygon<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Polygon::new(
            self.exterior().map_coords(func),
            self.interiors()
                .iter()
                .map(|ring| ring.map_coords(func))
                .collect(),
        )
    }
}

impl MapCoordsInPlace for Polygon<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        self.exterior_mut(|ring| ring.map_coords_in_place(func));
        self.interiors_mut(|rings| {
            for ring in rings {
                ring.map_coords_in_place(func);
            }
        });
    }
}

impl MapCoords for MultiPoint<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        MultiPoint(self.0.iter().map(|p| p.map_coords(func)).collect())
    }
}

impl MapCoordsInPlace for MultiPoint<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        for point in &mut self.0 {
            point.map_coords_in_place(func);
        }
    }
}

impl MapCoords for MultiLineString<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        MultiLineString(self.0.iter().map(|ls| ls.map_coords(func)).collect())
    }
}

impl MapCoordsInPlace for MultiLineString<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        for line_string in &mut self.0 {
            line_string.map_coords_in_place(func);
        }
    }
}

impl MapCoords for MultiPolygon<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        MultiPolygon(self.0.iter().map(|p| p.map_coords(func)).collect())
    }
}

impl MapCoordsInPlace for MultiPolygon<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        for polygon in &mut self.0 {
            polygon.map_coords_in_place(func);
        }
    }
}

impl MapCoords for Rect<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Rect::new(func(self.min()), func(self.max()))
    }
}

impl MapCoordsInPlace for Rect<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        *self = self.map_coords(func);
    }
}

impl MapCoords for Triangle<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Triangle::new(func(self.0), func(self.1), func(self.2))
    }
}

impl MapCoordsInPlace for Triangle<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        *self = self.map_coords(func);
    }
}

impl MapCoords for GeometryCollection<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        GeometryCollection(self.0.iter().map(|g| g.map_coords(func)).collect())
    }
}

impl MapCoordsInPlace for GeometryCollection<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        for geometry in &mut self.0 {
            geometry.map_coords_in_place(func);
        }
    }
}

impl MapCoords for Geometry<f64> {
    fn map_coords(&self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        match self {
            Geometry::Point(g) => Geometry::Point(g.map_coords(func)),
            Geometry::Line(g) => Geometry::Line(g.map_coords(func)),
            Geometry::LineString(g) => Geometry::LineString(g.map_coords(func)),
            Geometry::Polygon(g) => Geometry::Polygon(g.map_coords(func)),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(g.map_coords(func)),
            Geometry::MultiLineString(g) => Geometry::MultiLineString(g.map_coords(func)),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.map_coords(func)),
            Geometry::Rect(g) => Geometry::Rect(g.map_coords(func)),
            Geometry::Triangle(g) => Geometry::Triangle(g.map_coords(func)),
            Geometry::GeometryCollection(g) => Geometry::GeometryCollection(g.map_coords(func)),
        }
    }
}

impl MapCoordsInPlace for Geometry<f64> {
    fn map_coords_in_place(&mut self, func: impl Fn(Coord<f64>) -> Coord<f64> + Copy) {
        match self {
            Geometry::Point(g) => g.map_coords_in_place(func),
            Geometry::Line(g) => g.map_coords_in_place(func),
            Geometry::LineString(g) => g.map_coords_in_place(func),
            Geometry::Polygon(g) => g.map_coords_in_place(func),
            Geometry::MultiPoint(g) => g.map_coords_in_place(func),
            Geometry::MultiLineString(g) => g.map_coords_in_place(func),
            Geometry::MultiPolygon(g) => g.map_coords_in_place(func),
            Geometry::Rect(g) => g.map_coords_in_place(func),
            Geometry::Triangle(g) => g.map_coords_in_place(func),
            Geometry::GeometryCollection(g) => g.map_coords_in_place(func),
        }
    }
}
