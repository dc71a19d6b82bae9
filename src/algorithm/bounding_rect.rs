use crate::utils::{rect_expanded_to_include, rect_union};
use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

// Envelope arithmetic over `Rect`, shared with the buffer internals.
pub use crate::utils::{
    rect_contains_rect, rect_expanded_to_include as rect_expanded_to_include_coord,
    rect_inflated_by, rect_intersects_coord, rect_translated_by, rects_intersect,
};

/// Calculation of the axis-aligned bounding rectangle of a geometry.
///
/// The *null* envelope (the envelope of an empty geometry) is represented
/// as `None`.
pub trait BoundingRect {
    type Output;

    /// The smallest axis-aligned rectangle containing the geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_planar::line_string;
    /// use geo_planar::BoundingRect;
    ///
    /// let line_string = line_string![
    ///     (x: 40.02, y: 116.34),
    ///     (x: 42.02, y: 116.34),
    ///     (x: 42.02, y: 118.34),
    /// ];
    ///
    /// let bounding_rect = line_string.bounding_rect().unwrap();
    /// assert_eq!(40.02, bounding_rect.min().x);
    /// assert_eq!(42.02, bounding_rect.max().x);
    /// ```
    fn bounding_rect(&self) -> Self::Output;
}

pub(crate) fn bounding_rect_of_coords<I>(coords: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut iter = coords.into_iter();
    let first = iter.next()?;
    let mut rect = Rect::new(first, first);
    for coord in iter {
        rect = rect_expanded_to_include(rect, coord);
    }
    Some(rect)
}

impl BoundingRect for Coord<f64> {
    type Output = Rect<f64>;

    fn bounding_rect(&self) -> Self::Output {
        Rect::new(*self, *self)
    }
}

impl BoundingRect for Point<f64> {
    type Output = Rect<f64>;

    fn bounding_rect(&self) -> Self::Output {
        Rect::new(self.0, self.0)
    }
}

impl BoundingRect for Line<f64> {
    type Output = Rect<f64>;

    fn bounding_rect(&self) -> Self::Output {
        Rect::new(self.start, self.end)
    }
}

impl BoundingRect for LineString<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        bounding_rect_of_coords(self.0.iter().copied())
    }
}

impl BoundingRect for MultiPoint<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        bounding_rect_of_coords(self.0.iter().map(|p| p.0))
    }
}

impl BoundingRect for MultiLineString<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        fold_bounding_rects(self.0.iter().map(|ls| ls.bounding_rect()))
    }
}

impl BoundingRect for Polygon<f64> {
    type Output = Option<Rect<f64>>;

    // interior rings of a valid polygon cannot extend past the shell
    fn bounding_rect(&self) -> Self::Output {
        self.exterior().bounding_rect()
    }
}

impl BoundingRect for MultiPolygon<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        fold_bounding_rects(self.0.iter().map(|p| p.bounding_rect()))
    }
}

impl BoundingRect for Rect<f64> {
    type Output = Rect<f64>;

    fn bounding_rect(&self) -> Self::Output {
        *self
    }
}

impl BoundingRect for Triangle<f64> {
    type Output = Rect<f64>;

    fn bounding_rect(&self) -> Self::Output {
        bounding_rect_of_coords(self.to_array()).unwrap()
    }
}

impl BoundingRect for GeometryCollection<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        fold_bounding_rects(self.0.iter().map(|g| g.bounding_rect()))
    }
}

impl BoundingRect for Geometry<f64> {
    type Output = Option<Rect<f64>>;

    fn bounding_rect(&self) -> Self::Output {
        match self {
            Geometry::Point(g) => Some(g.bounding_rect()),
            Geometry::Line(g) => Some(g.bounding_rect()),
            Geometry::LineString(g) => g.bounding_rect(),
            Geometry::Polygon(g) => g.bounding_rect(),
            Geometry::MultiPoint(g) => g.bounding_rect(),
            Geometry::MultiLineString(g) => g.bounding_rect(),
            Geometry::MultiPolygon(g) => g.bounding_rect(),
            Geometry::Rect(g) => Some(g.bounding_rect()),
            Geometry::Triangle(g) => Some(g.bounding_rect()),
            Geometry::GeometryCollection(g) => g.bounding_rect(),
        }
    }
}

fn fold_bounding_rects<I>(rects: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = Option<Rect<f64>>>,
{
    rects
        .into_iter()
        .flatten()
        .reduce(|acc, next| rect_union(acc, next))
}
