use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};
use std::{iter, slice};

/// Iterate over all exterior and (if any) interior coordinates of a
/// geometry.
///
/// # Examples
///
/// ```
/// use geo_planar::coords_iter::CoordsIter;
///
/// let multi_point = geo_planar::MultiPoint(vec![
///     geo_planar::point!(x: -10., y: 0.),
///     geo_planar::point!(x: 20., y: 20.),
/// ]);
///
/// let mut iter = multi_point.coords_iter();
/// assert_eq!(Some(geo_planar::Coord { x: -10., y: 0. }), iter.next());
/// assert_eq!(Some(geo_planar::Coord { x: 20., y: 20. }), iter.next());
/// assert_eq!(None, iter.next());
/// ```
pub trait CoordsIter<'a> {
    type Iter: Iterator<Item = Coord<f64>>;

    fn coords_iter(&'a self) -> Self::Iter;

    /// The number of coordinates the iterator will yield.
    fn coords_count(&'a self) -> usize;
}

impl<'a> CoordsIter<'a> for Point<f64> {
    type Iter = iter::Once<Coord<f64>>;

    fn coords_iter(&'a self) -> Self::Iter {
        iter::once(self.0)
    }

    fn coords_count(&'a self) -> usize {
        1
    }
}

impl<'a> CoordsIter<'a> for Line<f64> {
    type Iter = iter::Chain<iter::Once<Coord<f64>>, iter::Once<Coord<f64>>>;

    fn coords_iter(&'a self) -> Self::Iter {
        iter::once(self.start).chain(iter::once(self.end))
    }

    fn coords_count(&'a self) -> usize {
        2
    }
}

impl<'a> CoordsIter<'a> for LineString<f64> {
    type Iter = iter::Copied<slice::Iter<'a, Coord<f64>>>;

    fn coords_iter(&'a self) -> Self::Iter {
        self.0.iter().copied()
    }

    fn coords_count(&'a self) -> usize {
        self.0.len()
    }
}

impl<'a> CoordsIter<'a> for Triangle<f64> {
    type Iter = std::array::IntoIter<Coord<f64>, 3>;

    fn coords_iter(&'a self) -> Self::Iter {
        self.to_array().into_iter()
    }

    fn coords_count(&'a self) -> usize {
        3
    }
}

impl<'a> CoordsIter<'a> for Rect<f64> {
    type Iter = std::array::IntoIter<Coord<f64>, 4>;

    fn coords_iter(&'a self) -> Self::Iter {
        [
            Coord {
                x: self.min().x,
                y: self.min().y,
            },
            Coord {
                x: self.min().x,
                y: self.max().y,
            },
            Coord {
                x: self.max().x,
                y: self.max().y,
            },
            Coord {
                x: self.max().x,
                y: self.min().y,
            },
        ]
        .into_iter()
    }

    fn coords_count(&'a self) -> usize {
        4
    }
}

impl<'a> CoordsIter<'a> for Polygon<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        Box::new(
            self.exterior()
                .coords_iter()
                .chain(self.interiors().iter().flat_map(|ring| ring.coords_iter())),
        )
    }

    fn coords_count(&'a self) -> usize {
        self.exterior().coords_count()
            + self
                .interiors()
                .iter()
                .map(|ring| ring.coords_count())
                .sum::<usize>()
    }
}

impl<'a> CoordsIter<'a> for MultiPoint<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        Box::new(self.0.iter().map(|point| point.0))
    }

    fn coords_count(&'a self) -> usize {
        self.0.len()
    }
}

impl<'a> CoordsIter<'a> for MultiLineString<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        Box::new(self.0.iter().flat_map(|ls| ls.coords_iter()))
    }

    fn coords_count(&'a self) -> usize {
        self.0.iter().map(|ls| ls.coords_count()).sum()
    }
}

impl<'a> CoordsIter<'a> for MultiPolygon<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        Box::new(self.0.iter().flat_map(|polygon| polygon.coords_iter()))
    }

    fn coords_count(&'a self) -> usize {
        self.0.iter().map(|polygon| polygon.coords_count()).sum()
    }
}

impl<'a> CoordsIter<'a> for GeometryCollection<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        Box::new(self.0.iter().flat_map(|geometry| geometry.coords_iter()))
    }

    fn coords_count(&'a self) -> usize {
        self.0.iter().map(|geometry| geometry.coords_count()).sum()
    }
}

impl<'a> CoordsIter<'a> for Geometry<f64> {
    type Iter = Box<dyn Iterator<Item = Coord<f64>> + 'a>;

    fn coords_iter(&'a self) -> Self::Iter {
        match self {
            Geometry::Point(g) => Box::new(g.coords_iter()),
            Geometry::Line(g) => Box::new(g.coords_iter()),
            Geometry::LineString(g) => Box::new(g.coords_iter()),
            Geometry::Polygon(g) => g.coords_iter(),
            Geometry::MultiPoint(g) => g.coords_iter(),
            Geometry::MultiLineString(g) => g.coords_iter(),
            Geometry::MultiPolygon(g) => g.coords_iter(),
            Geometry::Rect(g) => Box::new(g.coords_iter()),
            Geometry::Triangle(g) => Box::new(g.coords_iter()),
            Geometry::GeometryCollection(g) => g.coords_iter(),
        }
    }

    fn coords_count(&'a self) -> usize {
        match self {
            Geometry::Point(g) => g.coords_count(),
            Geometry::Line(g) => g.coords_count(),
            Geometry::LineString(g) => g.coords_count(),
            Geometry::Polygon(g) => g.coords_count(),
            Geometry::MultiPoint(g) => g.coords_count(),
            Geometry::MultiLineString(g) => g.coords_count(),
            Geometry::MultiPolygon(g) => g.coords_count(),
            Geometry::Rect(g) => g.coords_count(),
            Geometry::Triangle(g) => g.coords_count(),
            Geometry::GeometryCollection(g) => g.coords_count(),
        }
    }
}
