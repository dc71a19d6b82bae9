use crate::algorithm::bounding_rect::BoundingRect;
use crate::algorithm::centroid::Centroid;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::utils::CoordDistance;
use geo_types::{
    Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// Calculation of interior points.
///
/// An interior point is a point guaranteed to intersect the geometry. It
/// lies strictly in the interior when the geometry has one, and a best
/// effort is made to place it centrally: polygons are stabbed with the
/// horizontal bisector of their envelope and the midpoint of the widest
/// interior interval wins; lines prefer the non-endpoint vertex closest to
/// the centroid; point sets pick the member closest to the centroid.
pub trait InteriorPoint {
    type Output;

    fn interior_point(&self) -> Self::Output;
}

impl InteriorPoint for Point<f64> {
    type Output = Point<f64>;

    fn interior_point(&self) -> Self::Output {
        *self
    }
}

impl InteriorPoint for Line<f64> {
    type Output = Point<f64>;

    fn interior_point(&self) -> Self::Output {
        // the midpoint need not lie exactly on the line after rounding, so
        // an endpoint is the safe representative
        Point(self.start)
    }
}

impl InteriorPoint for LineString<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        match self.0.len() {
            0 => None,
            1 => Some(Point(self.0[0])),
            2 => Some(Point(self.0[0])),
            _ => {
                let centroid = self.centroid()?;
                // the non-endpoint vertex closest to the centroid
                self.0[1..self.0.len() - 1]
                    .iter()
                    .min_by(|a, b| {
                        a.distance_squared(centroid.0)
                            .partial_cmp(&b.distance_squared(centroid.0))
                            .unwrap()
                    })
                    .map(|c| Point(*c))
            }
        }
    }
}

impl InteriorPoint for MultiLineString<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        let centroid = self.centroid()?;
        nearest_candidate(
            self.0.iter().filter_map(|ls| ls.interior_point()),
            centroid,
        )
    }
}

impl InteriorPoint for Polygon<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        let bounds = self.bounding_rect()?;
        let scan_y = (bounds.min().y + bounds.max().y) / 2.0;

        // collect the x ordinates where the bisector crosses any ring; the
        // strictly-above rule gives a consistent parity even when the
        // scanline passes through vertices
        let mut crossings: Vec<f64> = Vec::new();
        for ring in std::iter::once(self.exterior()).chain(self.interiors().iter()) {
            for line in ring.lines() {
                let (p1, p2) = (line.start, line.end);
                if (p1.y > scan_y && p2.y <= scan_y) || (p2.y > scan_y && p1.y <= scan_y) {
                    let frac = (scan_y - p1.y) / (p2.y - p1.y);
                    crossings.push(p1.x + frac * (p2.x - p1.x));
                }
            }
        }
        crossings.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());

        // crossings alternate outside -> inside -> outside; take the widest
        // interior interval
        let mut best: Option<(f64, Coord<f64>)> = None;
        for pair in crossings.chunks_exact(2) {
            let width = pair[1] - pair[0];
            let midpoint = Coord {
                x: (pair[0] + pair[1]) / 2.0,
                y: scan_y,
            };
            if self.coordinate_position(&midpoint) != CoordPos::Outside
                && best.map(|(w, _)| width > w).unwrap_or(true)
            {
                best = Some((width, midpoint));
            }
        }
        if let Some((_, coord)) = best {
            return Some(Point(coord));
        }

        // degenerate area: fall back to the boundary's representative
        self.exterior().interior_point()
    }
}

impl InteriorPoint for MultiPolygon<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        let centroid = self.centroid()?;
        nearest_candidate(
            self.0.iter().filter_map(|p| p.interior_point()),
            centroid,
        )
    }
}

impl InteriorPoint for MultiPoint<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        let centroid = self.centroid()?;
        nearest_candidate(self.0.iter().copied(), centroid)
    }
}

impl InteriorPoint for Rect<f64> {
    type Output = Point<f64>;

    fn interior_point(&self) -> Self::Output {
        Point(self.center())
    }
}

impl InteriorPoint for Triangle<f64> {
    type Output = Point<f64>;

    fn interior_point(&self) -> Self::Output {
        self.to_polygon()
            .interior_point()
            .expect("triangle is non-empty")
    }
}

impl InteriorPoint for GeometryCollection<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        let centroid = self.centroid()?;
        nearest_candidate(
            self.0.iter().filter_map(|g| g.interior_point()),
            centroid,
        )
    }
}

impl InteriorPoint for Geometry<f64> {
    type Output = Option<Point<f64>>;

    fn interior_point(&self) -> Self::Output {
        match self {
            Geometry::Point(g) => Some(g.interior_point()),
            Geometry::Line(g) => Some(g.interior_point()),
            Geometry::LineString(g) => g.interior_point(),
            Geometry::Polygon(g) => g.interior_point(),
            Geometry::MultiPoint(g) => g.interior_point(),
            Geometry::MultiLineString(g) => g.interior_point(),
            Geometry::MultiPolygon(g) => g.interior_point(),
            Geometry::Rect(g) => Some(g.interior_point()),
            Geometry::Triangle(g) => Some(g.interior_point()),
            Geometry::GeometryCollection(g) => g.interior_point(),
        }
    }
}

fn nearest_candidate<I>(candidates: I, target: Point<f64>) -> Option<Point<f64>>
where
    I: IntoIterator<Item = Point<f64>>,
{
    candidates.into_iter().min_by(|a, b| {
        a.0.distance_squared(target.0)
            .partial_cmp(&b.0.distance_squared(target.0))
            .unwrap()
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::{line_string, point, polygon};

    #[test]
    fn rhombus_interior_point() {
        let polygon = polygon![
            (x: -2., y: 1.),
            (x: 1., y: 3.),
            (x: 4., y: 1.),
            (x: 1., y: -1.),
            (x: -2., y: 1.),
        ];
        assert_eq!(polygon.interior_point(), Some(point!(x: 1., y: 1.)));
    }

    #[test]
    fn interior_point_avoids_hole() {
        // hole centred on the envelope midpoint forces the stab to one side
        let polygon = polygon![
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
        let pt = polygon.interior_point().unwrap();
        assert_eq!(polygon.coordinate_position(&pt.0), CoordPos::Inside);
    }

    #[test]
    fn line_string_picks_interior_vertex() {
        let ls = line_string![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 2.0, y: 2.0),
        ];
        assert_eq!(ls.interior_point(), Some(point!(x: 1.0, y: 1.0)));
    }

    #[test]
    fn multi_point_picks_member() {
        let mp = MultiPoint(vec![
            point!(x: 0.0, y: 0.0),
            point!(x: 2.0, y: 0.0),
            point!(x: 10.0, y: 0.0),
        ]);
        let interior = mp.interior_point().unwrap();
        assert!(mp.0.contains(&interior));
    }
}
