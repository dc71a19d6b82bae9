use crate::PrecisionModel;
use geo_types::{
    Coord, Geometry, GeometryCollection, LineString, MultiPolygon, Point, Polygon,
};

/// Constructs geometries under an ambient [`PrecisionModel`].
///
/// Coordinates handed to the factory are rounded by the model before the
/// geometry is built, so geometries produced by the same factory are
/// mutually consistent.
#[derive(Debug, Clone, Default)]
pub struct GeometryFactory {
    precision_model: PrecisionModel,
}

impl GeometryFactory {
    pub fn new(precision_model: PrecisionModel) -> Self {
        GeometryFactory { precision_model }
    }

    pub fn precision_model(&self) -> &PrecisionModel {
        &self.precision_model
    }

    pub fn create_point(&self, coord: Coord<f64>) -> Point<f64> {
        Point(self.precision_model.precise(coord))
    }

    pub fn create_line_string(&self, coords: Vec<Coord<f64>>) -> LineString<f64> {
        LineString::new(self.rounded(coords))
    }

    /// Build a closed ring from `coords`, closing it if the first and last
    /// coordinates differ.
    pub fn create_linear_ring(&self, coords: Vec<Coord<f64>>) -> LineString<f64> {
        let mut ring = LineString::new(self.rounded(coords));
        ring.close();
        ring
    }

    pub fn create_polygon(
        &self,
        shell: LineString<f64>,
        holes: Vec<LineString<f64>>,
    ) -> Polygon<f64> {
        Polygon::new(shell, holes)
    }

    /// Wrap a list of polygons as the simplest geometry that represents it:
    /// an empty `GeometryCollection` for zero polygons, the polygon itself
    /// for one, and a `MultiPolygon` otherwise.
    pub fn build_geometry(&self, mut polygons: Vec<Polygon<f64>>) -> Geometry<f64> {
        match polygons.len() {
            0 => Geometry::GeometryCollection(GeometryCollection(vec![])),
            1 => Geometry::Polygon(polygons.remove(0)),
            _ => Geometry::MultiPolygon(MultiPolygon(polygons)),
        }
    }

    fn rounded(&self, mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
        if !self.precision_model.is_floating() {
            for coord in &mut coords {
                self.precision_model.make_precise(coord);
            }
        }
        coords
    }
}
