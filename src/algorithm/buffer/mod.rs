//! Create a new geometry whose boundary is offset a given distance from the
//! input.
//!
//! The buffer of a geometry is the set of points within a signed distance
//! of it: a positive distance dilates, a negative one erodes. The pipeline
//! generates raw offset curves for every component, nodes them, builds a
//! planar graph, assigns side depths from the rightmost edge of each
//! connected subgraph inward, and assembles the boundary polygons.

mod builder;
mod edge_ring;
pub(crate) mod graph;
pub(crate) mod noding;
mod offset_curve_builder;
mod offset_curve_set_builder;
mod polygon_builder;
mod rightmost_edge_finder;
mod subgraph;
mod subgraph_depth_locater;

pub use builder::BufferBuilder;

use crate::Error;
use geo_types::{
    Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Rect, Triangle,
};

/// The shape placed at the open ends of a buffered line, and around
/// buffered points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndCapStyle {
    /// A semicircular arc over the end.
    #[default]
    Round,
    /// The buffer stops flat at the end of the line.
    Flat,
    /// A square extending half the buffer width past the end of the line.
    Square,
}

/// The noding strategy used by the buffer pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoderKind {
    /// Single-pass noding over an R-tree of monotone chains, with a robust
    /// intersector. The default.
    #[default]
    MonotoneChainIndex,
    /// Repeated monotone-chain noding until a fixed point; surfaces
    /// [`Error::NonConvergentNoding`] when rounding keeps introducing new
    /// crossings.
    Iterated,
}

/// Parameters controlling the shape of a buffer.
///
/// # Examples
///
/// ```
/// use geo_planar::buffer::{BufferParams, EndCapStyle};
///
/// let params = BufferParams::new()
///     .with_quadrant_segments(16)
///     .with_end_cap_style(EndCapStyle::Flat);
/// assert_eq!(params.quadrant_segments(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferParams {
    quadrant_segments: u32,
    end_cap_style: EndCapStyle,
}

impl Default for BufferParams {
    fn default() -> Self {
        BufferParams {
            quadrant_segments: BufferParams::DEFAULT_QUADRANT_SEGMENTS,
            end_cap_style: EndCapStyle::Round,
        }
    }
}

impl BufferParams {
    /// The default number of fillet segments per quarter circle.
    pub const DEFAULT_QUADRANT_SEGMENTS: u32 = 8;

    pub fn new() -> BufferParams {
        BufferParams::default()
    }

    /// The number of line segments used to approximate a quarter circle of
    /// fillet arc. Values below 1 are pinned to 1.
    pub fn with_quadrant_segments(mut self, quadrant_segments: u32) -> BufferParams {
        self.quadrant_segments = quadrant_segments.max(1);
        self
    }

    pub fn with_end_cap_style(mut self, end_cap_style: EndCapStyle) -> BufferParams {
        self.end_cap_style = end_cap_style;
        self
    }

    pub fn quadrant_segments(&self) -> u32 {
        self.quadrant_segments
    }

    pub fn end_cap_style(&self) -> EndCapStyle {
        self.end_cap_style
    }
}

/// Create a new geometry whose boundary is offset the specified distance
/// from the input.
///
/// # Examples
///
/// ```
/// use geo_planar::polygon;
/// use geo_planar::{Area, Buffer};
///
/// let square = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 10.0, y: 0.0),
///     (x: 10.0, y: 10.0),
///     (x: 0.0, y: 10.0),
/// ];
/// let grown = square.buffer(1.0).unwrap();
/// assert!(grown.unsigned_area() > 100.0);
/// ```
pub trait Buffer {
    /// The buffer at `distance`, with default parameters (round caps,
    /// 8 quadrant segments).
    fn buffer(&self, distance: f64) -> Result<Geometry<f64>, Error>;

    /// The buffer at `distance` with explicit curve parameters.
    fn buffer_with_params(&self, distance: f64, params: &BufferParams)
        -> Result<Geometry<f64>, Error>;
}

impl Buffer for Geometry<f64> {
    fn buffer(&self, distance: f64) -> Result<Geometry<f64>, Error> {
        self.buffer_with_params(distance, &BufferParams::default())
    }

    fn buffer_with_params(
        &self,
        distance: f64,
        params: &BufferParams,
    ) -> Result<Geometry<f64>, Error> {
        BufferBuilder::new(*params).buffer(self, distance)
    }
}

macro_rules! impl_buffer_via_geometry {
    ($t:ty) => {
        impl Buffer for $t {
            fn buffer(&self, distance: f64) -> Result<Geometry<f64>, Error> {
                Geometry::from(self.clone()).buffer(distance)
            }

            fn buffer_with_params(
                &self,
                distance: f64,
                params: &BufferParams,
            ) -> Result<Geometry<f64>, Error> {
                Geometry::from(self.clone()).buffer_with_params(distance, params)
            }
        }
    };
}

impl_buffer_via_geometry!(Point<f64>);
impl_buffer_via_geometry!(Line<f64>);
impl_buffer_via_geometry!(LineString<f64>);
impl_buffer_via_geometry!(Polygon<f64>);
impl_buffer_via_geometry!(MultiPoint<f64>);
impl_buffer_via_geometry!(MultiLineString<f64>);
impl_buffer_via_geometry!(MultiPolygon<f64>);
impl_buffer_via_geometry!(Rect<f64>);
impl_buffer_via_geometry!(Triangle<f64>);

impl Buffer for GeometryCollection<f64> {
    fn buffer(&self, distance: f64) -> Result<Geometry<f64>, Error> {
        Geometry::GeometryCollection(self.clone()).buffer(distance)
    }

    fn buffer_with_params(
        &self,
        distance: f64,
        params: &BufferParams,
    ) -> Result<Geometry<f64>, Error> {
        Geometry::GeometryCollection(self.clone()).buffer_with_params(distance, params)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::area::Area;
    use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
    use geo_types::{coord, line_string, point, polygon};
    use std::f64::consts::PI;

    #[test]
    fn point_buffer_is_a_disc() {
        let buffered = point!(x: 0.0, y: 0.0).buffer(10.0).unwrap();
        let area = buffered.unsigned_area();
        assert!(area < PI * 100.0);
        assert!(area > PI * 100.0 * 0.98);
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 11.0, y: 0.0 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn zero_distance_point_buffer_is_empty() {
        let buffered = point!(x: 0.0, y: 0.0).buffer(0.0).unwrap();
        assert_eq!(buffered.unsigned_area(), 0.0);
    }

    #[test]
    fn line_buffer_flat_caps_is_a_rectangle() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let params = BufferParams::new().with_end_cap_style(EndCapStyle::Flat);
        let buffered = line.buffer_with_params(2.0, &params).unwrap();
        assert_relative_eq!(buffered.unsigned_area(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn square_buffer_area_matches_closed_form() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let params = BufferParams::new().with_end_cap_style(EndCapStyle::Flat);
        let buffered = square.buffer_with_params(0.5, &params).unwrap();
        let expected = 1.0 + 4.0 * 0.5 + 0.25 * PI;
        let area = buffered.unsigned_area();
        // the fillet polygons under-approximate the corner arcs
        assert!(area <= expected);
        assert!(area > expected * 0.99);
    }

    #[test]
    fn polygon_buffer_contains_the_polygon() {
        let poly = polygon![
            (x: 0.0, y: 0.0),
            (x: 7.0, y: 2.0),
            (x: 10.0, y: 10.0),
            (x: 2.0, y: 8.0),
        ];
        let buffered = poly.buffer(1.0).unwrap();
        for coord in &poly.exterior().0 {
            assert_ne!(
                buffered.coordinate_position(coord),
                CoordPos::Outside,
                "vertex {:?} fell outside the buffer",
                coord
            );
        }
    }

    #[test]
    fn buffer_is_monotone_in_distance() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 6.0, y: 2.0), (x: 9.0, y: -1.0)];
        let small = line.buffer(0.5).unwrap();
        let large = line.buffer(2.0).unwrap();
        assert!(small.unsigned_area() < large.unsigned_area());

        // spot check: a sample of points inside the small buffer stays
        // inside the large one
        for coord in [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 3.0, y: 1.2 },
            coord! { x: 9.0, y: -1.0 },
        ] {
            assert_ne!(small.coordinate_position(&coord), CoordPos::Outside);
            assert_ne!(large.coordinate_position(&coord), CoordPos::Outside);
        }
    }

    #[test]
    fn negative_buffer_shrinks_polygon() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ];
        let shrunk = square.buffer(-1.0).unwrap();
        assert_relative_eq!(shrunk.unsigned_area(), 64.0, epsilon = 1e-6);
    }

    #[test]
    fn over_eroded_polygon_is_empty() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
        ];
        let gone = square.buffer(-6.0).unwrap();
        assert_eq!(gone.unsigned_area(), 0.0);
    }

    #[test]
    fn eroded_triangle_is_empty() {
        // in-radius of the 3-4-5 right triangle is 1
        let triangle = polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 0.0, y: 3.0),
        ];
        let gone = triangle.buffer(-1.5).unwrap();
        assert_eq!(gone.unsigned_area(), 0.0);
    }

    #[test]
    fn polygon_with_hole_keeps_hole_in_buffer() {
        let poly = polygon![
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 20.0, y: 0.0),
                (x: 20.0, y: 20.0),
                (x: 0.0, y: 20.0),
            ],
            interiors: [[
                (x: 5.0, y: 5.0),
                (x: 15.0, y: 5.0),
                (x: 15.0, y: 15.0),
                (x: 5.0, y: 15.0),
            ]],
        ];
        let buffered = poly.buffer(1.0).unwrap();
        // hole shrinks but remains
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 10.0, y: 10.0 }),
            CoordPos::Outside
        );
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 2.0, y: 2.0 }),
            CoordPos::Inside
        );
        // a point in the eaten-away band joins the interior
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 5.5, y: 10.0 }),
            CoordPos::Inside
        );
    }

    #[test]
    fn buffer_fills_a_swallowed_hole() {
        let poly = polygon![
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 20.0, y: 0.0),
                (x: 20.0, y: 20.0),
                (x: 0.0, y: 20.0),
            ],
            interiors: [[
                (x: 9.0, y: 9.0),
                (x: 11.0, y: 9.0),
                (x: 11.0, y: 11.0),
                (x: 9.0, y: 11.0),
            ]],
        ];
        let buffered = poly.buffer(2.0).unwrap();
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 10.0, y: 10.0 }),
            CoordPos::Inside
        );
    }

    #[test]
    fn multi_point_buffers_union_by_depth() {
        let points = geo_types::MultiPoint(vec![
            point!(x: 0.0, y: 0.0),
            point!(x: 1.0, y: 0.0),
        ]);
        // discs overlap; the merged area is below the sum of both discs
        let buffered = points.buffer(1.0).unwrap();
        let area = buffered.unsigned_area();
        assert!(area > PI * 0.9);
        assert!(area < 2.0 * PI);
        assert_eq!(
            buffered.coordinate_position(&coord! { x: 0.5, y: 0.0 }),
            CoordPos::Inside
        );
    }

    #[test]
    fn empty_collection_buffers_to_empty() {
        let empty = GeometryCollection::<f64>(vec![]);
        let buffered = empty.buffer(3.0).unwrap();
        assert_eq!(buffered.unsigned_area(), 0.0);
    }

    #[test]
    fn fixed_precision_buffer_snaps_output(){
        let pm = crate::PrecisionModel::new_fixed(10.0).unwrap();
        let mut builder = BufferBuilder::default();
        builder.set_working_precision_model(pm);
        let geometry: Geometry<f64> = point!(x: 0.0, y: 0.0).into();
        let buffered = builder.buffer(&geometry, 5.0).unwrap();
        if let Geometry::Polygon(p) = buffered {
            for c in &p.exterior().0 {
                assert_eq!(c.x, pm.make_precise_value(c.x));
                assert_eq!(c.y, pm.make_precise_value(c.y));
            }
        } else {
            panic!("expected a polygon");
        }
    }
}
