//! The `geo-planar` crate provides robust planar-geometry algorithms for
//! [`geo-types`] geometries: exact predicates, segment intersection, point
//! location, convex hulls, affine transforms, and offset-curve (buffer)
//! construction.
//!
//! # Types
//!
//! All geometry types are re-exported from the [`geo-types`] crate:
//! [`Coord`], [`Point`], [`Line`], [`LineString`], [`Polygon`],
//! [`MultiPoint`], [`MultiLineString`], [`MultiPolygon`], [`Rect`],
//! [`Triangle`], [`GeometryCollection`], and the [`Geometry`] enum.
//!
//! This crate works exclusively with `f64` coordinates. Its numeric kernel,
//! the sign of a 2×2 determinant and the orientation index built on it, is
//! exact for IEEE-754 doubles; every other predicate in the crate derives its
//! orientation decisions from that kernel.
//!
//! # Algorithms
//!
//! ## Predicates
//!
//! - **[`sign_of_det2x2`](algorithm::kernels::sign_of_det2x2)**: exact sign of a 2×2 determinant
//! - **[`orient2d`](algorithm::kernels::orient2d)**: robust orientation of three coordinates
//! - **[`CoordinatePosition`](CoordinatePosition)**: locate a coordinate inside / on the
//!   boundary of / outside a geometry
//! - **[`line_intersection`](line_intersection::line_intersection)**: robust segment–segment
//!   intersection, with collinear-overlap support
//! - **[`Winding`](Winding)**: compute and manipulate ring winding order
//!
//! ## Construction
//!
//! - **[`Buffer`](Buffer)**: the set of points within a signed distance of a geometry,
//!   with configurable end caps and fillet resolution
//! - **[`ConvexHull`](ConvexHull)**: Graham scan with octagonal point reduction
//! - **[`Centroid`](Centroid)** and **[`InteriorPoint`](InteriorPoint)**
//!
//! ## Transforms
//!
//! - **[`AffineTransform`](AffineTransform)**: composable 2D affine maps, including
//!   constructors from 1, 2, or 3 control-point pairs
//! - **[`MapCoords`](MapCoords)** / **[`MapCoordsInPlace`](MapCoordsInPlace)**: the
//!   coordinate-visitor contract used to apply transforms
//!
//! # Precision
//!
//! A [`PrecisionModel`] rounds computed coordinates onto a fixed grid (or to
//! single precision) when required. Intersection points and generated buffer
//! vertices pass through the active model exactly once, immediately before
//! they are emitted.
//!
//! [`geo-types`]: https://crates.io/crates/geo-types

extern crate geo_types;
extern crate num_traits;
extern crate rstar;

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate approx;

pub use crate::algorithm::*;

pub use geo_types::{
    coord, line_string, point, polygon, Coord, Geometry, GeometryCollection, Line, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect, Triangle,
};

/// This module includes all the functions of geometric calculations
pub mod algorithm;
mod error;
mod factory;
mod precision;
pub(crate) mod utils;

pub use error::Error;
pub use factory::GeometryFactory;
pub use precision::PrecisionModel;

/// A prelude which re-exports the traits for manipulating objects in this
/// crate. Typically imported with `use geo_planar::prelude::*`.
pub mod prelude {
    pub use crate::algorithm::*;
    pub use crate::{GeometryFactory, PrecisionModel};
}
