/// Exact numeric kernel: sign-of-determinant and orientation index.
pub mod kernels;
pub use kernels::{orient2d, sign_of_det2x2, Orientation};

/// Signed and unsigned planar area.
pub mod area;
pub use area::Area;

/// Axis-aligned bounding rectangles for all geometry types.
pub mod bounding_rect;
pub use bounding_rect::BoundingRect;

/// Create a new geometry whose boundary is offset a given distance from the
/// input.
pub mod buffer;
pub use buffer::{Buffer, BufferBuilder, BufferParams, EndCapStyle, NoderKind};

/// Calculate the centroid of a geometry.
pub mod centroid;
pub use centroid::Centroid;

/// Calculate the position of a coordinate relative to a geometry.
pub mod coordinate_position;
pub use coordinate_position::{
    coord_pos_relative_to_ring, is_coord_in_ring, CoordPos, CoordinatePosition,
};

/// Iterate over geometry coordinates.
pub mod coords_iter;
pub use coords_iter::CoordsIter;

/// Calculate the convex hull of a geometry.
pub mod convex_hull;
pub use convex_hull::ConvexHull;

/// Euclidean length of linear geometries.
pub mod euclidean_length;
pub use euclidean_length::EuclideanLength;

/// Calculate a representative point inside a geometry.
pub mod interior_point;
pub use interior_point::InteriorPoint;

/// Robust segment–segment intersection.
pub mod line_intersection;
pub use line_intersection::{line_intersection, LineIntersection, LineIntersector};

/// Segment operations: normalization, projection, perpendicular distance.
pub mod line_segment;
pub use line_segment::LineSegmentOps;

/// Map a function over the coordinates of a geometry.
pub mod map_coords;
pub use map_coords::{MapCoords, MapCoordsInPlace};

/// Composable affine transformations and the dense-matrix solver backing
/// their control-point constructors.
pub mod affine;
pub use affine::{AffineTransform, GeneralMatrix};

/// Calculate and manipulate the winding order of rings.
pub mod winding_order;
pub use winding_order::{is_ccw, RingOrientation, Winding, WindingOrder};
