//! The geometry kernel (L0): pure functions on points and polygons.
//!
//! Every function here is total with respect to its inputs: degenerate
//! polygons produce safe defaults rather than panics or errors (§4.1,
//! §4.6). Higher layers (the placement oracle, the packer) build on this
//! module and this module alone; it has no upward dependencies.

pub mod hull;
pub mod offset;
pub mod ops;
pub mod rand;
pub mod sat;
pub mod types;

pub use hull::convex_hull;
pub use offset::offset;
pub use ops::{area, bbox, centroid, ensure_ccw, normalize, rotate, rotate_about_centroid, signed_area, translate};
pub use sat::{point_in_polygon, polygons_intersect, polygons_intersect_eps};
pub use types::{rectangle, GeomCfg, Point, Polygon};
