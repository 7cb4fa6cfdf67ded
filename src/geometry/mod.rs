//! Planar geometry primitives for shape contours.

mod point;
mod polygon;

pub use point::{Point2D, Quadrant};
pub use polygon::{Polygon, Winding};
