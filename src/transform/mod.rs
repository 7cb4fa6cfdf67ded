//! Geometric transformations applied to the drawn shape.

mod centroid;
mod corners;
mod offset;
mod orientation;

pub use centroid::find_centre;
pub use corners::{active_corner_radius, add_corner_points, adjusted_corner_radius};
pub use offset::apply_offset;
pub use orientation::normalize_winding;
