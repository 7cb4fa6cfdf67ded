//! Shape reference point.

use crate::geometry::{Point2D, Polygon};

/// Mean of all vertices after adding the datum.
///
/// This is the vertex average, not the area centroid; it only serves as
/// the reference for quadrant classification.
pub fn find_centre(polygon: &Polygon, datum: Point2D) -> Point2D {
    if polygon.is_empty() {
        return datum;
    }

    let count = polygon.len() as f64;
    let (sum_x, sum_y) = polygon
        .vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x + datum.x, sy + p.y + datum.y));

    Point2D::new(sum_x / count, sum_y / count)
}
