//! Corner rounding via tangent points.

use crate::config::MIN_CORNER_RADIUS;
use crate::error::Result;
use crate::geometry::{Point2D, Polygon, Quadrant};
use crate::model::OffsetKind;

/// Corner radius the tool centre follows once the offset is applied.
pub fn adjusted_corner_radius(corner_radius: f64, offset: OffsetKind, tool_diameter: f64) -> f64 {
    corner_radius + offset.corner_radius_delta(tool_diameter)
}

/// Radius to round corners with, or `None` to cut sharp corners.
///
/// Radii that collapse to zero or below, or are too small to matter,
/// fall back to straight-line cutting.
pub fn active_corner_radius(corner_radius: f64, offset: OffsetKind, tool_diameter: f64) -> Option<f64> {
    let radius = adjusted_corner_radius(corner_radius, offset, tool_diameter);
    (radius > MIN_CORNER_RADIUS).then_some(radius)
}

/// Replace every vertex with its two arc tangent points.
///
/// For a clockwise polygon the returned ring alternates arc start and arc
/// end: the move from the first point of a pair to the second is the
/// corner arc, the move to the next pair is a straight edge.
pub fn add_corner_points(polygon: &Polygon, centre: Point2D, radius: f64) -> Result<Vec<Point2D>> {
    let mut points = Vec::with_capacity(polygon.len() * 2);

    for vertex in &polygon.vertices {
        let (x, y, r) = (vertex.x, vertex.y, radius);
        let (first, second) = match vertex.quadrant(&centre)? {
            Quadrant::BottomLeft => ((x + r, y), (x, y + r)),
            Quadrant::TopLeft => ((x, y - r), (x + r, y)),
            Quadrant::TopRight => ((x - r, y), (x, y - r)),
            Quadrant::BottomRight => ((x, y + r), (x - r, y)),
        };
        points.push(Point2D::from(first));
        points.push(Point2D::from(second));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_adjusted_radius() {
        assert_eq!(adjusted_corner_radius(5.0, OffsetKind::None, 6.0), 5.0);
        assert_eq!(adjusted_corner_radius(5.0, OffsetKind::Inside, 6.0), 2.0);
        assert_eq!(adjusted_corner_radius(5.0, OffsetKind::Outside, 6.0), 8.0);
    }

    #[test]
    fn test_active_radius_threshold() {
        assert_eq!(active_corner_radius(0.0, OffsetKind::None, 6.0), None);
        assert_eq!(active_corner_radius(0.09, OffsetKind::None, 6.0), None);
        assert_eq!(active_corner_radius(0.1, OffsetKind::None, 6.0), Some(0.1));
        // Radius smaller than the tool under an inside offset collapses.
        assert_eq!(active_corner_radius(2.0, OffsetKind::Inside, 6.0), None);
        assert_eq!(active_corner_radius(3.0, OffsetKind::Inside, 6.0), None);
        assert_eq!(active_corner_radius(0.0, OffsetKind::Outside, 6.0), Some(3.0));
    }

    #[test]
    fn test_tangent_points_per_quadrant() {
        let rect = Polygon::from(vec![(0.0, 0.0), (0.0, 10.0), (20.0, 10.0), (20.0, 0.0)]);
        let points = add_corner_points(&rect, Point2D::new(10.0, 5.0), 2.0).unwrap();
        assert_eq!(
            points,
            vec![
                Point2D::new(2.0, 0.0),
                Point2D::new(0.0, 2.0),
                Point2D::new(0.0, 8.0),
                Point2D::new(2.0, 10.0),
                Point2D::new(18.0, 10.0),
                Point2D::new(20.0, 8.0),
                Point2D::new(20.0, 2.0),
                Point2D::new(18.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_on_axis_vertex_fails() {
        let rect = Polygon::from(vec![(0.0, 5.0), (0.0, 10.0), (20.0, 10.0), (20.0, 0.0)]);
        let result = add_corner_points(&rect, Point2D::new(10.0, 5.0), 2.0);
        assert!(matches!(result, Err(ConvertError::VertexOnCentroidAxis { .. })));
    }
}
