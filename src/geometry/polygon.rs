//! Closed polygon contour.

use super::Point2D;
use crate::config::EPS;
use serde::{Deserialize, Serialize};

/// Winding order of a polygon with Y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero signed area (collinear or coincident vertices).
    Degenerate,
}

/// Ordered vertex list, implicitly closed back to the first vertex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point2D>,
}

impl Polygon {
    /// Create a polygon from its vertices (without the closing vertex).
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Number of distinct vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Edge accumulator: sum of (x2 - x1) * (y2 + y1) over all edges,
    /// including the wraparound edge. Positive means clockwise.
    pub fn orientation_sum(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                (b.x - a.x) * (b.y + a.y)
            })
            .sum()
    }

    /// Width and height of the bounding box.
    pub fn extents(&self) -> (f64, f64) {
        let Some(first) = self.vertices.first() else {
            return (0.0, 0.0);
        };
        let (mut min, mut max) = (*first, *first);
        for p in &self.vertices[1..] {
            min = Point2D::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2D::new(max.x.max(p.x), max.y.max(p.y));
        }
        (max.x - min.x, max.y - min.y)
    }

    /// Classify the winding order.
    ///
    /// The accumulator scales with area, so the zero tolerance is taken
    /// relative to the squared bounding-box extent.
    pub fn winding(&self) -> Winding {
        let total = self.orientation_sum();
        let (width, height) = self.extents();
        let extent = width.max(height);
        if total.abs() <= EPS * extent * extent {
            Winding::Degenerate
        } else if total > 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// Reverse the traversal direction, keeping the first vertex first.
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        if !vertices.is_empty() {
            vertices.rotate_right(1);
        }
        Self { vertices }
    }

    /// Shift every vertex by the datum.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p.translated(dx, dy)).collect(),
        }
    }

}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points.into_iter().map(Point2D::from).collect())
    }
}
