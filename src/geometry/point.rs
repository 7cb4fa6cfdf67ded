//! 2D point and quadrant classification.

use crate::config::float_cmp::approx_eq;
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};

/// Point in the machine XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `dx`, `dy`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Classify this point relative to `centre`.
    ///
    /// Points lying on either centroid axis have no quadrant and are rejected.
    pub fn quadrant(&self, centre: &Point2D) -> Result<Quadrant> {
        if approx_eq(self.x, centre.x) || approx_eq(self.y, centre.y) {
            return Err(ConvertError::VertexOnCentroidAxis {
                x: self.x,
                y: self.y,
                cx: centre.x,
                cy: centre.y,
            });
        }

        let left = self.x < centre.x;
        let below = self.y < centre.y;
        Ok(match (left, below) {
            (true, true) => Quadrant::BottomLeft,
            (true, false) => Quadrant::TopLeft,
            (false, false) => Quadrant::TopRight,
            (false, true) => Quadrant::BottomRight,
        })
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Position of a vertex relative to the shape centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl Quadrant {
    /// Unit direction pointing away from the centre on each axis.
    pub fn outward(&self) -> (f64, f64) {
        match self {
            Quadrant::BottomLeft => (-1.0, -1.0),
            Quadrant::TopLeft => (-1.0, 1.0),
            Quadrant::TopRight => (1.0, 1.0),
            Quadrant::BottomRight => (1.0, -1.0),
        }
    }
}
