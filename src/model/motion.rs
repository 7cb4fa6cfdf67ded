//! XY motion segments making up one contour.

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// Arc traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    /// Clockwise arc (G2).
    Clockwise = 2,
    /// Counter-clockwise arc (G3).
    CounterClockwise = 3,
}

impl ArcDirection {
    /// Motion word for this arc direction.
    pub fn gcode(&self) -> &'static str {
        match self {
            ArcDirection::Clockwise => "G2",
            ArcDirection::CounterClockwise => "G3",
        }
    }
}

/// Single move of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionSegment {
    /// Rapid traverse to a point.
    Rapid { to: Point2D },
    /// Straight feed move.
    Linear { to: Point2D, feedrate: Option<f64> },
    /// Radius-programmed arc ending at `to`.
    Arc {
        to: Point2D,
        radius: f64,
        direction: ArcDirection,
        feedrate: Option<f64>,
    },
}

impl MotionSegment {
    /// End point of the move.
    pub fn end(&self) -> Point2D {
        match self {
            MotionSegment::Rapid { to }
            | MotionSegment::Linear { to, .. }
            | MotionSegment::Arc { to, .. } => *to,
        }
    }

    pub fn is_rapid(&self) -> bool {
        matches!(self, MotionSegment::Rapid { .. })
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, MotionSegment::Linear { .. })
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, MotionSegment::Arc { .. })
    }

    /// Same move carrying the given feedrate. Rapids are unchanged.
    pub fn with_feedrate(self, rate: f64) -> Self {
        match self {
            MotionSegment::Rapid { .. } => self,
            MotionSegment::Linear { to, .. } => MotionSegment::Linear {
                to,
                feedrate: Some(rate),
            },
            MotionSegment::Arc {
                to,
                radius,
                direction,
                ..
            } => MotionSegment::Arc {
                to,
                radius,
                direction,
                feedrate: Some(rate),
            },
        }
    }
}
