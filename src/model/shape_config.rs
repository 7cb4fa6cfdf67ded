//! Declarative shape description read from a shape file.

use crate::error::{ConvertError, Result};
use crate::geometry::{Point2D, Polygon};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
}

impl ShapeKind {
    /// Number of vertices the shape must be described with.
    pub fn vertex_count(&self) -> usize {
        match self {
            ShapeKind::Rectangle => 4,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rectangle" => Ok(ShapeKind::Rectangle),
            other => Err(ConvertError::UnsupportedShape {
                shape: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Rectangle => write!(f, "rectangle"),
        }
    }
}

/// Where the tool path runs relative to the drawn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OffsetKind {
    /// Tool centre follows the line.
    #[default]
    None,
    /// Tool path shifted into the shape by the tool radius.
    Inside,
    /// Tool path shifted out of the shape by the tool radius.
    Outside,
}

impl OffsetKind {
    /// Signed adjustment applied to the corner radius for this offset.
    pub fn corner_radius_delta(&self, tool_diameter: f64) -> f64 {
        let tool_radius = tool_diameter / 2.0;
        match self {
            OffsetKind::None => 0.0,
            OffsetKind::Inside => -tool_radius,
            OffsetKind::Outside => tool_radius,
        }
    }
}

impl FromStr for OffsetKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(OffsetKind::None),
            "inside" => Ok(OffsetKind::Inside),
            "outside" => Ok(OffsetKind::Outside),
            other => Err(ConvertError::InvalidOffsetKind {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OffsetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OffsetKind::None => write!(f, "none"),
            OffsetKind::Inside => write!(f, "inside"),
            OffsetKind::Outside => write!(f, "outside"),
        }
    }
}

/// Milling direction relative to tool rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CutDirection {
    Climb,
    #[default]
    Conventional,
}

impl CutDirection {
    /// `climb` selects climb milling, anything else conventional.
    pub fn from_keyword(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("climb") {
            CutDirection::Climb
        } else {
            CutDirection::Conventional
        }
    }
}

/// Complete description of one shape to cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Datum X offset added to every vertex.
    pub datum_x: f64,
    /// Datum Y offset added to every vertex.
    pub datum_y: f64,
    pub shape: ShapeKind,
    /// Vertices as drawn, relative to the datum.
    pub polygon: Polygon,
    pub corner_radius: f64,
    pub offset: OffsetKind,
    pub tool_diameter: f64,
    /// Z increment per pass on the final finishing stepover.
    pub pass_depth: f64,
    pub material_thickness: f64,
    /// Material left uncut below the toolpath.
    pub bottom_offset: f64,
    pub feedrate: f64,
    pub plungerate: f64,
    pub spindle_speed: u32,
    pub cut_direction: CutDirection,
    pub tabs: bool,
    /// Z increment per pass on stepovers that leave a finishing allowance.
    pub finish_stepdown: f64,
    pub finish_passes: u32,
    pub finish_stepover: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            datum_x: 0.0,
            datum_y: 0.0,
            shape: ShapeKind::Rectangle,
            polygon: Polygon::default(),
            corner_radius: 0.0,
            offset: OffsetKind::None,
            tool_diameter: 0.0,
            pass_depth: 0.0,
            material_thickness: 0.0,
            bottom_offset: 0.0,
            feedrate: 0.0,
            plungerate: 0.0,
            spindle_speed: 0,
            cut_direction: CutDirection::Conventional,
            tabs: false,
            finish_stepdown: 0.0,
            finish_passes: 0,
            finish_stepover: 0.0,
        }
    }
}

impl ShapeConfig {
    /// Depth the final pass reaches.
    pub fn total_cut_depth(&self) -> f64 {
        self.material_thickness - self.bottom_offset
    }

    /// Datum as a point.
    pub fn datum(&self) -> Point2D {
        Point2D::new(self.datum_x, self.datum_y)
    }

    /// True when the tool should travel clockwise around the shape.
    pub fn is_clockwise_cutting(&self) -> bool {
        matches!(
            (self.cut_direction, self.offset),
            (CutDirection::Climb, OffsetKind::Outside)
                | (CutDirection::Conventional, OffsetKind::Inside)
        )
    }

    /// Check the vertex count matches the shape kind.
    pub fn check_vertex_count(&self) -> Result<()> {
        let expected = self.shape.vertex_count();
        if self.polygon.len() != expected {
            return Err(ConvertError::InvalidVertexCount {
                shape: self.shape.to_string(),
                expected,
                found: self.polygon.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_kind_parse() {
        assert_eq!("none".parse::<OffsetKind>().unwrap(), OffsetKind::None);
        assert_eq!(" Inside ".parse::<OffsetKind>().unwrap(), OffsetKind::Inside);
        assert_eq!("outside".parse::<OffsetKind>().unwrap(), OffsetKind::Outside);

        let err = "online".parse::<OffsetKind>().unwrap_err();
        assert!(matches!(err, ConvertError::InvalidOffsetKind { value } if value == "online"));
    }

    #[test]
    fn test_shape_kind_parse() {
        assert_eq!(
            "Rectangle".parse::<ShapeKind>().unwrap(),
            ShapeKind::Rectangle
        );
        assert!(matches!(
            "circle".parse::<ShapeKind>(),
            Err(ConvertError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_corner_radius_delta() {
        assert_eq!(OffsetKind::None.corner_radius_delta(6.0), 0.0);
        assert_eq!(OffsetKind::Inside.corner_radius_delta(6.0), -3.0);
        assert_eq!(OffsetKind::Outside.corner_radius_delta(6.0), 3.0);
    }

    #[test]
    fn test_clockwise_cutting_rule() {
        let mut config = ShapeConfig::default();
        let cases = [
            (CutDirection::Climb, OffsetKind::Outside, true),
            (CutDirection::Climb, OffsetKind::Inside, false),
            (CutDirection::Climb, OffsetKind::None, false),
            (CutDirection::Conventional, OffsetKind::Inside, true),
            (CutDirection::Conventional, OffsetKind::Outside, false),
            (CutDirection::Conventional, OffsetKind::None, false),
        ];
        for (direction, offset, expected) in cases {
            config.cut_direction = direction;
            config.offset = offset;
            assert_eq!(config.is_clockwise_cutting(), expected, "{direction:?} {offset:?}");
        }
    }

    #[test]
    fn test_total_cut_depth() {
        let config = ShapeConfig {
            material_thickness: 18.0,
            bottom_offset: 0.5,
            ..Default::default()
        };
        assert_eq!(config.total_cut_depth(), 17.5);
    }

    #[test]
    fn test_vertex_count_check() {
        let mut config = ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
            ..Default::default()
        };
        assert!(matches!(
            config.check_vertex_count(),
            Err(ConvertError::InvalidVertexCount { found: 3, .. })
        ));

        config.polygon.vertices.push(Point2D::new(1.0, 0.0));
        assert!(config.check_vertex_count().is_ok());
    }

    #[test]
    fn test_cut_direction_keyword() {
        assert_eq!(CutDirection::from_keyword("climb"), CutDirection::Climb);
        assert_eq!(
            CutDirection::from_keyword("conventional"),
            CutDirection::Conventional
        );
        assert_eq!(CutDirection::from_keyword("other"), CutDirection::Conventional);
    }
}
