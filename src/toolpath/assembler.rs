//! Per-stepover toolpath assembly.

use super::{effective_tool_diameter, plan_pass_depths, plan_stepovers};
use crate::config::EPS;
use crate::error::{ConvertError, Result};
use crate::geometry::{Point2D, Polygon, Winding};
use crate::model::{ArcDirection, MotionSegment, OffsetKind, ShapeConfig};
use crate::transform::{
    active_corner_radius, add_corner_points, apply_offset, find_centre, normalize_winding,
};
use serde::Serialize;
use tracing::debug;

/// Contour and depths for one finishing allowance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepoverToolpath {
    /// Material left on the wall by this contour.
    pub stepover: f64,
    /// Tool diameter used for the offset, including the allowance.
    pub tool_diameter: f64,
    /// Z increment between passes.
    pub pass_depth: f64,
    /// Plunge depths, shallowest first.
    pub depths: Vec<f64>,
    /// Corner radius when corners are rounded.
    pub corner_radius: Option<f64>,
    pub arc_direction: ArcDirection,
    /// Rapid approach to the start point followed by the cutting moves.
    pub contour: Vec<MotionSegment>,
}

impl StepoverToolpath {
    /// Point the contour starts and ends at.
    pub fn start_point(&self) -> Option<Point2D> {
        self.contour.first().map(|segment| segment.end())
    }

    /// Moves after the rapid approach.
    pub fn cutting_moves(&self) -> &[MotionSegment] {
        self.contour.get(1..).unwrap_or_default()
    }
}

/// All contours for a shape, in cutting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolpath {
    pub offset: OffsetKind,
    pub stepovers: Vec<StepoverToolpath>,
}

impl Toolpath {
    /// Total number of Z passes over all stepovers.
    pub fn pass_count(&self) -> usize {
        self.stepovers.iter().map(|s| s.depths.len()).sum()
    }
}

/// Builds the toolpath for one shape.
pub struct ToolpathAssembler<'a> {
    config: &'a ShapeConfig,
    /// Datum-translated polygon, wound clockwise.
    polygon: Polygon,
    centre: Point2D,
}

impl<'a> ToolpathAssembler<'a> {
    /// Check preconditions and prepare the clockwise, datum-shifted polygon.
    pub fn new(config: &'a ShapeConfig) -> Result<Self> {
        check_parameters(config)?;

        let translated = config.polygon.translated(config.datum_x, config.datum_y);
        let polygon = normalize_winding(&translated, true)?;
        let centre = find_centre(&config.polygon, config.datum());
        debug!(
            "Shape centre ({}, {}), {} vertices",
            centre.x,
            centre.y,
            polygon.len()
        );

        Ok(Self {
            config,
            polygon,
            centre,
        })
    }

    /// Shape centre in machine coordinates.
    pub fn centre(&self) -> Point2D {
        self.centre
    }

    /// Clockwise polygon in machine coordinates.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Build every stepover contour.
    pub fn assemble(&self) -> Result<Toolpath> {
        let stepovers = plan_stepovers(self.config.finish_passes, self.config.finish_stepover);
        let last = stepovers.len() - 1;

        let stepovers = stepovers
            .iter()
            .enumerate()
            .map(|(i, &stepover)| self.assemble_stepover(stepover, i == last))
            .collect::<Result<Vec<_>>>()?;

        Ok(Toolpath {
            offset: self.config.offset,
            stepovers,
        })
    }

    /// Build the contour for a single allowance.
    pub fn assemble_stepover(&self, stepover: f64, is_final: bool) -> Result<StepoverToolpath> {
        let config = self.config;
        let tool_diameter = effective_tool_diameter(config.tool_diameter, stepover);
        let pass_depth = if is_final {
            config.pass_depth
        } else {
            config.finish_stepdown
        };

        let offset_polygon = apply_offset(&self.polygon, config.offset, tool_diameter, self.centre)?;
        if offset_polygon.winding() != Winding::Clockwise {
            return Err(ConvertError::invalid_parameter(
                "tool diameter",
                format!(
                    "{} collapses the {} offset of the shape",
                    tool_diameter, config.offset
                ),
            ));
        }

        let corner_radius = active_corner_radius(config.corner_radius, config.offset, tool_diameter);
        if let Some(radius) = corner_radius {
            let (width, height) = offset_polygon.extents();
            if 2.0 * radius > width.min(height) + EPS {
                return Err(ConvertError::invalid_parameter(
                    "corner radius",
                    format!(
                        "{} does not fit the {} x {} contour",
                        radius, width, height
                    ),
                ));
            }
        }
        let ring = match corner_radius {
            Some(radius) => add_corner_points(&offset_polygon, self.centre, radius)?,
            None => offset_polygon.vertices,
        };

        let depths = plan_pass_depths(config.total_cut_depth(), pass_depth)?;

        let clockwise = config.is_clockwise_cutting();
        let arc_direction = if clockwise {
            ArcDirection::Clockwise
        } else {
            ArcDirection::CounterClockwise
        };

        let contour = build_contour(ring, corner_radius, clockwise, arc_direction, config.feedrate);

        debug!(
            "Stepover {}: tool {}, corner radius {:?}, {} passes, {:?}",
            stepover,
            tool_diameter,
            corner_radius,
            depths.len(),
            arc_direction
        );

        Ok(StepoverToolpath {
            stepover,
            tool_diameter,
            pass_depth,
            depths,
            corner_radius,
            arc_direction,
            contour,
        })
    }
}

/// Build the toolpath for a shape.
pub fn build_toolpath(config: &ShapeConfig) -> Result<Toolpath> {
    ToolpathAssembler::new(config)?.assemble()
}

/// Parameter checks the geometry depends on.
fn check_parameters(config: &ShapeConfig) -> Result<()> {
    config.check_vertex_count()?;

    let rates = [("feedrate", config.feedrate), ("plungerate", config.plungerate)];
    for (name, value) in rates {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConvertError::invalid_parameter(
                name,
                format!("must be a positive number, got {}", value),
            ));
        }
    }
    if let Some(p) = config
        .polygon
        .vertices
        .iter()
        .find(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(ConvertError::invalid_parameter(
            "point",
            format!("({}, {}) is not finite", p.x, p.y),
        ));
    }

    if config.tool_diameter <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "tool diameter",
            format!("must be positive, got {}", config.tool_diameter),
        ));
    }
    if config.pass_depth <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "pass depth",
            format!("must be positive, got {}", config.pass_depth),
        ));
    }
    if config.total_cut_depth() <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "bottom offset",
            format!(
                "leaves nothing to cut ({} thick, {} bottom offset)",
                config.material_thickness, config.bottom_offset
            ),
        ));
    }
    if config.finish_passes > 0 && config.finish_stepdown <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "finish stepdown",
            format!("must be positive, got {}", config.finish_stepdown),
        ));
    }
    if config.finish_stepover < 0.0 {
        return Err(ConvertError::invalid_parameter(
            "finish stepover",
            format!("must not be negative, got {}", config.finish_stepover),
        ));
    }
    if config.corner_radius < 0.0 {
        return Err(ConvertError::invalid_parameter(
            "corner radius",
            format!("must not be negative, got {}", config.corner_radius),
        ));
    }

    Ok(())
}

/// Turn a clockwise point ring into motion segments.
///
/// With rounded corners the ring holds tangent pairs and every odd move is
/// an arc. Counter-clockwise traversal reverses the ring and rotates it so
/// the first move is still the arc around the starting corner. The contour
/// closes back on its start point and the first cutting move carries the
/// feedrate.
fn build_contour(
    mut ring: Vec<Point2D>,
    corner_radius: Option<f64>,
    clockwise: bool,
    arc_direction: ArcDirection,
    feedrate: f64,
) -> Vec<MotionSegment> {
    let stride = if corner_radius.is_some() { 2 } else { 1 };
    if !clockwise {
        let shift = stride.min(ring.len());
        ring.reverse();
        ring.rotate_right(shift);
    }

    let Some(&start) = ring.first() else {
        return Vec::new();
    };

    let mut contour = Vec::with_capacity(ring.len() + 1);
    contour.push(MotionSegment::Rapid { to: start });

    for (index, &to) in ring.iter().skip(1).chain(std::iter::once(&start)).enumerate() {
        let move_number = index + 1;
        let segment = match corner_radius {
            Some(radius) if move_number % 2 == 1 => MotionSegment::Arc {
                to,
                radius,
                direction: arc_direction,
                feedrate: None,
            },
            _ => MotionSegment::Linear { to, feedrate: None },
        };

        contour.push(if move_number == 1 {
            segment.with_feedrate(feedrate)
        } else {
            segment
        });
    }

    contour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CutDirection;
    use pretty_assertions::assert_eq;

    fn square_config() -> ShapeConfig {
        ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
            tool_diameter: 3.0,
            pass_depth: 2.0,
            material_thickness: 4.0,
            feedrate: 1000.0,
            plungerate: 300.0,
            spindle_speed: 18000,
            ..Default::default()
        }
    }

    fn plate_config() -> ShapeConfig {
        ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (0.0, 50.0), (100.0, 50.0), (100.0, 0.0)]),
            tool_diameter: 6.0,
            pass_depth: 3.0,
            material_thickness: 6.0,
            feedrate: 1200.0,
            plungerate: 400.0,
            spindle_speed: 16000,
            ..Default::default()
        }
    }

    fn points(contour: &[MotionSegment]) -> Vec<(f64, f64)> {
        contour.iter().map(|s| (s.end().x, s.end().y)).collect()
    }

    #[test]
    fn test_unit_square_on_line() {
        let toolpath = build_toolpath(&square_config()).unwrap();
        assert_eq!(toolpath.stepovers.len(), 1);

        let stepover = &toolpath.stepovers[0];
        assert_eq!(stepover.depths, vec![2.0, 4.0]);
        assert_eq!(stepover.corner_radius, None);
        assert_eq!(stepover.arc_direction, ArcDirection::CounterClockwise);
        assert!(stepover.contour[0].is_rapid());
        assert_eq!(stepover.cutting_moves().len(), 4);
        assert!(stepover.cutting_moves().iter().all(|s| s.is_linear()));
        // Conventional on-line cutting runs counter-clockwise.
        assert_eq!(
            points(&stepover.contour),
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_first_cutting_move_carries_feedrate() {
        let toolpath = build_toolpath(&square_config()).unwrap();
        let moves = toolpath.stepovers[0].cutting_moves();
        assert_eq!(
            moves[0],
            MotionSegment::Linear {
                to: Point2D::new(1.0, 0.0),
                feedrate: Some(1000.0)
            }
        );
        assert!(moves[1..]
            .iter()
            .all(|m| matches!(m, MotionSegment::Linear { feedrate: None, .. })));
    }

    #[test]
    fn test_datum_translation_on_line() {
        let config = ShapeConfig {
            datum_x: 10.0,
            datum_y: 20.0,
            cut_direction: CutDirection::Climb,
            offset: OffsetKind::Outside,
            tool_diameter: 2.0,
            ..square_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        // Climb + outside cuts clockwise; sharp corners grow to the tool radius.
        assert_eq!(stepover.arc_direction, ArcDirection::Clockwise);
        assert_eq!(stepover.corner_radius, Some(1.0));
        assert_eq!(
            points(&stepover.contour),
            vec![
                (10.0, 19.0),
                (9.0, 20.0),
                (9.0, 21.0),
                (10.0, 22.0),
                (11.0, 22.0),
                (12.0, 21.0),
                (12.0, 20.0),
                (11.0, 19.0),
                (10.0, 19.0),
            ]
        );
    }

    #[test]
    fn test_datum_translation_identity_offset() {
        let config = ShapeConfig {
            datum_x: 10.0,
            datum_y: 20.0,
            ..square_config()
        };
        let assembler = ToolpathAssembler::new(&config).unwrap();
        assert_eq!(assembler.centre(), Point2D::new(10.5, 20.5));

        let expected = config.polygon.translated(10.0, 20.0);
        assert_eq!(
            apply_offset(assembler.polygon(), OffsetKind::None, 3.0, assembler.centre()).unwrap(),
            expected
        );
    }

    #[test]
    fn test_inside_offset_clockwise_for_conventional() {
        let config = ShapeConfig {
            offset: OffsetKind::Inside,
            ..plate_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(stepover.arc_direction, ArcDirection::Clockwise);
        assert_eq!(
            points(&stepover.contour),
            vec![(3.0, 3.0), (3.0, 47.0), (97.0, 47.0), (97.0, 3.0), (3.0, 3.0)]
        );
    }

    #[test]
    fn test_rounded_corners_clockwise() {
        let config = ShapeConfig {
            offset: OffsetKind::Inside,
            corner_radius: 5.0,
            ..plate_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(stepover.corner_radius, Some(2.0));
        assert_eq!(stepover.contour.len(), 9);
        assert_eq!(
            points(&stepover.contour),
            vec![
                (5.0, 3.0),
                (3.0, 5.0),
                (3.0, 45.0),
                (5.0, 47.0),
                (95.0, 47.0),
                (97.0, 45.0),
                (97.0, 5.0),
                (95.0, 3.0),
                (5.0, 3.0),
            ]
        );
        for (i, segment) in stepover.cutting_moves().iter().enumerate() {
            if i % 2 == 0 {
                assert!(
                    matches!(segment, MotionSegment::Arc { radius, direction: ArcDirection::Clockwise, .. } if *radius == 2.0)
                );
            } else {
                assert!(segment.is_linear());
            }
        }
        assert!(matches!(
            stepover.cutting_moves()[0],
            MotionSegment::Arc {
                feedrate: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_rounded_corners_counter_clockwise() {
        let config = ShapeConfig {
            corner_radius: 5.0,
            ..plate_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(stepover.arc_direction, ArcDirection::CounterClockwise);
        assert_eq!(
            points(&stepover.contour),
            vec![
                (0.0, 5.0),
                (5.0, 0.0),
                (95.0, 0.0),
                (100.0, 5.0),
                (100.0, 45.0),
                (95.0, 50.0),
                (5.0, 50.0),
                (0.0, 45.0),
                (0.0, 5.0),
            ]
        );
        assert!(stepover.cutting_moves()[0].is_arc());
        assert!(stepover.cutting_moves()[1].is_linear());
    }

    #[test]
    fn test_collapsed_radius_falls_back_to_lines() {
        let config = ShapeConfig {
            offset: OffsetKind::Inside,
            corner_radius: 2.0,
            ..plate_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(stepover.corner_radius, None);
        assert_eq!(stepover.cutting_moves().len(), 4);
    }

    #[test]
    fn test_counter_clockwise_input_normalized() {
        let config = ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)]),
            offset: OffsetKind::Inside,
            ..plate_config()
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(
            points(&stepover.contour),
            vec![(3.0, 3.0), (3.0, 47.0), (97.0, 47.0), (97.0, 3.0), (3.0, 3.0)]
        );
    }

    #[test]
    fn test_finishing_stepovers() {
        let config = ShapeConfig {
            offset: OffsetKind::Inside,
            finish_passes: 2,
            finish_stepover: 0.5,
            finish_stepdown: 6.0,
            ..plate_config()
        };
        let toolpath = build_toolpath(&config).unwrap();
        let stepovers: Vec<f64> = toolpath.stepovers.iter().map(|s| s.stepover).collect();
        assert_eq!(stepovers, vec![1.0, 0.5, 0.0]);

        let diameters: Vec<f64> = toolpath.stepovers.iter().map(|s| s.tool_diameter).collect();
        assert_eq!(diameters, vec![8.0, 7.0, 6.0]);

        // Allowance passes use the finish stepdown, the final pass the pass depth.
        assert_eq!(toolpath.stepovers[0].depths, vec![6.0]);
        assert_eq!(toolpath.stepovers[1].depths, vec![6.0]);
        assert_eq!(toolpath.stepovers[2].depths, vec![3.0, 6.0]);
        assert_eq!(toolpath.pass_count(), 4);

        assert_eq!(toolpath.stepovers[0].start_point(), Some(Point2D::new(4.0, 4.0)));
        assert_eq!(toolpath.stepovers[2].start_point(), Some(Point2D::new(3.0, 3.0)));
    }

    #[test]
    fn test_invalid_vertex_count() {
        let mut config = plate_config();
        config.polygon.vertices.pop();
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidVertexCount {
                expected: 4,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_degenerate_polygon() {
        let config = ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]),
            ..plate_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::DegeneratePolygon)
        ));
    }

    #[test]
    fn test_tool_too_large_for_inside_offset() {
        let config = ShapeConfig {
            offset: OffsetKind::Inside,
            tool_diameter: 60.0,
            ..plate_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_corner_radius_too_large_for_contour() {
        let config = ShapeConfig {
            polygon: Polygon::from(vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]),
            corner_radius: 8.0,
            ..square_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidParameter { name, .. }) if name == "corner radius"
        ));

        // Half the shorter side is the largest radius that still fits.
        let config = ShapeConfig {
            corner_radius: 5.0,
            ..config
        };
        let stepover = build_toolpath(&config).unwrap().stepovers.remove(0);
        assert_eq!(stepover.corner_radius, Some(5.0));
    }

    #[test]
    fn test_non_finite_rates_rejected() {
        let config = ShapeConfig {
            feedrate: f64::NAN,
            ..square_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidParameter { name, .. }) if name == "feedrate"
        ));

        let config = ShapeConfig {
            plungerate: f64::INFINITY,
            ..square_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidParameter { name, .. }) if name == "plungerate"
        ));
    }

    #[test]
    fn test_missing_finish_stepdown() {
        let config = ShapeConfig {
            finish_passes: 1,
            finish_stepover: 0.2,
            finish_stepdown: 0.0,
            ..plate_config()
        };
        assert!(matches!(
            build_toolpath(&config),
            Err(ConvertError::InvalidParameter { name, .. }) if name == "finish stepdown"
        ));
    }
}
