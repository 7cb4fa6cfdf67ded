//! Shape file parser.

use super::fields::*;
use crate::error::{ConvertError, Result};
use crate::geometry::{Point2D, Polygon};
use crate::model::{CutDirection, OffsetKind, ShapeConfig, ShapeKind};
use std::path::Path;
use tracing::{debug, warn};

/// Values collected from a shape file before defaults are applied.
#[derive(Debug, Default)]
struct RawShape {
    datum_x: Option<f64>,
    datum_y: Option<f64>,
    shape: Option<ShapeKind>,
    corner_radius: Option<f64>,
    offset: Option<OffsetKind>,
    tool_diameter: Option<f64>,
    pass_depth: Option<f64>,
    material_thickness: Option<f64>,
    bottom_offset: Option<f64>,
    feedrate: Option<f64>,
    plungerate: Option<f64>,
    spindle_speed: Option<u32>,
    cut_direction: Option<CutDirection>,
    tabs: Option<bool>,
    finish_stepdown: Option<f64>,
    finish_passes: Option<u32>,
    finish_stepover: Option<f64>,
    points: Vec<Point2D>,
}

/// Shape file parser.
pub struct ShapeFileParser {
    /// File content as lines.
    lines: Vec<String>,
}

impl ShapeFileParser {
    /// Create a new parser from file content.
    pub fn new(content: &str) -> Self {
        let lines = content.lines().map(|s| s.to_string()).collect();
        Self { lines }
    }

    /// Parse the shape description.
    pub fn parse(&self) -> Result<ShapeConfig> {
        let mut raw = RawShape::default();

        for (idx, line) in self.lines.iter().enumerate() {
            let line_number = idx + 1;
            let line = line.trim().to_lowercase();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            let (key, value) = parse_key_value(&line).ok_or_else(|| ConvertError::ParseError {
                line: line_number,
                message: format!("expected 'key: value', got '{}'", line),
            })?;

            Self::apply_field(&mut raw, key, value, line_number)?;
        }

        debug!("Parsed {} point(s)", raw.points.len());
        Self::build(raw)
    }

    /// Store one recognized field; unknown keys are logged and skipped.
    fn apply_field(raw: &mut RawShape, key: &str, value: &str, line: usize) -> Result<()> {
        match key {
            "datum x" => raw.datum_x = Some(parse_float(value, line)?),
            "datum y" => raw.datum_y = Some(parse_float(value, line)?),
            "shape" => raw.shape = Some(value.parse()?),
            "corner radius" => raw.corner_radius = Some(parse_float(value, line)?),
            "offset" => raw.offset = Some(value.parse()?),
            "tool diameter" => raw.tool_diameter = Some(parse_float(value, line)?),
            "pass depth" => raw.pass_depth = Some(parse_float(value, line)?),
            "material thickness" => raw.material_thickness = Some(parse_float(value, line)?),
            "bottom offset" => raw.bottom_offset = Some(parse_float(value, line)?),
            "feedrate" => raw.feedrate = Some(parse_float(value, line)?),
            "plungerate" => raw.plungerate = Some(parse_float(value, line)?),
            "spindle speed" => raw.spindle_speed = Some(parse_uint(value, line)?),
            "cut direction" => raw.cut_direction = Some(CutDirection::from_keyword(value)),
            "tabs" => raw.tabs = Some(parse_flag(value)),
            "finish stepdown" => raw.finish_stepdown = Some(parse_float(value, line)?),
            "finish passes" => raw.finish_passes = Some(parse_uint(value, line)?),
            "finish stepover" => raw.finish_stepover = Some(parse_float(value, line)?),
            "point" => raw.points.push(parse_point(value, line)?),
            _ => warn!("Unknown key at line {}: {}", line, key),
        }
        Ok(())
    }

    /// Apply defaults and check required fields.
    fn build(raw: RawShape) -> Result<ShapeConfig> {
        let pass_depth = required(raw.pass_depth, "pass depth")?;

        Ok(ShapeConfig {
            datum_x: raw.datum_x.unwrap_or(0.0),
            datum_y: raw.datum_y.unwrap_or(0.0),
            shape: required(raw.shape, "shape")?,
            polygon: Polygon::new(raw.points),
            corner_radius: raw.corner_radius.unwrap_or(0.0),
            offset: raw.offset.unwrap_or_default(),
            tool_diameter: required(raw.tool_diameter, "tool diameter")?,
            pass_depth,
            material_thickness: required(raw.material_thickness, "material thickness")?,
            bottom_offset: raw.bottom_offset.unwrap_or(0.0),
            feedrate: required(raw.feedrate, "feedrate")?,
            plungerate: required(raw.plungerate, "plungerate")?,
            spindle_speed: required(raw.spindle_speed, "spindle speed")?,
            cut_direction: raw.cut_direction.unwrap_or_default(),
            tabs: raw.tabs.unwrap_or(false),
            finish_stepdown: raw.finish_stepdown.unwrap_or(pass_depth),
            finish_passes: raw.finish_passes.unwrap_or(0),
            finish_stepover: raw.finish_stepover.unwrap_or(0.0),
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ConvertError::MissingField {
        field: field.to_string(),
    })
}

/// Parse shape file content.
pub fn parse_shape_str(content: &str) -> Result<ShapeConfig> {
    ShapeFileParser::new(content).parse()
}

/// Parse a shape file from disk.
pub fn parse_shape_file(path: &Path) -> Result<ShapeConfig> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ConvertError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_shape_str(&content)
}
