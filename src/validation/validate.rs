//! Validation logic for shape descriptions.

use crate::config::{EPS, MIN_CORNER_RADIUS};
use crate::model::{OffsetKind, ShapeConfig};
use crate::transform::adjusted_corner_radius;

/// Outcome of checking a shape description: errors block generation, warnings do not.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// False once any error is recorded.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Result with no findings.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Result holding a single error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Fold the findings of a sub-check into this result.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a shape description before toolpath generation.
pub fn validate_shape_config(config: &ShapeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    result.merge(validate_finite(config));
    result.merge(validate_geometry(config));
    result.merge(validate_cutting(config));
    result.merge(validate_finishing(config));
    result
}

fn validate_finite(config: &ShapeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let fields = [
        ("Datum X", config.datum_x),
        ("Datum Y", config.datum_y),
        ("Corner radius", config.corner_radius),
        ("Tool diameter", config.tool_diameter),
        ("Pass depth", config.pass_depth),
        ("Material thickness", config.material_thickness),
        ("Bottom offset", config.bottom_offset),
        ("Feedrate", config.feedrate),
        ("Plungerate", config.plungerate),
        ("Finish stepdown", config.finish_stepdown),
        ("Finish stepover", config.finish_stepover),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            result.add_error(format!("{} is not a finite number ({})", name, value));
        }
    }

    if let Some(p) = config
        .polygon
        .vertices
        .iter()
        .find(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        result.add_error(format!("Point ({}, {}) is not finite", p.x, p.y));
    }

    result
}

fn validate_geometry(config: &ShapeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    let expected = config.shape.vertex_count();
    if config.polygon.len() != expected {
        result.add_error(format!(
            "A {} needs {} points, got {}",
            config.shape,
            expected,
            config.polygon.len()
        ));
    }

    let (width, height) = config.polygon.extents();
    let max_radius = width.min(height) / 2.0;

    if config.corner_radius < 0.0 {
        result.add_error(format!(
            "Corner radius must not be negative ({})",
            config.corner_radius
        ));
    } else if config.corner_radius > max_radius + EPS {
        result.add_error(format!(
            "Corner radius {} exceeds half the shorter side ({})",
            config.corner_radius, max_radius
        ));
    } else if config.corner_radius > MIN_CORNER_RADIUS && config.offset == OffsetKind::Inside {
        let adjusted =
            adjusted_corner_radius(config.corner_radius, config.offset, config.tool_diameter);
        if adjusted <= MIN_CORNER_RADIUS {
            result.add_warning(format!(
                "Corner radius {} is not larger than the tool radius; corners will be cut sharp",
                config.corner_radius
            ));
        }
    }

    result
}

fn validate_cutting(config: &ShapeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if config.tool_diameter <= 0.0 {
        result.add_error(format!(
            "Tool diameter must be positive ({})",
            config.tool_diameter
        ));
    }

    if config.pass_depth <= 0.0 {
        result.add_error(format!("Pass depth must be positive ({})", config.pass_depth));
    }

    if config.total_cut_depth() <= 0.0 {
        result.add_error(format!(
            "Nothing to cut: material thickness {} with bottom offset {}",
            config.material_thickness, config.bottom_offset
        ));
    }

    if config.bottom_offset < 0.0 {
        result.add_warning(format!(
            "Negative bottom offset {} cuts below the material",
            config.bottom_offset
        ));
    }

    if config.feedrate <= 0.0 {
        result.add_error(format!("Feedrate must be positive ({})", config.feedrate));
    }

    if config.plungerate <= 0.0 {
        result.add_error(format!(
            "Plungerate must be positive ({})",
            config.plungerate
        ));
    }

    if config.spindle_speed == 0 {
        result.add_warning("Spindle speed is zero");
    }

    if config.tabs {
        result.add_warning("Tabs are not supported and will not be generated");
    }

    result
}

fn validate_finishing(config: &ShapeConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if config.finish_stepover < 0.0 {
        result.add_error(format!(
            "Finish stepover must not be negative ({})",
            config.finish_stepover
        ));
    }

    if config.finish_passes > 0 {
        if config.finish_stepdown <= 0.0 {
            result.add_error(format!(
                "Finish stepdown must be positive ({})",
                config.finish_stepdown
            ));
        }
        if config.finish_stepover == 0.0 {
            result.add_warning(format!(
                "{} finishing pass(es) with zero stepover repeat the final contour",
                config.finish_passes
            ));
        }
    }

    result
}
