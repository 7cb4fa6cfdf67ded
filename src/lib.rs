//! ymd-gcode - Shape file to G-code conversion.
//!
//! This library turns a declarative rectangle description (a `.ymd` shape
//! file of `key: value` lines) into a G-code program for a CNC router,
//! handling tool offsets, rounded corners, multi-depth passes and
//! finishing stepovers.
//!
//! # Example
//!
//! ```no_run
//! use ymd_gcode_rs::{generate_program, parse_shape_file, ProgramSettings};
//! use std::path::Path;
//!
//! let config = parse_shape_file(Path::new("basic_rectangle.ymd")).unwrap();
//! let program = generate_program(&config, "basic_rectangle.nc", &ProgramSettings::default()).unwrap();
//! println!("{}", program);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod model;
pub mod parser;
pub mod toolpath;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::ProgramSettings;
pub use error::{ConvertError, ErrorCode, Result};
pub use generator::{emit_instructions, generate_program, render_program, Instruction};
pub use geometry::{Point2D, Polygon, Winding};
pub use model::{ArcDirection, CutDirection, MotionSegment, OffsetKind, ShapeConfig, ShapeKind};
pub use parser::{parse_shape_file, parse_shape_str};
pub use toolpath::{build_toolpath, plan_pass_depths, plan_stepovers, Toolpath};
pub use validation::{validate_shape_config, ValidationResult};

use std::path::{Path, PathBuf};

/// Name written in the program header: the input file name with `.nc`.
pub fn output_name_for(input_path: &Path) -> String {
    output_path_for(input_path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("output.nc")
        .to_string()
}

/// Default output path: the input path with the `.nc` extension.
pub fn output_path_for(input_path: &Path) -> PathBuf {
    input_path.with_extension(config::OUTPUT_EXTENSION)
}

/// Convert a shape file to a G-code program.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Parse the shape file
/// 2. Validate the description
/// 3. Build the toolpath
/// 4. Emit and render the program
///
/// Validation warnings are logged; validation errors abort before any
/// output is produced.
pub fn convert_shape_file(input_path: &Path, settings: &ProgramSettings) -> Result<String> {
    let config = parse_shape_file(input_path)?;
    config.check_vertex_count()?;

    let validation = validate_shape_config(&config);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    if !validation.passed {
        return Err(ConvertError::ValidationFailed {
            errors: validation.errors,
        });
    }

    generate_program(&config, &output_name_for(input_path), settings)
}
