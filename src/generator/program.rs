//! Complete program assembly.

use super::{emit_instructions, GcodeWriter, Instruction};
use crate::config::ProgramSettings;
use crate::error::Result;
use crate::model::ShapeConfig;
use crate::toolpath::build_toolpath;
use tracing::debug;

/// Render the fixed program template around the instruction body.
///
/// ```text
/// (<output_name>)
/// M3 S<spindle_speed>
/// G0 <safe_start_position>
///
/// <cutting body>
/// (End)
/// G0 Z<z_safe_distance>
/// M5
/// ```
///
/// Every pass in the body is followed by a blank line.
pub fn render_program(
    output_name: &str,
    spindle_speed: u32,
    instructions: &[Instruction],
    settings: &ProgramSettings,
) -> String {
    let mut writer = GcodeWriter::new();

    writer.write_comment(output_name);
    writer.spindle_on(spindle_speed);
    writer.rapid_to(&settings.safe_start_position);
    writer.write_blank();

    for (i, instruction) in instructions.iter().enumerate() {
        if i > 0 && instruction.is_pass_marker() {
            writer.write_blank();
        }
        writer.write_instruction(instruction);
    }
    if !instructions.is_empty() {
        writer.write_blank();
    }

    writer.write_blank();
    writer.write_comment("End");
    writer.rapid_z(settings.z_safe_distance);
    writer.spindle_off();

    debug!("Rendered {} lines", writer.line_count());
    writer.take_output()
}

/// Run the full pipeline for one shape and return the program text.
///
/// Nothing is rendered unless every stage succeeds.
pub fn generate_program(
    config: &ShapeConfig,
    output_name: &str,
    settings: &ProgramSettings,
) -> Result<String> {
    let toolpath = build_toolpath(config)?;
    let instructions = emit_instructions(&toolpath, config.plungerate, settings);
    debug!(
        "{} stepover(s), {} pass(es), {} instruction(s)",
        toolpath.stepovers.len(),
        toolpath.pass_count(),
        instructions.len()
    );

    Ok(render_program(
        output_name,
        config.spindle_speed,
        &instructions,
        settings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::model::OffsetKind;
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

    #[test]
    fn test_empty_body_template() {
        let program = render_program("empty.nc", 12000, &[], &ProgramSettings::default());
        assert_eq!(
            program,
            "(empty.nc)\nM3 S12000\nG0 X0 Y0 Z10\n\n\n(End)\nG0 Z5\nM5\n"
        );
    }

    #[test]
    fn test_square_program() {
        let program =
            generate_program(&square_config(), "square.nc", &ProgramSettings::default()).unwrap();

        let pass = |depth: &str| {
            format!(
                "(Offset: none)\n(New pass)\nG0 X0 Y0\nG1 Z-{depth} F300\nG1 X1 Y0 F1000\n\
                 G1 X1 Y1\nG1 X0 Y1\nG1 X0 Y0\nG1 Z5 F300\n"
            )
        };
        let expected = format!(
            "(square.nc)\nM3 S18000\nG0 X0 Y0 Z10\n\n{}\n{}\n\n(End)\nG0 Z5\nM5\n",
            pass("2"),
            pass("4")
        );
        assert_eq!(program, expected);
    }

    #[test]
    fn test_program_is_deterministic() {
        let config = ShapeConfig {
            offset: OffsetKind::Outside,
            corner_radius: 0.5,
            finish_passes: 1,
            finish_stepover: 0.1,
            finish_stepdown: 4.0,
            ..square_config()
        };
        let settings = ProgramSettings::default();
        let first = generate_program(&config, "a.nc", &settings).unwrap();
        let second = generate_program(&config, "a.nc", &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_output_on_failure() {
        let mut config = square_config();
        config.polygon.vertices.truncate(2);
        assert!(generate_program(&config, "bad.nc", &ProgramSettings::default()).is_err());
    }
}
