//! Structured program instructions and the per-pass emitter.

use super::gcode::format_coord;
use crate::config::ProgramSettings;
use crate::geometry::Point2D;
use crate::model::{ArcDirection, MotionSegment, OffsetKind};
use crate::toolpath::{StepoverToolpath, Toolpath};
use serde::Serialize;
use std::fmt;

/// One unit of the program body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Instruction {
    /// Comment block opening a Z pass.
    PassMarker { offset: OffsetKind },
    /// Rapid positioning (G0) in XY.
    Rapid { to: Point2D },
    /// Linear feed (G1); absent words are not written.
    Linear {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        feedrate: Option<f64>,
    },
    /// Radius arc (G2/G3).
    Arc {
        direction: ArcDirection,
        to: Point2D,
        radius: f64,
        feedrate: Option<f64>,
    },
}

impl Instruction {
    /// Z-only feed down to `depth` below the surface.
    pub fn plunge(depth: f64, plungerate: f64) -> Self {
        Instruction::Linear {
            x: None,
            y: None,
            z: Some(-depth),
            feedrate: Some(plungerate),
        }
    }

    /// Z-only feed up to the safe height.
    pub fn retract(z_safe: f64, plungerate: f64) -> Self {
        Instruction::Linear {
            x: None,
            y: None,
            z: Some(z_safe),
            feedrate: Some(plungerate),
        }
    }

    pub fn is_pass_marker(&self) -> bool {
        matches!(self, Instruction::PassMarker { .. })
    }

    pub fn is_rapid(&self) -> bool {
        matches!(self, Instruction::Rapid { .. })
    }

    /// Linear move touching only Z.
    pub fn is_z_move(&self) -> bool {
        matches!(
            self,
            Instruction::Linear {
                x: None,
                y: None,
                z: Some(_),
                ..
            }
        )
    }
}

impl From<&MotionSegment> for Instruction {
    fn from(segment: &MotionSegment) -> Self {
        match *segment {
            MotionSegment::Rapid { to } => Instruction::Rapid { to },
            MotionSegment::Linear { to, feedrate } => Instruction::Linear {
                x: Some(to.x),
                y: Some(to.y),
                z: None,
                feedrate,
            },
            MotionSegment::Arc {
                to,
                radius,
                direction,
                feedrate,
            } => Instruction::Arc {
                direction,
                to,
                radius,
                feedrate,
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::PassMarker { offset } => {
                write!(f, "(Offset: {})\n(New pass)", offset)
            }
            Instruction::Rapid { to } => {
                write!(f, "G0 X{} Y{}", format_coord(to.x), format_coord(to.y))
            }
            Instruction::Linear { x, y, z, feedrate } => {
                write!(f, "G1")?;
                let words = [('X', x), ('Y', y), ('Z', z), ('F', feedrate)];
                for (letter, value) in words {
                    if let Some(v) = value {
                        write!(f, " {}{}", letter, format_coord(*v))?;
                    }
                }
                Ok(())
            }
            Instruction::Arc {
                direction,
                to,
                radius,
                feedrate,
            } => {
                write!(
                    f,
                    "{} X{} Y{} R{}",
                    direction.gcode(),
                    format_coord(to.x),
                    format_coord(to.y),
                    format_coord(*radius)
                )?;
                if let Some(rate) = feedrate {
                    write!(f, " F{}", format_coord(*rate))?;
                }
                Ok(())
            }
        }
    }
}

/// Turns toolpath contours into the ordered instruction sequence.
pub struct InstructionEmitter {
    plungerate: f64,
    z_safe: f64,
}

impl InstructionEmitter {
    /// Create an emitter for the given plunge rate and retract height.
    pub fn new(plungerate: f64, settings: &ProgramSettings) -> Self {
        Self {
            plungerate,
            z_safe: settings.z_safe_distance,
        }
    }

    /// Emit every pass of every stepover.
    pub fn emit(&self, toolpath: &Toolpath) -> Vec<Instruction> {
        let mut instructions = Vec::new();
        for stepover in &toolpath.stepovers {
            for &depth in &stepover.depths {
                self.emit_pass(&mut instructions, toolpath.offset, stepover, depth);
            }
        }
        instructions
    }

    /// Emit one Z pass.
    ///
    /// The rapid approach to the start point comes directly after the pass
    /// marker and before the plunge, so the plunge is a pure Z move over
    /// the start of the cut.
    fn emit_pass(
        &self,
        out: &mut Vec<Instruction>,
        offset: OffsetKind,
        stepover: &StepoverToolpath,
        depth: f64,
    ) {
        let Some(start) = stepover.start_point() else {
            return;
        };

        out.push(Instruction::PassMarker { offset });
        out.push(Instruction::Rapid { to: start });
        out.push(Instruction::plunge(depth, self.plungerate));
        out.extend(stepover.cutting_moves().iter().map(Instruction::from));
        out.push(Instruction::retract(self.z_safe, self.plungerate));
    }
}

/// Emit the instruction sequence for a toolpath.
pub fn emit_instructions(
    toolpath: &Toolpath,
    plungerate: f64,
    settings: &ProgramSettings,
) -> Vec<Instruction> {
    InstructionEmitter::new(plungerate, settings).emit(toolpath)
}
