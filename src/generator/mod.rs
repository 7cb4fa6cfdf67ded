//! G-code program generator module.

mod gcode;
mod instruction;
mod program;

pub use gcode::{format_coord, GcodeWriter};
pub use instruction::{emit_instructions, Instruction, InstructionEmitter};
pub use program::{generate_program, render_program};
