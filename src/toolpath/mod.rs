//! Toolpath planning: pass depths, finishing stepovers and contour assembly.

mod assembler;
mod depths;
mod stepover;

pub use assembler::{build_toolpath, StepoverToolpath, Toolpath, ToolpathAssembler};
pub use depths::plan_pass_depths;
pub use stepover::{effective_tool_diameter, plan_stepovers};
