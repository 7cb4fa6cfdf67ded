//! G-code text output.

use super::Instruction;
use std::fmt::Write;

/// Line-oriented G-code writer.
#[derive(Debug, Default)]
pub struct GcodeWriter {
    /// Output buffer.
    buffer: String,
    /// Lines written so far.
    lines: usize,
}

impl GcodeWriter {
    /// Empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Program text written so far.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer and return the program text.
    pub fn take_output(self) -> String {
        self.buffer
    }

    /// Number of lines written, blank lines included.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Write a line.
    pub fn write_line(&mut self, content: &str) {
        let _ = writeln!(self.buffer, "{}", content);
        self.lines += content.lines().count().max(1);
    }

    /// Write an empty line.
    pub fn write_blank(&mut self) {
        self.write_line("");
    }

    /// Write a comment line.
    pub fn write_comment(&mut self, comment: &str) {
        self.write_line(&format!("({})", comment));
    }

    /// Write one instruction.
    pub fn write_instruction(&mut self, instruction: &Instruction) {
        self.write_line(&instruction.to_string());
    }

    // === Machine commands ===

    /// Spindle on, clockwise (M3).
    pub fn spindle_on(&mut self, speed: u32) {
        self.write_line(&format!("M3 S{}", speed));
    }

    /// Spindle off (M5).
    pub fn spindle_off(&mut self) {
        self.write_line("M5");
    }

    /// Rapid move with pre-formatted position words.
    pub fn rapid_to(&mut self, position: &str) {
        self.write_line(&format!("G0 {}", position));
    }

    /// Rapid move to a Z height.
    pub fn rapid_z(&mut self, z: f64) {
        self.write_line(&format!("G0 Z{}", format_coord(z)));
    }
}

/// Significant digits kept in coordinate words.
const SIGNIFICANT_DIGITS: i32 = 15;

/// Format a coordinate value for G-code output.
///
/// Uses 15 significant digits, trims trailing zeros and writes whole
/// numbers without a decimal point. Negative zero prints as `0`.
pub fn format_coord(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return (value as i64).to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let precision = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.precision$}");
    if !text.contains('.') {
        return text;
    }

    match text.trim_end_matches('0').trim_end_matches('.') {
        "" | "-" | "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
