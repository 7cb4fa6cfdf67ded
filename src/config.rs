//! Configuration constants and settings for the converter.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Corner radii at or below this value are cut as sharp corners.
pub const MIN_CORNER_RADIUS: f64 = 0.09;

/// Default retract height between passes and at program end.
pub const DEFAULT_Z_SAFE: f64 = 5.0;

/// Default start position, written verbatim after `G0` in the program header.
pub const DEFAULT_SAFE_START: &str = "X0 Y0 Z10";

/// Extension of generated programs.
pub const OUTPUT_EXTENSION: &str = "nc";

/// Settings shared by every pass of a generated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSettings {
    /// Retract height after each pass.
    pub z_safe_distance: f64,
    /// Position words moved to before cutting starts.
    pub safe_start_position: String,
}

impl Default for ProgramSettings {
    fn default() -> Self {
        Self {
            z_safe_distance: DEFAULT_Z_SAFE,
            safe_start_position: DEFAULT_SAFE_START.to_string(),
        }
    }
}

impl ProgramSettings {
    /// Create settings with a custom retract height.
    pub fn with_safe_z(z_safe_distance: f64) -> Self {
        Self {
            z_safe_distance,
            ..Default::default()
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if `a` is less than `b` by more than the epsilon.
    #[inline]
    pub fn definitely_less(a: f64, b: f64) -> bool {
        a < b - EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ProgramSettings::default();
        assert_eq!(settings.z_safe_distance, 5.0);
        assert_eq!(settings.safe_start_position, "X0 Y0 Z10");
        assert_eq!(ProgramSettings::with_safe_z(12.5).z_safe_distance, 12.5);
    }

    #[test]
    fn test_float_cmp() {
        assert!(float_cmp::approx_eq(1.0, 1.00001));
        assert!(!float_cmp::approx_eq(1.0, 1.001));
        assert!(float_cmp::definitely_less(8.9, 9.0));
        assert!(!float_cmp::definitely_less(9.0 - 1e-9, 9.0));
    }
}
