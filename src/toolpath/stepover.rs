//! Finishing allowance planning.

/// Lateral allowances for each contour, largest first, ending with the
/// true-dimension pass at 0.
pub fn plan_stepovers(finish_passes: u32, finish_stepover: f64) -> Vec<f64> {
    (0..finish_passes)
        .map(|i| finish_stepover * f64::from(finish_passes - i))
        .chain(std::iter::once(0.0))
        .collect()
}

/// Tool diameter that leaves `stepover` of material on each side.
pub fn effective_tool_diameter(tool_diameter: f64, stepover: f64) -> f64 {
    tool_diameter + stepover * 2.0
}
