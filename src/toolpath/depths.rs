//! Z pass planning.

use crate::config::float_cmp::definitely_less;
use crate::error::{ConvertError, Result};

/// Produce the list of plunge depths for one contour.
///
/// Depths step by `pass_depth` while shallower than the target, and the
/// last pass always lands exactly on `total_cut_depth`.
pub fn plan_pass_depths(total_cut_depth: f64, pass_depth: f64) -> Result<Vec<f64>> {
    if total_cut_depth <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "total cut depth",
            format!("must be positive, got {}", total_cut_depth),
        ));
    }
    if pass_depth <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "pass depth",
            format!("must be positive, got {}", pass_depth),
        ));
    }

    let mut depths = Vec::new();
    let mut step = 1u32;
    loop {
        let depth = pass_depth * f64::from(step);
        if !definitely_less(depth, total_cut_depth) {
            break;
        }
        depths.push(depth);
        step += 1;
    }
    depths.push(total_cut_depth);

    Ok(depths)
}
