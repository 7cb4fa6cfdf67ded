//! Field-level helpers for `key: value` shape files.

use crate::error::{ConvertError, Result};
use crate::geometry::Point2D;

/// Parse a `key: value` pair from a line.
pub fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Parse a finite float value. `nan` and `inf` are rejected.
pub fn parse_float(value: &str, line: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConvertError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

/// Parse a non-negative integer value.
pub fn parse_uint(value: &str, line: usize) -> Result<u32> {
    value.trim().parse().map_err(|_| ConvertError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}

/// Parse an `x,y` point.
pub fn parse_point(value: &str, line: usize) -> Result<Point2D> {
    let (x, y) = value.split_once(',').ok_or_else(|| ConvertError::ParseError {
        line,
        message: format!("expected 'x,y' point, got '{}'", value),
    })?;
    Ok(Point2D::new(parse_float(x, line)?, parse_float(y, line)?))
}

/// `true` is the only value that enables a flag.
pub fn parse_flag(value: &str) -> bool {
    value.trim() == "true"
}
