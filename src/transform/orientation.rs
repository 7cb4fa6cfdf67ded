//! Winding order normalization.

use crate::error::{ConvertError, Result};
use crate::geometry::{Polygon, Winding};

/// Return `polygon` wound clockwise (`clockwise = true`) or counter-clockwise.
///
/// Vertices are reversed only when the measured winding disagrees with the
/// target; the first vertex stays first. Zero-area polygons have no
/// winding to correct and are rejected.
pub fn normalize_winding(polygon: &Polygon, clockwise: bool) -> Result<Polygon> {
    let target = if clockwise {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    };

    match polygon.winding() {
        Winding::Degenerate => Err(ConvertError::DegeneratePolygon),
        winding if winding == target => Ok(polygon.clone()),
        _ => {
            tracing::debug!("Reversing polygon to {:?} winding", target);
            Ok(polygon.reversed())
        }
    }
}
