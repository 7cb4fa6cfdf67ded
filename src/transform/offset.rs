//! Axis-aligned tool radius offset for rectangles.

use crate::error::{ConvertError, Result};
use crate::geometry::{Point2D, Polygon};
use crate::model::OffsetKind;

/// Shift each vertex by the tool radius on X and Y.
///
/// `Inside` moves every vertex toward `centre`, `Outside` away from it,
/// `None` leaves the polygon untouched. The shift is per axis, which is
/// only a true offset for an axis-aligned rectangle.
pub fn apply_offset(
    polygon: &Polygon,
    offset: OffsetKind,
    tool_diameter: f64,
    centre: Point2D,
) -> Result<Polygon> {
    let sign = match offset {
        OffsetKind::None => return Ok(polygon.clone()),
        OffsetKind::Inside => -1.0,
        OffsetKind::Outside => 1.0,
    };

    if tool_diameter <= 0.0 {
        return Err(ConvertError::invalid_parameter(
            "tool diameter",
            format!("must be positive, got {}", tool_diameter),
        ));
    }

    let tool_radius = tool_diameter / 2.0;
    let vertices = polygon
        .vertices
        .iter()
        .map(|vertex| {
            let (ox, oy) = vertex.quadrant(&centre)?.outward();
            Ok(vertex.translated(sign * ox * tool_radius, sign * oy * tool_radius))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(vertices))
}
