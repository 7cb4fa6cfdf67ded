//! Data model types for shape to G-code conversion.

mod motion;
mod shape_config;

pub use motion::{ArcDirection, MotionSegment};
pub use shape_config::{CutDirection, OffsetKind, ShapeConfig, ShapeKind};
