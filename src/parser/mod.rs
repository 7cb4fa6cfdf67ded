//! Shape file parser module.

mod fields;
mod shape_file;

pub use fields::parse_key_value;
pub use shape_file::{parse_shape_file, parse_shape_str, ShapeFileParser};
