//! Shape description validation.

mod validate;

pub use validate::{validate_shape_config, ValidationResult};
