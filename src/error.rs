//! Error types for shape file to G-code conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for shape processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// Unsupported shape type (E100)
    UnsupportedShape = 100,
    /// Wrong number of vertices for the shape (E101)
    InvalidVertexCount = 101,
    /// Unknown offset kind (E102)
    InvalidOffsetKind = 102,
    /// Polygon has no definite orientation (E200)
    DegenerateGeometry = 200,
    /// Parameter out of range (E201)
    InvalidParameter = 201,
}

/// Main error type for the converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Invalid numeric value at line {line}: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("Shape type '{shape}' not supported")]
    UnsupportedShape { shape: String },

    #[error("A {shape} needs {expected} vertices, got {found}")]
    InvalidVertexCount {
        shape: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown offset type '{value}': expected 'inside', 'outside' or 'none'")]
    InvalidOffsetKind { value: String },

    #[error("Polygon has zero signed area and no definite winding")]
    DegeneratePolygon,

    #[error("Vertex ({x}, {y}) lies on a centroid axis ({cx}, {cy})")]
    VertexOnCentroidAxis { x: f64, y: f64, cx: f64, cy: f64 },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Validation failed: {}", .errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ConvertError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ConvertError::ParseError { .. } => ErrorCode::ParseError,
            ConvertError::MissingField { .. } => ErrorCode::ParseError,
            ConvertError::InvalidNumber { .. } => ErrorCode::ParseError,
            ConvertError::UnsupportedShape { .. } => ErrorCode::UnsupportedShape,
            ConvertError::InvalidVertexCount { .. } => ErrorCode::InvalidVertexCount,
            ConvertError::InvalidOffsetKind { .. } => ErrorCode::InvalidOffsetKind,
            ConvertError::DegeneratePolygon => ErrorCode::DegenerateGeometry,
            ConvertError::VertexOnCentroidAxis { .. } => ErrorCode::DegenerateGeometry,
            ConvertError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            ConvertError::ValidationFailed { .. } => ErrorCode::InvalidParameter,
            ConvertError::Io(_) => ErrorCode::FileNotFound,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Shorthand for an out-of-range parameter.
    pub(crate) fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        ConvertError::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
