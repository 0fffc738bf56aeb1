//! Error types for the GPD viewer crates.

use thiserror::Error;

use crate::axis::Axis;

/// Result type alias using GpdError.
pub type GpdResult<T> = Result<T, GpdError>;

/// Primary error type for loading, slicing and selection.
#[derive(Debug, Error)]
pub enum GpdError {
    // === Load Errors ===
    #[error("Failed to load '{source_name}': {message}")]
    Load { source_name: String, message: String },

    #[error("Buffer '{source_name}' has {len} bytes, not a multiple of 8")]
    MisalignedBuffer { source_name: String, len: usize },

    #[error("Array '{0}' is empty")]
    EmptyArray(String),

    // === Shape Errors ===
    #[error("Shape {shape:?} needs {expected} samples but the array holds {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Index has {actual} components, view has rank {expected}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Index {index} out of range for axis {axis} (length {len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },

    // === Selection Errors ===
    #[error("Value {value} not found on axis {axis}")]
    ValueNotFound { axis: Axis, value: f64 },

    // === Configuration Errors ===
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GpdError {
    /// Create a Load error.
    pub fn load(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Load {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Errors that must stop startup before any interactive state exists.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            GpdError::Load { .. }
                | GpdError::MisalignedBuffer { .. }
                | GpdError::EmptyArray(_)
                | GpdError::ShapeMismatch { .. }
        )
    }

    /// Errors raised by a selector event that can simply be dropped.
    pub fn is_selection_error(&self) -> bool {
        match self {
            GpdError::ValueNotFound { .. } => true,
            GpdError::IndexOutOfRange { axis, .. } => matches!(axis, Axis::X | Axis::T),
            _ => false,
        }
    }
}
