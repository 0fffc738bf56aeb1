//! Immutable sample arrays shared between the loader, views and selectors.

use std::ops::Deref;
use std::sync::Arc;

/// An immutable sequence of `f64` samples.
///
/// Clones share the same buffer, so views and selectors can hold the array
/// without copying it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleArray {
    name: Arc<str>,
    values: Arc<[f64]>,
}

impl SampleArray {
    /// Wrap decoded samples under a display name (usually the source file).
    pub fn new(name: impl AsRef<str>, values: Vec<f64>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            values: Arc::from(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Index of the first sample exactly equal to `value`.
    pub fn position_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }
}

impl Deref for SampleArray {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}
