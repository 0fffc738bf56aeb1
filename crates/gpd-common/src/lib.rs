//! Common types and utilities shared across the GPD viewer crates.

pub mod axis;
pub mod error;
pub mod sample;

pub use axis::{Axis, SliceIndex};
pub use error::{GpdError, GpdResult};
pub use sample::SampleArray;
