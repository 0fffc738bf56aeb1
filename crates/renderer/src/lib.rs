//! Turning GPD samples into something a 3D surface can draw.
//!
//! - Colormaps (jet, hot, cool, gray)
//! - Slice-and-normalize pipeline producing per-vertex positions and colours
//! - PNG previews of a slice

pub mod colormap;
pub mod png;
pub mod slice;

pub use colormap::{Colormap, Palette, Rgb};
pub use slice::{GridCell, RenderableGrid, SliceAxes, SlicePipeline};
