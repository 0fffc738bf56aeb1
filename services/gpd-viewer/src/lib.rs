//! GPD slice viewer library.
//!
//! Owns the interactive half of the viewer: selector state, the render loop
//! and the surfaces frames are presented on. Loading and slicing live in the
//! `gpd-grid` and `renderer` crates.

pub mod config;
pub mod context;
pub mod export;
pub mod interaction;
pub mod presentation;
pub mod render_loop;

pub use config::ViewerConfig;
pub use context::{Frame, ViewerContext};
pub use export::{FrameExporter, PngPreview, RecordingSurface};
pub use interaction::{AxisSelector, InteractionState, SelectionEvent};
pub use presentation::{Presentation, PresetName};
pub use render_loop::{RenderLoopConfig, RenderSummary, RenderSurface, SurfaceSet};
