//! Headless render surfaces.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use gpd_common::SliceIndex;
use renderer::{png, RenderableGrid};

use crate::context::Frame;
use crate::presentation::Presentation;
use crate::render_loop::RenderSurface;

fn frame_path(dir: &Path, number: u64, extension: &str) -> PathBuf {
    dir.join(format!("frame_{:04}.{}", number, extension))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))
}

/// JSON form of a frame.
#[derive(Debug, Serialize)]
pub struct FrameDocument<'a> {
    pub frame: u64,
    pub slice: SliceIndex,
    pub x: f64,
    pub t: f64,
    pub palette: &'a str,
    pub xi_len: usize,
    pub q2_len: usize,
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub presentation: &'a Presentation,
}

impl<'a> FrameDocument<'a> {
    pub fn from_frame(frame: &Frame<'a>) -> Self {
        Self {
            frame: frame.number,
            slice: frame.grid.slice_index(),
            x: frame.x_value,
            t: frame.t_value,
            palette: frame.palette,
            xi_len: frame.grid.xi_len(),
            q2_len: frame.grid.q2_len(),
            positions: frame.grid.positions(),
            colors: frame.grid.colors(),
            presentation: frame.presentation,
        }
    }
}

/// Writes `frame_NNNN.json` per frame.
#[derive(Debug, Clone)]
pub struct FrameExporter {
    dir: PathBuf,
    pretty: bool,
}

impl FrameExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir, pretty: false })
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RenderSurface for FrameExporter {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let doc = FrameDocument::from_frame(frame);
        let json = if self.pretty {
            serde_json::to_vec_pretty(&doc)?
        } else {
            serde_json::to_vec(&doc)?
        };

        let path = frame_path(&self.dir, frame.number, "json");
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "Exported frame");
        Ok(())
    }
}

/// Writes `frame_NNNN.png` heatmaps.
#[derive(Debug, Clone)]
pub struct PngPreview {
    dir: PathBuf,
}

impl PngPreview {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }
}

impl RenderSurface for PngPreview {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let bytes = png::slice_preview_png(frame.grid)
            .map_err(|e| anyhow::anyhow!("PNG encoding failed: {}", e))?;

        let path = frame_path(&self.dir, frame.number, "png");
        std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "Wrote preview");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub number: u64,
    pub presentation: String,
    pub x_value: f64,
    pub t_value: f64,
    pub grid: RenderableGrid,
}

/// Keeps every presented frame in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub frames: Vec<RecordedFrame>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slices(&self) -> Vec<SliceIndex> {
        self.frames.iter().map(|f| f.grid.slice_index()).collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames.push(RecordedFrame {
            number: frame.number,
            presentation: frame.presentation.name.clone(),
            x_value: frame.x_value,
            t_value: frame.t_value,
            grid: frame.grid.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_paths_are_zero_padded() {
        let dir = Path::new("/tmp/out");
        assert_eq!(frame_path(dir, 7, "json"), PathBuf::from("/tmp/out/frame_0007.json"));
        assert_eq!(frame_path(dir, 12345, "png"), PathBuf::from("/tmp/out/frame_12345.png"));
    }

    #[test]
    fn test_exporter_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let exporter = FrameExporter::new(&nested).unwrap();
        assert!(exporter.dir().is_dir());
    }
}
