//! Viewer configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use gpd_common::{GpdError, GpdResult};
use gpd_grid::{DataRoot, DatasetLayout};
use renderer::Colormap;

use crate::interaction::{parse_event_script, SelectionEvent};
use crate::presentation::{PresetName, Presentation};
use crate::render_loop::RenderLoopConfig;

pub const DEFAULT_TICK_HZ: u32 = 60;

/// Resolved runtime configuration of the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub data_root: DataRoot,
    /// YAML file renaming the dataset arrays; default names otherwise.
    pub layout_file: Option<PathBuf>,
    /// Palette name, optionally with `_r`.
    pub palette: String,
    pub preset: PresetName,
    /// YAML file replacing the preset entirely.
    pub presentation_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub write_json: bool,
    /// Indent exported JSON frames.
    pub pretty_json: bool,
    pub write_png: bool,
    pub tick_hz: u32,
    pub max_frames: Option<u64>,
    /// Selections given on the command line, applied before the script.
    pub selections: Vec<SelectionEvent>,
    pub event_script: Option<PathBuf>,
    /// Pause between scripted selections.
    pub event_spacing: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_root: DataRoot::Dir(PathBuf::from(".")),
            layout_file: None,
            palette: "jet".to_string(),
            preset: PresetName::Orbit,
            presentation_file: None,
            output_dir: PathBuf::from("frames"),
            write_json: true,
            pretty_json: false,
            write_png: true,
            tick_hz: DEFAULT_TICK_HZ,
            max_frames: None,
            selections: Vec::new(),
            event_script: None,
            event_spacing: Duration::from_millis(50),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> GpdResult<()> {
        if self.tick_hz == 0 {
            return Err(GpdError::InvalidConfig(
                "tick rate must be at least 1 Hz".to_string(),
            ));
        }
        if self.max_frames == Some(0) {
            return Err(GpdError::InvalidConfig(
                "max frames must be at least 1".to_string(),
            ));
        }
        self.colormap()?;
        Ok(())
    }

    pub fn colormap(&self) -> GpdResult<Colormap> {
        Colormap::from_name(&self.palette)
    }

    /// Array file names, read from the layout file when one is configured.
    pub fn layout(&self) -> GpdResult<DatasetLayout> {
        let Some(path) = &self.layout_file else {
            return Ok(DatasetLayout::default());
        };
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            GpdError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&yaml)
            .map_err(|e| GpdError::InvalidConfig(format!("dataset layout YAML: {}", e)))
    }

    /// The preset, or the override file when one is configured.
    pub fn presentation(&self) -> GpdResult<Presentation> {
        match &self.presentation_file {
            Some(path) => Presentation::from_yaml_file(path),
            None => Ok(Presentation::preset(self.preset)),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1) as f64)
    }

    pub fn render_loop(&self) -> RenderLoopConfig {
        RenderLoopConfig {
            tick_interval: self.tick_interval(),
            max_frames: self.max_frames,
        }
    }

    /// Command line selections followed by the script's, in order.
    pub async fn selection_events(&self) -> Result<Vec<SelectionEvent>> {
        let mut events = self.selections.clone();
        if let Some(path) = &self.event_script {
            let script = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read event script {}", path.display()))?;
            let scripted = parse_event_script(&script)
                .with_context(|| format!("Invalid event script {}", path.display()))?;
            events.extend(scripted);
        }
        Ok(events)
    }
}
