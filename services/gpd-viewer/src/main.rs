//! GPD slice viewer.
//!
//! Loads the five dataset arrays, then renders the `(xi, Q2)` surface for
//! every selection of `(x, t)` and presents the frames as JSON and PNG.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use gpd_grid::{ArrayLoader, DataRoot, GpdDataset};
use gpd_viewer::render_loop::{self, spawn_event_source};
use gpd_viewer::{
    FrameExporter, PngPreview, PresetName, SelectionEvent, SurfaceSet, ViewerConfig,
    ViewerContext,
};

#[derive(Parser, Debug)]
#[command(name = "gpd-viewer")]
#[command(about = "Slice viewer for 4D GPD grids")]
struct Args {
    /// Directory or base URL holding x.bin, xi.bin, t.bin, Q2.bin and gpd_4d.bin
    #[arg(short, long, env = "GPD_DATA", default_value = ".")]
    data: String,

    /// YAML file renaming the dataset arrays (keys x, xi, t, q2, gpd)
    #[arg(long, env = "GPD_LAYOUT")]
    layout: Option<PathBuf>,

    /// Colormap (jet, hot, cool, gray; append _r to reverse)
    #[arg(short, long, env = "GPD_PALETTE", default_value = "jet")]
    palette: String,

    /// Presentation preset (orbit, framed)
    #[arg(long, env = "GPD_PRESET", default_value = "orbit")]
    preset: String,

    /// YAML file overriding the presentation preset
    #[arg(long)]
    presentation: Option<PathBuf>,

    /// Directory frames are written to
    #[arg(short, long, env = "GPD_OUTPUT_DIR", default_value = "frames")]
    output_dir: PathBuf,

    /// Skip JSON frame export
    #[arg(long)]
    no_json: bool,

    /// Indent exported JSON frames
    #[arg(long)]
    pretty_json: bool,

    /// Skip PNG previews
    #[arg(long)]
    no_png: bool,

    /// Display refresh rate
    #[arg(long, env = "GPD_TICK_HZ", default_value_t = 60)]
    tick_hz: u32,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Selection to apply, e.g. `x=0.25` or `t_index=3` (repeatable)
    #[arg(short, long = "select")]
    selections: Vec<String>,

    /// File with one selection per line
    #[arg(long)]
    events: Option<PathBuf>,

    /// Pause between selections in milliseconds
    #[arg(long, default_value_t = 50)]
    event_spacing_ms: u64,

    /// Keep running after the last selection until Ctrl+C
    #[arg(long)]
    keep_open: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn into_config(self) -> Result<ViewerConfig> {
        let preset: PresetName = self.preset.parse()?;
        let selections = self
            .selections
            .iter()
            .map(|s| s.parse::<SelectionEvent>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --select argument")?;

        Ok(ViewerConfig {
            data_root: DataRoot::parse(&self.data),
            layout_file: self.layout,
            palette: self.palette,
            preset,
            presentation_file: self.presentation,
            output_dir: self.output_dir,
            write_json: !self.no_json,
            pretty_json: self.pretty_json,
            write_png: !self.no_png,
            tick_hz: self.tick_hz,
            max_frames: self.max_frames,
            selections,
            event_script: self.events,
            event_spacing: Duration::from_millis(self.event_spacing_ms),
        })
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let keep_open = args.keep_open;
    let config = args.into_config()?;
    config.validate().context("Invalid configuration")?;

    info!(data = ?config.data_root, palette = %config.palette, "Starting GPD viewer");

    // Startup barrier: nothing interactive exists until all five arrays load
    let layout = config.layout().context("Failed to read dataset layout")?;
    let loader = ArrayLoader::new()?;
    let dataset = match GpdDataset::load(&loader, &config.data_root, &layout).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(error = %e, fatal = e.is_startup_fatal(), "Dataset load failed");
            return Err(anyhow::Error::new(e).context("Failed to load GPD dataset"));
        }
    };

    let presentation = config.presentation().context("Failed to load presentation")?;
    let mut ctx = ViewerContext::new(dataset, config.colormap()?, presentation)?;

    let mut surfaces = SurfaceSet::new();
    if config.write_json {
        surfaces.push(FrameExporter::new(&config.output_dir)?.pretty(config.pretty_json));
    }
    if config.write_png {
        surfaces.push(PngPreview::new(&config.output_dir)?);
    }

    if surfaces.is_empty() {
        warn!("JSON and PNG output both disabled, frames are discarded");
    }
    info!(surfaces = surfaces.len(), output = %config.output_dir.display(), "Render surfaces ready");

    let events = config.selection_events().await?;
    let (tx, rx) = mpsc::channel(64);

    if keep_open {
        let hold = tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
            drop(hold);
        });
    }
    let source = spawn_event_source(events, config.event_spacing, tx);

    let summary = render_loop::run(&mut ctx, rx, &mut surfaces, &config.render_loop()).await?;

    if let Err(e) = source.await {
        error!(error = %e, "Event source task failed");
    }

    info!(
        frames = summary.frames,
        rejected = summary.events_rejected,
        output = %config.output_dir.display(),
        "GPD viewer finished"
    );

    Ok(())
}
