//! The interactive phase: selection events in, frames out.
//!
//! A single task owns the [`ViewerContext`]. Events from the selector
//! channel are applied as they arrive; on every display tick the context
//! rebuilds the grid if it is dirty and hands the frame to the surface.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::context::{Frame, ViewerContext};
use crate::interaction::SelectionEvent;

/// Something that displays frames.
pub trait RenderSurface {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        (**self).present(frame)
    }
}

/// Fans a frame out to several surfaces in order.
#[derive(Default)]
pub struct SurfaceSet {
    surfaces: Vec<Box<dyn RenderSurface + Send>>,
}

impl SurfaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: impl RenderSurface + Send + 'static) {
        self.surfaces.push(Box::new(surface));
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl RenderSurface for SurfaceSet {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        for surface in &mut self.surfaces {
            surface.present(frame)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenderLoopConfig {
    pub tick_interval: Duration,
    /// Stop after this many frames.
    pub max_frames: Option<u64>,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / 60.0),
            max_frames: None,
        }
    }
}

/// Counts reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub frames: u64,
    pub events_applied: u64,
    pub events_rejected: u64,
    pub slice_failures: u64,
}

/// Run until the event channel closes and the last selection is drawn, or
/// until `max_frames` frames have been presented.
///
/// Rejected selections and failed slices are logged and skipped; only a
/// surface failure ends the loop with an error.
pub async fn run<S: RenderSurface + ?Sized>(
    ctx: &mut ViewerContext,
    mut events: mpsc::Receiver<SelectionEvent>,
    surface: &mut S,
    config: &RenderLoopConfig,
) -> Result<RenderSummary> {
    let mut ticker = time::interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut summary = RenderSummary::default();
    let mut events_open = true;

    info!(
        tick_ms = config.tick_interval.as_secs_f64() * 1000.0,
        max_frames = ?config.max_frames,
        "Render loop started"
    );

    loop {
        tokio::select! {
            biased;

            event = events.recv(), if events_open => match event {
                Some(event) => match ctx.apply(event) {
                    Ok(_) => summary.events_applied += 1,
                    Err(_) => summary.events_rejected += 1,
                },
                None => {
                    debug!("Selection channel closed");
                    events_open = false;
                }
            },

            _ = ticker.tick() => {
                match ctx.tick() {
                    Ok(Some(frame)) => {
                        surface
                            .present(&frame)
                            .with_context(|| format!("Failed to present frame {}", frame.number))?;
                        summary.frames += 1;
                    }
                    Ok(None) => {}
                    // Already logged by the context.
                    Err(_) => summary.slice_failures += 1,
                }

                if config.max_frames.is_some_and(|max| summary.frames >= max) {
                    break;
                }
                if !events_open && !ctx.interaction().is_dirty() {
                    break;
                }
            }
        }
    }

    info!(
        frames = summary.frames,
        events_applied = summary.events_applied,
        events_rejected = summary.events_rejected,
        slice_failures = summary.slice_failures,
        "Render loop finished"
    );

    Ok(summary)
}

/// Feed `events` into the channel, pausing `spacing` between them so each
/// selection gets its own tick.
pub fn spawn_event_source(
    events: Vec<SelectionEvent>,
    spacing: Duration,
    tx: mpsc::Sender<SelectionEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        for (i, event) in events.into_iter().enumerate() {
            if i > 0 && !spacing.is_zero() {
                time::sleep(spacing).await;
            }
            if tx.send(event).await.is_err() {
                debug!("Render loop gone, dropping remaining selections");
                break;
            }
        }
    })
}
