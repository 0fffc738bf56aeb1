//! The viewer context: sole owner of the dataset, pipeline, selection state
//! and the grid currently on display.

use tracing::{debug, error, info, warn};

use gpd_common::{Axis, GpdResult, SliceIndex};
use gpd_grid::GpdDataset;
use renderer::{Colormap, RenderableGrid, SlicePipeline};

use crate::interaction::{InteractionState, SelectionEvent};
use crate::presentation::Presentation;

/// A freshly built grid handed to a render surface.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Sequence number, starting at 0.
    pub number: u64,
    pub grid: &'a RenderableGrid,
    pub presentation: &'a Presentation,
    /// Domain values of the fixed axes.
    pub x_value: f64,
    pub t_value: f64,
    pub palette: &'a str,
}

pub struct ViewerContext {
    dataset: GpdDataset,
    pipeline: SlicePipeline,
    interaction: InteractionState,
    presentation: Presentation,
    palette: String,
    current: Option<RenderableGrid>,
    frames_built: u64,
}

impl ViewerContext {
    pub fn new(
        dataset: GpdDataset,
        colormap: Colormap,
        presentation: Presentation,
    ) -> GpdResult<Self> {
        let pipeline = SlicePipeline::from_dataset(&dataset, colormap)?;
        let interaction = InteractionState::from_dataset(&dataset)?;

        info!(
            shape = ?dataset.shape().dims(),
            palette = %colormap.name(),
            presentation = %presentation.name,
            "Viewer context ready"
        );

        Ok(Self {
            dataset,
            pipeline,
            interaction,
            presentation,
            palette: colormap.name(),
            current: None,
            frames_built: 0,
        })
    }

    pub fn dataset(&self) -> &GpdDataset {
        &self.dataset
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// The grid currently on display, if any frame has been built.
    pub fn current_grid(&self) -> Option<&RenderableGrid> {
        self.current.as_ref()
    }

    pub fn frames_built(&self) -> u64 {
        self.frames_built
    }

    /// Apply a selector event. Rejected events leave all state unchanged.
    pub fn apply(&mut self, event: SelectionEvent) -> GpdResult<SliceIndex> {
        let axis = event.axis().to_string();
        match self.interaction.apply(event) {
            Ok(slice) => {
                metrics::counter!("gpd_selection_events_total", "axis" => axis).increment(1);
                debug!(%event, x_index = slice.x_index, t_index = slice.t_index, "Selection applied");
                Ok(slice)
            }
            Err(e) => {
                metrics::counter!("gpd_selection_rejected_total", "axis" => axis).increment(1);
                if e.is_selection_error() {
                    warn!(%event, error = %e, "Selection rejected");
                } else {
                    error!(%event, error = %e, "Selection failed");
                }
                Err(e)
            }
        }
    }

    /// Rebuild the grid if the selection changed since the last tick.
    ///
    /// Returns `Ok(None)` when nothing was dirty. If slicing fails the
    /// previous grid stays current and the error is returned.
    pub fn tick(&mut self) -> GpdResult<Option<Frame<'_>>> {
        let Some(slice) = self.interaction.take_dirty() else {
            return Ok(None);
        };

        let grid = match self.pipeline.slice(slice) {
            Ok(grid) => grid,
            Err(e) => {
                error!(
                    x_index = slice.x_index,
                    t_index = slice.t_index,
                    error = %e,
                    "Slice failed, keeping previous grid"
                );
                return Err(e);
            }
        };

        let number = self.frames_built;
        self.frames_built += 1;
        let grid = self.current.insert(grid);

        Ok(Some(Frame {
            number,
            grid,
            presentation: &self.presentation,
            x_value: self.dataset.axis(Axis::X)[slice.x_index],
            t_value: self.dataset.axis(Axis::T)[slice.t_index],
            palette: &self.palette,
        }))
    }
}
