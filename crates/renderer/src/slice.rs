//! Slice-and-normalize pipeline: 4D samples to a coloured 2D height field.
//!
//! For a fixed `(x_index, t_index)` the pipeline walks every `(xi, Q2)` cell,
//! Q2 outer and xi inner (the vertex order of a `len(xi) x len(Q2)` plane
//! mesh), and produces a normalized height and a colour per cell.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use gpd_common::{Axis, GpdError, GpdResult, SampleArray, SliceIndex};
use gpd_grid::{Extent, GpdDataset, NdView};

use crate::colormap::{Colormap, Rgb};

/// One vertex of the slice surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub xi_index: usize,
    pub q2_index: usize,
    /// GPD value normalized against the global extent.
    pub height: f64,
    pub rgb: Rgb,
}

/// Normalized xi and Q2 coordinates. They do not depend on the slice, so
/// they are computed once and shared by every grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceAxes {
    xi_norm: Arc<[f64]>,
    q2_norm: Arc<[f64]>,
}

impl SliceAxes {
    pub fn new(xi: &[f64], xi_extent: &Extent, q2: &[f64], q2_extent: &Extent) -> Self {
        let xi_norm: Vec<f64> = xi.iter().map(|v| xi_extent.normalize(*v)).collect();
        let q2_norm: Vec<f64> = q2.iter().map(|v| q2_extent.normalize(*v)).collect();
        Self {
            xi_norm: Arc::from(xi_norm),
            q2_norm: Arc::from(q2_norm),
        }
    }

    pub fn xi_norm(&self) -> &[f64] {
        &self.xi_norm
    }

    pub fn q2_norm(&self) -> &[f64] {
        &self.q2_norm
    }
}

/// A freshly sliced, coloured height field ready for a render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableGrid {
    slice: SliceIndex,
    axes: SliceAxes,
    cells: Vec<GridCell>,
}

impl RenderableGrid {
    /// The slice indices this grid was produced for.
    pub fn slice_index(&self) -> SliceIndex {
        self.slice
    }

    /// Number of columns (xi samples).
    pub fn xi_len(&self) -> usize {
        self.axes.xi_norm.len()
    }

    /// Number of rows (Q2 samples).
    pub fn q2_len(&self) -> usize {
        self.axes.q2_norm.len()
    }

    /// Cells in vertex order: Q2 outer, xi inner.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(xi_index, q2_index)`.
    pub fn cell(&self, xi_index: usize, q2_index: usize) -> Option<&GridCell> {
        if xi_index >= self.xi_len() || q2_index >= self.q2_len() {
            return None;
        }
        self.cells.get(q2_index * self.xi_len() + xi_index)
    }

    /// Vertex positions `[xi_norm, Q2_norm, height]`.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.cells
            .iter()
            .map(|c| {
                [
                    self.axes.xi_norm[c.xi_index] as f32,
                    self.axes.q2_norm[c.q2_index] as f32,
                    c.height as f32,
                ]
            })
            .collect()
    }

    /// Vertex colours with channels in `[0, 1]`.
    pub fn colors(&self) -> Vec<[f32; 3]> {
        self.cells.iter().map(|c| c.rgb.to_unit()).collect()
    }

    /// Positions flattened to `x0 y0 z0 x1 y1 z1 ...`.
    pub fn position_buffer(&self) -> Vec<f32> {
        self.positions().into_iter().flatten().collect()
    }

    /// Colours flattened to `r0 g0 b0 r1 g1 b1 ...`.
    pub fn color_buffer(&self) -> Vec<f32> {
        self.colors().into_iter().flatten().collect()
    }
}

/// Builds [`RenderableGrid`]s for slice indices.
#[derive(Debug, Clone)]
pub struct SlicePipeline {
    view: NdView,
    axes: SliceAxes,
    gpd_extent: Extent,
    colormap: Colormap,
}

impl SlicePipeline {
    /// Create a pipeline over a rank-4 `(x, xi, t, Q2)` view.
    pub fn new(
        view: NdView,
        xi: &SampleArray,
        q2: &SampleArray,
        gpd_extent: Extent,
        xi_extent: Extent,
        q2_extent: Extent,
        colormap: Colormap,
    ) -> GpdResult<Self> {
        let dims = view.shape().dims();
        if dims.len() != 4 {
            return Err(GpdError::RankMismatch {
                expected: 4,
                actual: dims.len(),
            });
        }
        if dims[Axis::Xi.position()] != xi.len() || dims[Axis::Q2.position()] != q2.len() {
            return Err(GpdError::ShapeMismatch {
                shape: dims.to_vec(),
                expected: dims[Axis::Xi.position()] * dims[Axis::Q2.position()],
                actual: xi.len() * q2.len(),
            });
        }

        let axes = SliceAxes::new(xi, &xi_extent, q2, &q2_extent);
        Ok(Self {
            view,
            axes,
            gpd_extent,
            colormap,
        })
    }

    /// Create a pipeline from a loaded dataset and its precomputed extents.
    pub fn from_dataset(dataset: &GpdDataset, colormap: Colormap) -> GpdResult<Self> {
        let extents = dataset.extents();
        Self::new(
            dataset.view().clone(),
            dataset.axis(Axis::Xi),
            dataset.axis(Axis::Q2),
            extents.gpd,
            extents.xi,
            extents.q2,
            colormap,
        )
    }

    pub fn axes(&self) -> &SliceAxes {
        &self.axes
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn gpd_extent(&self) -> &Extent {
        &self.gpd_extent
    }

    /// Build the grid for `slice`.
    ///
    /// Fails without partial output if either fixed index is out of range.
    pub fn slice(&self, slice: SliceIndex) -> GpdResult<RenderableGrid> {
        let started = Instant::now();
        let shape = self.view.shape();

        for (axis, index) in [(Axis::X, slice.x_index), (Axis::T, slice.t_index)] {
            let len = shape.dim(axis.position()).unwrap_or(0);
            if index >= len {
                return Err(GpdError::IndexOutOfRange { axis, index, len });
            }
        }

        let xi_len = self.axes.xi_norm.len();
        let q2_len = self.axes.q2_norm.len();
        let mut cells = Vec::with_capacity(xi_len * q2_len);

        for q2_index in 0..q2_len {
            for xi_index in 0..xi_len {
                let value = self
                    .view
                    .get4(slice.x_index, xi_index, slice.t_index, q2_index)?;
                let height = self.gpd_extent.normalize(value);
                cells.push(GridCell {
                    xi_index,
                    q2_index,
                    height,
                    rgb: self.colormap.evaluate(height),
                });
            }
        }

        let elapsed = started.elapsed();
        metrics::counter!("gpd_slices_total").increment(1);
        metrics::histogram!("gpd_slice_duration_seconds").record(elapsed.as_secs_f64());
        debug!(
            x_index = slice.x_index,
            t_index = slice.t_index,
            cells = cells.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "Built slice grid"
        );

        Ok(RenderableGrid {
            slice,
            axes: self.axes.clone(),
            cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpd_grid::Shape;

    fn arr(name: &str, values: &[f64]) -> SampleArray {
        SampleArray::new(name, values.to_vec())
    }

    fn worked_pipeline() -> SlicePipeline {
        let gpd: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let dataset = GpdDataset::from_arrays(
            arr("x", &[0.0, 1.0]),
            arr("xi", &[10.0, 20.0, 30.0]),
            arr("t", &[100.0, 200.0]),
            arr("Q2", &[1000.0, 2000.0]),
            arr("gpd", &gpd),
        )
        .unwrap();
        SlicePipeline::from_dataset(&dataset, Colormap::default()).unwrap()
    }

    #[test]
    fn test_axes_normalized_once() {
        let pipeline = worked_pipeline();
        assert_eq!(pipeline.axes().xi_norm(), &[0.0, 0.5, 1.0]);
        assert_eq!(pipeline.axes().q2_norm(), &[0.0, 1.0]);
    }

    #[test]
    fn test_cell_order_q2_outer_xi_inner() {
        let grid = worked_pipeline().slice(SliceIndex::new(0, 0)).unwrap();
        let order: Vec<(usize, usize)> = grid
            .cells()
            .iter()
            .map(|c| (c.q2_index, c.xi_index))
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_heights_match_view() {
        let grid = worked_pipeline().slice(SliceIndex::new(1, 0)).unwrap();
        // (x=1, xi=2, t=0, Q2=1) has value 21 of 0..=23
        let cell = grid.cell(2, 1).unwrap();
        assert_eq!(cell.height, 21.0 / 23.0);
        assert_eq!(grid.cell(0, 0).unwrap().height, 12.0 / 23.0);
    }

    #[test]
    fn test_out_of_range_slice_fails() {
        let pipeline = worked_pipeline();
        assert!(matches!(
            pipeline.slice(SliceIndex::new(2, 0)),
            Err(GpdError::IndexOutOfRange { axis: Axis::X, index: 2, len: 2 })
        ));
        assert!(matches!(
            pipeline.slice(SliceIndex::new(0, 5)),
            Err(GpdError::IndexOutOfRange { axis: Axis::T, .. })
        ));
    }

    #[test]
    fn test_rejects_non_gpd_rank() {
        let view = NdView::new(arr("g", &[0.0; 6]), Shape::new(vec![2, 3]).unwrap()).unwrap();
        let extent = Extent::scan("g", &[0.0, 1.0]).unwrap();
        let result = SlicePipeline::new(
            view,
            &arr("xi", &[0.0, 1.0, 2.0]),
            &arr("Q2", &[1.0]),
            extent,
            extent,
            extent,
            Colormap::default(),
        );
        assert!(matches!(result, Err(GpdError::RankMismatch { expected: 4, actual: 2 })));
    }

    #[test]
    fn test_buffers_are_flat_triples() {
        let grid = worked_pipeline().slice(SliceIndex::new(0, 1)).unwrap();
        assert_eq!(grid.position_buffer().len(), grid.len() * 3);
        assert_eq!(grid.color_buffer().len(), grid.len() * 3);
        assert!(grid.color_buffer().iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
