//! The loaded GPD dataset: axis arrays, sample view and extents.

use tracing::{info, instrument};

use gpd_common::{Axis, GpdResult, SampleArray};

use crate::config::{DataRoot, DatasetLayout};
use crate::extent::Extent;
use crate::loader::ArrayLoader;
use crate::view::{NdView, Shape};

/// Extents of every dataset array, computed once at load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetExtents {
    pub gpd: Extent,
    pub x: Extent,
    pub xi: Extent,
    pub t: Extent,
    pub q2: Extent,
}

impl DatasetExtents {
    pub fn axis(&self, axis: Axis) -> &Extent {
        match axis {
            Axis::X => &self.x,
            Axis::Xi => &self.xi,
            Axis::T => &self.t,
            Axis::Q2 => &self.q2,
            Axis::Dim(_) => &self.gpd,
        }
    }
}

/// Immutable GPD dataset shared by the slicing pipeline and the selectors.
#[derive(Debug, Clone)]
pub struct GpdDataset {
    x: SampleArray,
    xi: SampleArray,
    t: SampleArray,
    q2: SampleArray,
    view: NdView,
    extents: DatasetExtents,
}

impl GpdDataset {
    /// Load all five arrays and build the dataset.
    ///
    /// The loads run concurrently and are joined once; the first failure
    /// aborts the whole load and nothing partial is returned.
    #[instrument(skip(loader, layout))]
    pub async fn load(
        loader: &ArrayLoader,
        root: &DataRoot,
        layout: &DatasetLayout,
    ) -> GpdResult<Self> {
        let gpd_src = root.resolve(&layout.gpd);
        let x_src = root.resolve(layout.axis_file(Axis::X));
        let xi_src = root.resolve(layout.axis_file(Axis::Xi));
        let t_src = root.resolve(layout.axis_file(Axis::T));
        let q2_src = root.resolve(layout.axis_file(Axis::Q2));

        let (gpd, x, xi, t, q2) = tokio::try_join!(
            loader.load(&gpd_src),
            loader.load(&x_src),
            loader.load(&xi_src),
            loader.load(&t_src),
            loader.load(&q2_src),
        )?;

        Self::from_arrays(x, xi, t, q2, gpd)
    }

    /// Build the dataset from already decoded arrays.
    pub fn from_arrays(
        x: SampleArray,
        xi: SampleArray,
        t: SampleArray,
        q2: SampleArray,
        gpd: SampleArray,
    ) -> GpdResult<Self> {
        let shape = Shape::new(vec![x.len(), xi.len(), t.len(), q2.len()])?;
        let view = NdView::new(gpd.clone(), shape)?;

        let extents = DatasetExtents {
            gpd: Extent::of(&gpd)?,
            x: Extent::of(&x)?,
            xi: Extent::of(&xi)?,
            t: Extent::of(&t)?,
            q2: Extent::of(&q2)?,
        };

        info!(
            shape = ?view.shape().dims(),
            gpd_min = extents.gpd.min(),
            gpd_max = extents.gpd.max(),
            "GPD dataset ready"
        );

        Ok(Self {
            x,
            xi,
            t,
            q2,
            view,
            extents,
        })
    }

    /// Values of a named axis.
    pub fn axis(&self, axis: Axis) -> &SampleArray {
        match axis {
            Axis::X => &self.x,
            Axis::Xi => &self.xi,
            Axis::T => &self.t,
            Axis::Q2 => &self.q2,
            Axis::Dim(_) => self.view.samples(),
        }
    }

    pub fn view(&self) -> &NdView {
        &self.view
    }

    pub fn shape(&self) -> &Shape {
        self.view.shape()
    }

    pub fn extents(&self) -> &DatasetExtents {
        &self.extents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpd_common::GpdError;

    fn arr(name: &str, values: &[f64]) -> SampleArray {
        SampleArray::new(name, values.to_vec())
    }

    #[test]
    fn test_from_arrays_builds_view_and_extents() {
        let gpd: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let dataset = GpdDataset::from_arrays(
            arr("x", &[0.0, 1.0]),
            arr("xi", &[10.0, 20.0, 30.0]),
            arr("t", &[100.0, 200.0]),
            arr("Q2", &[1000.0, 2000.0]),
            arr("gpd", &gpd),
        )
        .unwrap();

        assert_eq!(dataset.shape().dims(), &[2, 3, 2, 2]);
        assert_eq!(dataset.extents().gpd.max(), 23.0);
        assert_eq!(dataset.extents().axis(Axis::Xi).min(), 10.0);
        assert_eq!(dataset.axis(Axis::Q2).len(), 2);
    }

    #[test]
    fn test_from_arrays_shape_mismatch() {
        let result = GpdDataset::from_arrays(
            arr("x", &[0.0, 1.0]),
            arr("xi", &[10.0]),
            arr("t", &[100.0]),
            arr("Q2", &[1000.0]),
            arr("gpd", &[1.0, 2.0, 3.0]),
        );
        assert!(matches!(result, Err(GpdError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_from_arrays_empty_axis() {
        let result = GpdDataset::from_arrays(
            arr("x", &[]),
            arr("xi", &[10.0]),
            arr("t", &[100.0]),
            arr("Q2", &[1000.0]),
            arr("gpd", &[]),
        );
        assert!(matches!(result, Err(GpdError::EmptyArray(_))));
    }
}
