//! Sample loading and strided access for the 4D GPD grid.
//!
//! The dataset is five flat arrays of little-endian `f64`: one per axis
//! (`x`, `xi`, `t`, `Q2`) and the flattened samples `gpd_4d`, stored
//! row-major with axes in that order.
//!
//! # Architecture
//!
//! ```text
//! DataRoot + DatasetLayout
//!      │
//!      ▼
//! GpdDataset::load  ── five ArrayLoader::load calls, joined once
//!      │
//!      ├─► Shape from axis lengths, NdView over gpd_4d (no copy)
//!      │
//!      └─► Extent per array, computed once
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gpd_grid::{ArrayLoader, DataRoot, DatasetLayout, GpdDataset};
//!
//! let loader = ArrayLoader::new()?;
//! let root = DataRoot::parse("./data");
//! let dataset = GpdDataset::load(&loader, &root, &DatasetLayout::default()).await?;
//! let value = dataset.view().get4(0, 3, 0, 7)?;
//! ```

pub mod config;
pub mod dataset;
pub mod extent;
pub mod loader;
pub mod view;

pub use config::{DataRoot, DatasetLayout};
pub use dataset::{DatasetExtents, GpdDataset};
pub use extent::{Extent, DEGENERATE_NORMALIZED};
pub use loader::{decode_f64_le, ArrayLoader, ArraySource};
pub use view::{NdView, Shape};
