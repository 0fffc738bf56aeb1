//! Common test fixtures for GPD viewer tests.
//!
//! This module provides pre-defined datasets and a helper that writes
//! them to disk in the layout the loader expects.

use std::io;
use std::path::Path;

use tempfile::TempDir;

use crate::generators::{create_constant_gpd, create_gpd_surface, create_ramp_gpd, encode_f64_le, linspace};

/// The small worked example: shape `[2, 3, 2, 2]` with samples `0..24`.
pub mod worked {
    /// Axis lengths in `(x, xi, t, Q2)` order.
    pub const SHAPE: [usize; 4] = [2, 3, 2, 2];

    pub const X: [f64; 2] = [0.0, 1.0];
    pub const XI: [f64; 3] = [10.0, 20.0, 30.0];
    pub const T: [f64; 2] = [100.0, 200.0];
    pub const Q2: [f64; 2] = [1000.0, 2000.0];
}

/// The five arrays of a dataset, before they are written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetFiles {
    pub x: Vec<f64>,
    pub xi: Vec<f64>,
    pub t: Vec<f64>,
    pub q2: Vec<f64>,
    pub gpd: Vec<f64>,
}

impl DatasetFiles {
    /// The worked example with `gpd_4d = 0..24`.
    pub fn worked_example() -> Self {
        Self {
            x: worked::X.to_vec(),
            xi: worked::XI.to_vec(),
            t: worked::T.to_vec(),
            q2: worked::Q2.to_vec(),
            gpd: create_ramp_gpd(worked::SHAPE),
        }
    }

    /// The worked example axes with every sample equal to `value`.
    pub fn flat(value: f64) -> Self {
        Self {
            gpd: create_constant_gpd(worked::SHAPE, value),
            ..Self::worked_example()
        }
    }

    /// A smooth synthetic surface with the given axis lengths.
    pub fn surface(nx: usize, nxi: usize, nt: usize, nq2: usize) -> Self {
        let x = linspace(0.05, 0.95, nx);
        let xi = linspace(-0.8, 0.8, nxi);
        let t = linspace(-1.5, -0.1, nt);
        let q2 = linspace(2.0, 100.0, nq2);
        let gpd = create_gpd_surface(&x, &xi, &t, &q2);
        Self { x, xi, t, q2, gpd }
    }

    /// Axis lengths in `(x, xi, t, Q2)` order.
    pub fn shape(&self) -> [usize; 4] {
        [self.x.len(), self.xi.len(), self.t.len(), self.q2.len()]
    }

    /// Write `x.bin`, `xi.bin`, `t.bin`, `Q2.bin` and `gpd_4d.bin` to `dir`.
    pub fn write_to(&self, dir: &Path) -> io::Result<()> {
        std::fs::write(dir.join("x.bin"), encode_f64_le(&self.x))?;
        std::fs::write(dir.join("xi.bin"), encode_f64_le(&self.xi))?;
        std::fs::write(dir.join("t.bin"), encode_f64_le(&self.t))?;
        std::fs::write(dir.join("Q2.bin"), encode_f64_le(&self.q2))?;
        std::fs::write(dir.join("gpd_4d.bin"), encode_f64_le(&self.gpd))?;
        Ok(())
    }

    /// Write the dataset into a fresh temporary directory.
    pub fn write_temp(&self) -> io::Result<TempDir> {
        let dir = TempDir::new()?;
        self.write_to(dir.path())?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example_shape() {
        let files = DatasetFiles::worked_example();
        assert_eq!(files.shape(), worked::SHAPE);
        assert_eq!(files.gpd.len(), 24);
    }

    #[test]
    fn test_write_temp_creates_all_files() {
        let dir = DatasetFiles::worked_example().write_temp().unwrap();
        for name in ["x.bin", "xi.bin", "t.bin", "Q2.bin", "gpd_4d.bin"] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }
        let gpd = std::fs::read(dir.path().join("gpd_4d.bin")).unwrap();
        assert_eq!(gpd.len(), 24 * 8);
    }
}
