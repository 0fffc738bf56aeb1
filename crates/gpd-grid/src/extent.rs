//! Value extents used for linear normalization.

use gpd_common::{GpdError, GpdResult, SampleArray};

/// Normalized value reported for every sample of a flat (min == max) array.
pub const DEGENERATE_NORMALIZED: f64 = 0.5;

/// Minimum and maximum of a sample array. Always `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    /// Scan `values` once for its extremes.
    ///
    /// NaN samples are skipped. Fails with [`GpdError::EmptyArray`] if no
    /// finite-comparable sample remains.
    pub fn scan(name: &str, values: &[f64]) -> GpdResult<Self> {
        let mut extremes: Option<(f64, f64)> = None;

        for &v in values {
            if v.is_nan() {
                continue;
            }
            extremes = Some(match extremes {
                None => (v, v),
                Some((min, max)) => (min.min(v), max.max(v)),
            });
        }

        extremes
            .map(|(min, max)| Self { min, max })
            .ok_or_else(|| GpdError::EmptyArray(name.to_string()))
    }

    /// Extent of a loaded sample array.
    pub fn of(array: &SampleArray) -> GpdResult<Self> {
        Self::scan(array.name(), array.values())
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    /// Map `value` linearly so that `min -> 0` and `max -> 1`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return DEGENERATE_NORMALIZED;
        }
        (value - self.min) / self.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_extremes() {
        let extent = Extent::scan("a", &[3.0, -1.0, 7.5, 0.0]).unwrap();
        assert_eq!(extent.min(), -1.0);
        assert_eq!(extent.max(), 7.5);
        assert_eq!(extent.span(), 8.5);
    }

    #[test]
    fn test_scan_single_value() {
        let extent = Extent::scan("a", &[4.0]).unwrap();
        assert_eq!(extent.min(), 4.0);
        assert_eq!(extent.max(), 4.0);
        assert!(extent.is_degenerate());
    }

    #[test]
    fn test_scan_empty_fails() {
        match Extent::scan("xi.bin", &[]) {
            Err(GpdError::EmptyArray(name)) => assert_eq!(name, "xi.bin"),
            other => panic!("expected EmptyArray, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_skips_nan() {
        let extent = Extent::scan("a", &[f64::NAN, 2.0, f64::NAN, -3.0]).unwrap();
        assert_eq!(extent.min(), -3.0);
        assert_eq!(extent.max(), 2.0);

        assert!(Extent::scan("a", &[f64::NAN, f64::NAN]).is_err());
    }

    #[test]
    fn test_normalize_endpoints() {
        let extent = Extent::scan("a", &[10.0, 30.0, 20.0]).unwrap();
        assert_eq!(extent.normalize(10.0), 0.0);
        assert_eq!(extent.normalize(30.0), 1.0);
        assert_eq!(extent.normalize(20.0), 0.5);
    }

    #[test]
    fn test_normalize_degenerate_is_constant() {
        let extent = Extent::scan("gpd", &[5.0; 8]).unwrap();
        assert_eq!(extent.normalize(5.0), DEGENERATE_NORMALIZED);
        assert!(!extent.normalize(5.0).is_nan());
    }

    #[test]
    fn test_scan_members_of_input() {
        let values: Vec<f64> = (0..50).map(|i| ((i * 37) % 23) as f64 - 11.0).collect();
        let extent = Extent::scan("a", &values).unwrap();
        assert!(extent.min() <= extent.max());
        assert!(values.contains(&extent.min()));
        assert!(values.contains(&extent.max()));
    }
}
