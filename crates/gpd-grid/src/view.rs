//! Strided read-only view over a flat sample array.

use gpd_common::{Axis, GpdError, GpdResult, SampleArray};

/// Axis lengths of an N-dimensional grid, outermost axis first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    dims: Vec<usize>,
    size: usize,
}

impl Shape {
    /// Create a shape. Every axis must be non-empty.
    pub fn new(dims: Vec<usize>) -> GpdResult<Self> {
        if dims.is_empty() {
            return Err(GpdError::InvalidConfig("shape must have at least one axis".to_string()));
        }

        let mut size: usize = 1;
        for (dim, &n) in dims.iter().enumerate() {
            if n == 0 {
                return Err(GpdError::EmptyArray(Axis::for_dim(dims.len(), dim).to_string()));
            }
            size = size.checked_mul(n).ok_or_else(|| {
                GpdError::InvalidConfig(format!("shape {:?} overflows usize", dims))
            })?;
        }

        Ok(Self { dims, size })
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Length of axis `dim`, or `None` past the rank.
    pub fn dim(&self, dim: usize) -> Option<usize> {
        self.dims.get(dim).copied()
    }

    /// Total number of samples (product of all axis lengths). Never zero.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major strides: the last axis has stride 1 and each earlier axis
    /// the product of all later axis lengths.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.dims.len()];
        for k in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * self.dims[k + 1];
        }
        strides
    }
}

/// Read-only N-dimensional view of a [`SampleArray`].
///
/// The view shares the array buffer; lookups are O(1).
#[derive(Debug, Clone)]
pub struct NdView {
    samples: SampleArray,
    shape: Shape,
    strides: Vec<usize>,
}

impl NdView {
    /// Wrap `samples` with `shape`. Fails if the sample count differs from
    /// the product of the axis lengths.
    pub fn new(samples: SampleArray, shape: Shape) -> GpdResult<Self> {
        if samples.len() != shape.size() {
            return Err(GpdError::ShapeMismatch {
                shape: shape.dims().to_vec(),
                expected: shape.size(),
                actual: samples.len(),
            });
        }

        let strides = shape.strides();
        Ok(Self {
            samples,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn samples(&self) -> &SampleArray {
        &self.samples
    }

    /// Flat offset of a multi-index.
    pub fn offset_of(&self, index: &[usize]) -> GpdResult<usize> {
        let rank = self.shape.rank();
        if index.len() != rank {
            return Err(GpdError::RankMismatch {
                expected: rank,
                actual: index.len(),
            });
        }

        let mut offset = 0;
        let dims = self.shape.dims().iter().zip(&self.strides);
        for (dim, (&i, (&len, &stride))) in index.iter().zip(dims).enumerate() {
            if i >= len {
                return Err(GpdError::IndexOutOfRange {
                    axis: Axis::for_dim(rank, dim),
                    index: i,
                    len,
                });
            }
            offset += i * stride;
        }
        Ok(offset)
    }

    /// Multi-index of a flat offset, or `None` past the end.
    pub fn unravel(&self, offset: usize) -> Option<Vec<usize>> {
        if offset >= self.shape.size() {
            return None;
        }

        let mut rest = offset;
        let index = self
            .strides
            .iter()
            .map(|&stride| {
                let i = rest / stride;
                rest %= stride;
                i
            })
            .collect();
        Some(index)
    }

    /// Sample at a multi-index.
    pub fn get(&self, index: &[usize]) -> GpdResult<f64> {
        let offset = self.offset_of(index)?;
        Ok(self.samples[offset])
    }

    /// Sample at `(x, xi, t, Q2)` of a rank-4 GPD view.
    #[inline]
    pub fn get4(&self, x: usize, xi: usize, t: usize, q2: usize) -> GpdResult<f64> {
        self.get(&[x, xi, t, q2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> SampleArray {
        SampleArray::new("ramp", (0..n).map(|i| i as f64).collect())
    }

    #[test]
    fn test_strides_row_major() {
        let shape = Shape::new(vec![2, 3, 2, 2]).unwrap();
        assert_eq!(shape.strides(), vec![12, 4, 2, 1]);
        assert_eq!(shape.size(), 24);
    }

    #[test]
    fn test_dim_past_rank_is_none() {
        let shape = Shape::new(vec![2, 3]).unwrap();
        assert_eq!(shape.dim(1), Some(3));
        assert_eq!(shape.dim(2), None);
    }

    #[test]
    fn test_shape_rejects_empty_axis() {
        match Shape::new(vec![2, 0, 3, 1]) {
            Err(GpdError::EmptyArray(axis)) => assert_eq!(axis, "xi"),
            other => panic!("expected EmptyArray, got {:?}", other),
        }
        assert!(Shape::new(vec![]).is_err());
    }

    #[test]
    fn test_view_rejects_length_mismatch() {
        let shape = Shape::new(vec![2, 3, 2, 2]).unwrap();
        match NdView::new(ramp(23), shape) {
            Err(GpdError::ShapeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 24);
                assert_eq!(actual, 23);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_get_out_of_range_names_axis() {
        let view = NdView::new(ramp(24), Shape::new(vec![2, 3, 2, 2]).unwrap()).unwrap();
        match view.get4(0, 0, 2, 0) {
            Err(GpdError::IndexOutOfRange { axis, index, len }) => {
                assert_eq!(axis, Axis::T);
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_get_wrong_rank() {
        let view = NdView::new(ramp(6), Shape::new(vec![2, 3]).unwrap()).unwrap();
        assert!(matches!(
            view.get(&[1, 1, 1]),
            Err(GpdError::RankMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert_eq!(view.get(&[1, 2]).unwrap(), 5.0);
    }

    #[test]
    fn test_view_shares_buffer() {
        let samples = ramp(24);
        let view = NdView::new(samples.clone(), Shape::new(vec![2, 3, 2, 2]).unwrap()).unwrap();
        assert!(std::ptr::eq(
            view.samples().values().as_ptr(),
            samples.values().as_ptr()
        ));
    }

    #[test]
    fn test_unravel_past_end() {
        let view = NdView::new(ramp(6), Shape::new(vec![3, 2]).unwrap()).unwrap();
        assert_eq!(view.unravel(5), Some(vec![2, 1]));
        assert_eq!(view.unravel(6), None);
    }
}
