//! A minimal owned, row-major tensor.
//!
//! Only the operations the STFT needs are provided: construction with shape
//! checking, slicing and stacking along the leading axis, and element-wise
//! mapping.

pub mod sample;

pub use sample::Sample;

use crate::error::{Result, StftError};

/// An n-dimensional array stored contiguously in row-major order.
///
/// A 0-D tensor (empty shape) holds exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> Tensor<T> {
    /// Builds a tensor from `data` laid out in row-major order.
    ///
    /// Fails if the number of elements does not match `shape`.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();

        if data.len() != expected {
            return Err(StftError::ShapeMismatch {
                expected: shape.to_vec(),
                actual: vec![data.len()],
            });
        }

        Ok(Self { shape: shape.to_vec(), data })
    }

    /// A 1-D tensor holding `data`.
    pub fn from_1d(data: Vec<T>) -> Self {
        Self { shape: vec![data.len()], data }
    }

    /// The shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat, row-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the tensor, returning its flat data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Size of the last axis, or `0` for a 0-D tensor.
    pub fn last_dim(&self) -> usize {
        self.shape.last().copied().unwrap_or(0)
    }

    /// Shape of all axes except the last.
    pub fn batch_shape(&self) -> &[usize] {
        &self.shape[..self.shape.len().saturating_sub(1)]
    }

    /// Applies `f` to every element, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Tensor<U> {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Tensor<T> {
    /// Copies out the sub-tensor at `index` along the leading axis.
    pub fn index_leading(&self, index: usize) -> Result<Self> {
        let Some((&leading, rest)) = self.shape.split_first() else {
            return Err(StftError::invalid(
                "tensor",
                "cannot index the leading axis of a 0-D tensor",
            ));
        };

        if index >= leading {
            return Err(StftError::invalid(
                "index",
                format!("index {index} out of range for leading axis of size {leading}"),
            ));
        }

        let stride: usize = rest.iter().product();
        let start = index * stride;

        Ok(Self {
            shape: rest.to_vec(),
            data: self.data[start..start + stride].to_vec(),
        })
    }

    /// Stacks tensors of identical shape along a new leading axis.
    pub fn stack(items: &[Self]) -> Result<Self> {
        let Some(first) = items.first() else {
            return Err(StftError::invalid("items", "cannot stack zero tensors"));
        };

        let mut shape = Vec::with_capacity(first.ndim() + 1);
        shape.push(items.len());
        shape.extend_from_slice(first.shape());

        let mut data = Vec::with_capacity(first.len() * items.len());

        for item in items {
            if item.shape != first.shape {
                return Err(StftError::ShapeMismatch {
                    expected: first.shape.clone(),
                    actual: item.shape.clone(),
                });
            }
            data.extend_from_slice(&item.data);
        }

        Ok(Self { shape, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_element_count() {
        assert!(Tensor::from_vec(vec![0.0; 6], &[2, 3]).is_ok());
        assert!(matches!(
            Tensor::from_vec(vec![0.0; 5], &[2, 3]),
            Err(StftError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn zero_dim_tensor_has_one_element() {
        let t = Tensor::from_vec(vec![1.0], &[]).unwrap();
        assert_eq!(t.ndim(), 0);
        assert_eq!(t.last_dim(), 0);
        assert!(t.batch_shape().is_empty());
    }

    #[test]
    fn batch_shape_drops_last_axis() {
        let t = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        assert_eq!(t.batch_shape(), &[2]);
        assert_eq!(t.last_dim(), 3);
    }

    #[test]
    fn index_then_stack_restores_tensor() {
        let t = Tensor::from_vec((0..24).collect::<Vec<i32>>(), &[4, 2, 3])
            .unwrap();

        let parts: Vec<_> =
            (0..4).map(|i| t.index_leading(i).unwrap()).collect();

        assert_eq!(parts[1].shape(), &[2, 3]);
        assert_eq!(parts[1].data(), &[6, 7, 8, 9, 10, 11]);
        assert_eq!(Tensor::stack(&parts).unwrap(), t);
    }

    #[test]
    fn index_out_of_range() {
        let t = Tensor::from_1d(vec![1, 2, 3]);
        assert!(t.index_leading(3).is_err());
        assert!(Tensor::from_vec(vec![1], &[]).unwrap().index_leading(0).is_err());
    }

    #[test]
    fn stack_rejects_mismatched_shapes() {
        let a = Tensor::from_1d(vec![1, 2]);
        let b = Tensor::from_1d(vec![1, 2, 3]);
        assert!(Tensor::stack(&[a, b]).is_err());
        assert!(Tensor::<i32>::stack(&[]).is_err());
    }
}
