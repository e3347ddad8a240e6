//! Core Tensor Structure and Properties

use crate::Shape;
use scirs2_core::ndarray::ArrayD;

/// Dense, CPU-resident n-dimensional tensor.
///
/// Tensors are values: every operation in this crate returns a new tensor and
/// leaves its inputs untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    pub(crate) array: ArrayD<T>,
    pub(crate) shape: Shape,
}

impl<T> Tensor<T> {
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Borrow the underlying ndarray
    pub fn array(&self) -> &ArrayD<T> {
        &self.array
    }

    /// Get the value at a specific index
    pub fn get(&self, index: &[usize]) -> Option<T>
    where
        T: Clone,
    {
        if index.len() != self.array.ndim() {
            return None;
        }
        self.array.get(index).cloned()
    }

    /// Get the underlying data as a slice if it is laid out contiguously
    pub fn as_slice(&self) -> Option<&[T]> {
        self.array.as_slice()
    }

    /// Copy the elements out in row-major order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.array.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.size() == 0
    }

    /// Get the total number of elements
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Get the number of dimensions
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Alias for [`Tensor::rank`]
    pub fn ndim(&self) -> usize {
        self.shape.rank()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.rank() == 0
    }

    /// Apply `f` to every element, producing a tensor of the same shape
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U,
    {
        Tensor {
            array: self.array.map(f),
            shape: self.shape.clone(),
        }
    }
}
