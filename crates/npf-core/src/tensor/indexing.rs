//! Direct indexing for tensors using `tensor[&[i, j]]`.

use super::core::Tensor;
use std::ops::Index;

impl<T> Index<&[usize]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        if index.len() != self.array.ndim() {
            panic!(
                "Index dimension mismatch: expected {} dimensions, got {}",
                self.array.ndim(),
                index.len()
            );
        }
        self.array.get(index).expect("Index out of bounds")
    }
}
