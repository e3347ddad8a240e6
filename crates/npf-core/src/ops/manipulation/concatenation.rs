//! Repetition along an axis

use super::shape::reshape;
use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayD, IxDyn};

/// Repeat each element of a tensor `repeats` times along `axis`.
///
/// With `axis = None` the tensor is flattened first. Element `i` of the input
/// along `axis` lands at positions `i * repeats .. (i + 1) * repeats` of the
/// output.
pub fn repeat<T>(tensor: &Tensor<T>, repeats: usize, axis: Option<usize>) -> Result<Tensor<T>>
where
    T: Clone,
{
    let (source, axis) = match axis {
        Some(axis) => {
            if axis >= tensor.rank() {
                return Err(TensorError::invalid_axis(
                    "repeat",
                    axis as i64,
                    tensor.rank(),
                ));
            }
            (tensor.clone(), axis)
        }
        None => (reshape(tensor, &[tensor.size()])?, 0),
    };

    let array = source.array();
    let mut out_shape = source.shape().to_vec();
    out_shape[axis] *= repeats;

    let result = ArrayD::from_shape_fn(IxDyn(&out_shape), |index| {
        let mut src = index;
        src[axis] /= repeats;
        array[src].clone()
    });

    Ok(Tensor::from_array(result))
}
