//! Shape Manipulation Operations
//!
//! These operations work with tensor metadata and layout rather than the values
//! themselves; the element order (row-major) is always preserved.

use crate::{Result, Shape, Tensor, TensorError};
use scirs2_core::ndarray::IxDyn;

/// Reshape a tensor to a new shape
///
/// The new shape must have the same total number of elements as the input.
pub fn reshape<T>(tensor: &Tensor<T>, shape: &[usize]) -> Result<Tensor<T>>
where
    T: Clone,
{
    let total_size: usize = shape.iter().product();
    let tensor_size = tensor.shape().size();

    if total_size != tensor_size {
        return Err(TensorError::invalid_shape(
            "reshape",
            format!(
                "Cannot reshape tensor of size {tensor_size} to shape {shape:?} (size {total_size})"
            ),
            Some(tensor.shape().dims()),
        ));
    }

    let new_array = tensor
        .array()
        .as_standard_layout()
        .into_owned()
        .into_shape_with_order(IxDyn(shape))?;

    Ok(Tensor::from_array(new_array))
}

/// Add a dimension of size 1 at the specified axis
pub fn expand_dims<T>(tensor: &Tensor<T>, axis: usize) -> Result<Tensor<T>>
where
    T: Clone,
{
    unsqueeze(tensor, &[axis])
}

/// Insert dimensions of size 1 at the given positions.
///
/// Positions index into the *result*, so a tensor of rank `r` unsqueezed at
/// `k` axes yields rank `r + k` with size-1 dimensions at exactly those
/// positions. Positions may be given in any order but must be unique.
pub fn unsqueeze<T>(tensor: &Tensor<T>, axes: &[usize]) -> Result<Tensor<T>>
where
    T: Clone,
{
    let original_shape = tensor.shape().dims();
    let new_rank = original_shape.len() + axes.len();

    for &axis in axes {
        if axis >= new_rank {
            return Err(TensorError::invalid_axis(
                "unsqueeze",
                axis as i64,
                new_rank,
            ));
        }
    }

    let mut sorted_axes = axes.to_vec();
    sorted_axes.sort_unstable();
    if let Some(pair) = sorted_axes.windows(2).find(|w| w[0] == w[1]) {
        return Err(TensorError::invalid_argument(
            "unsqueeze",
            format!("Duplicate axis {} in unsqueeze operation", pair[0]),
        ));
    }

    let mut new_shape = Vec::with_capacity(new_rank);
    let mut original = original_shape.iter();
    for i in 0..new_rank {
        if sorted_axes.binary_search(&i).is_ok() {
            new_shape.push(1);
        } else if let Some(&dim) = original.next() {
            new_shape.push(dim);
        }
    }

    reshape(tensor, &new_shape)
}

/// Broadcast tensor to a target shape following NumPy rules.
pub fn broadcast_to<T>(tensor: &Tensor<T>, target_shape: &[usize]) -> Result<Tensor<T>>
where
    T: Clone,
{
    let target = Shape::from_slice(target_shape);
    if !tensor.shape().broadcasts_to(&target) {
        return Err(TensorError::shape_mismatch(
            "broadcast_to",
            &format!("shape broadcastable to {target}"),
            &tensor.shape().to_string(),
        ));
    }

    let broadcasted = tensor.array().broadcast(IxDyn(target_shape)).ok_or_else(|| {
        TensorError::invalid_shape(
            "broadcast_to",
            format!("Broadcasting to shape {target_shape:?} failed"),
            Some(tensor.shape().dims()),
        )
    })?;

    Ok(Tensor::from_array(broadcasted.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape() {
        let t = Tensor::<f32>::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let r = reshape(&t, &[3, 2]).unwrap();
        assert_eq!(r.shape().dims(), &[3, 2]);
        assert_eq!(r.to_vec(), t.to_vec());

        assert!(reshape(&t, &[4, 2]).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_unsqueeze_positions_refer_to_result() {
        let t = Tensor::<f32>::zeros(&[4, 3]);
        assert_eq!(unsqueeze(&t, &[0]).unwrap().shape().dims(), &[1, 4, 3]);
        assert_eq!(unsqueeze(&t, &[1]).unwrap().shape().dims(), &[4, 1, 3]);
        assert_eq!(unsqueeze(&t, &[3, 0]).unwrap().shape().dims(), &[1, 4, 3, 1]);
        assert_eq!(unsqueeze(&t, &[]).unwrap().shape().dims(), &[4, 3]);
    }

    #[test]
    fn test_unsqueeze_rejects_bad_axes() {
        let t = Tensor::<f32>::zeros(&[4, 3]);
        assert!(unsqueeze(&t, &[3]).unwrap_err().is_shape_error());
        assert!(unsqueeze(&t, &[1, 1]).is_err());
    }

    #[test]
    fn test_expand_dims() {
        let t = Tensor::<i32>::from_vec(vec![1, 2, 3], &[3]).unwrap();
        let e = expand_dims(&t, 1).unwrap();
        assert_eq!(e.shape().dims(), &[3, 1]);
        assert_eq!(e.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_broadcast_to() {
        let t = Tensor::<i32>::from_vec(vec![1, 2, 3], &[1, 3]).unwrap();
        let b = broadcast_to(&t, &[2, 3]).unwrap();
        assert_eq!(b.to_vec(), vec![1, 2, 3, 1, 2, 3]);

        assert!(broadcast_to(&t, &[2, 4]).is_err());
    }
}
