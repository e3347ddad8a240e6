//! Statistical reduction operations
//!
//! Plain (unmasked) reductions along specified axes:
//! - `sum`: Sum reduction along specified axes
//! - `mean`: Mean (average) reduction along specified axes
//! - `max`: Maximum value reduction along specified axes
//! - `min`: Minimum value reduction along specified axes

use super::common::normalize_axes;
use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayD, Axis, IxDyn};
use scirs2_core::numeric::{Float, FromPrimitive, Zero};

/// Sum reduction along specified axes
///
/// Computes the sum of tensor elements along the specified axes.
/// If no axes are specified, computes the sum of all elements.
///
/// # Arguments
/// * `x` - Input tensor
/// * `axes` - Optional slice of axis indices to reduce along
/// * `keepdims` - Whether to keep reduced dimensions as size 1
pub fn sum<T>(x: &Tensor<T>, axes: Option<&[i32]>, keepdims: bool) -> Result<Tensor<T>>
where
    T: Clone + Zero + std::ops::Add<Output = T>,
{
    let arr = x.array();
    if let Some(axes) = axes {
        let mut result = arr.to_owned();

        // Descending order so earlier removals don't shift later axes
        let sorted_axes = normalize_axes(Some(axes), x.rank())?;
        for &axis in sorted_axes.iter().rev() {
            result = result.sum_axis(Axis(axis));
            if keepdims {
                result = result.insert_axis(Axis(axis));
            }
        }

        Ok(Tensor::from_array(result))
    } else {
        let sum = arr.sum();
        Ok(Tensor::from_array(full_reduction(x.rank(), sum, keepdims)))
    }
}

/// Mean reduction along specified axes
///
/// Computes the mean (average) of tensor elements along the specified axes.
/// If no axes are specified, computes the mean of all elements.
///
/// # Errors
/// Fails when a reduced axis has length zero.
pub fn mean<T>(x: &Tensor<T>, axes: Option<&[i32]>, keepdims: bool) -> Result<Tensor<T>>
where
    T: Float + FromPrimitive,
{
    let arr = x.array();
    let empty = || {
        TensorError::invalid_argument(
            "mean",
            format!("Cannot compute mean over an empty axis of shape {}", x.shape()),
        )
    };

    if let Some(axes) = axes {
        let mut result = arr.to_owned();

        let sorted_axes = normalize_axes(Some(axes), x.rank())?;
        for &axis in sorted_axes.iter().rev() {
            result = result.mean_axis(Axis(axis)).ok_or_else(empty)?;
            if keepdims {
                result = result.insert_axis(Axis(axis));
            }
        }

        Ok(Tensor::from_array(result))
    } else {
        let mean_val = arr.mean().ok_or_else(empty)?;
        Ok(Tensor::from_array(full_reduction(x.rank(), mean_val, keepdims)))
    }
}

/// Maximum value reduction along specified axes
///
/// # Errors
/// Fails on an empty tensor, which has no maximum.
pub fn max<T>(x: &Tensor<T>, axes: Option<&[i32]>, keepdims: bool) -> Result<Tensor<T>>
where
    T: Float,
{
    extremum(x, axes, keepdims, "max", T::neg_infinity(), |acc, v| v > acc)
}

/// Minimum value reduction along specified axes
///
/// # Errors
/// Fails on an empty tensor, which has no minimum.
pub fn min<T>(x: &Tensor<T>, axes: Option<&[i32]>, keepdims: bool) -> Result<Tensor<T>>
where
    T: Float,
{
    extremum(x, axes, keepdims, "min", T::infinity(), |acc, v| v < acc)
}

fn extremum<T, F>(
    x: &Tensor<T>,
    axes: Option<&[i32]>,
    keepdims: bool,
    operation: &str,
    init: T,
    better: F,
) -> Result<Tensor<T>>
where
    T: Float,
    F: Fn(T, T) -> bool,
{
    let arr = x.array();
    if arr.is_empty() {
        return Err(TensorError::invalid_argument(
            operation,
            format!("Cannot compute {operation} of empty tensor"),
        ));
    }

    let pick = |acc: &T, v: &T| if v.is_nan() || better(*acc, *v) { *v } else { *acc };

    if let Some(axes) = axes {
        let mut result = arr.to_owned();

        let sorted_axes = normalize_axes(Some(axes), x.rank())?;
        for &axis in sorted_axes.iter().rev() {
            result = result.fold_axis(Axis(axis), init, |acc, v| pick(acc, v));
            if keepdims {
                result = result.insert_axis(Axis(axis));
            }
        }

        Ok(Tensor::from_array(result))
    } else {
        let value = arr.fold(init, |acc, v| pick(&acc, v));
        Ok(Tensor::from_array(full_reduction(x.rank(), value, keepdims)))
    }
}

fn full_reduction<T: Clone>(rank: usize, value: T, keepdims: bool) -> ArrayD<T> {
    if keepdims {
        ArrayD::from_elem(IxDyn(&vec![1; rank]), value)
    } else {
        ArrayD::from_elem(IxDyn(&[]), value)
    }
}
