//! Mask compatibility checks and alignment
//!
//! A mask is *maskable* against an array when it broadcasts to the array's
//! extents along the resolved mask axes. Alignment inserts a size-1 axis at
//! every non-mask position so the mask broadcasts against the full array.

use crate::axis::{process_mask_axis, AxisSet, AxisSpec};
use npf_core::ops::unsqueeze;
use npf_core::{ErrorContext, Result, Shape, Tensor, TensorError};

/// Extents of `array_shape` at the mask axes of `axes`, in ascending axis order.
fn mask_target(array_shape: &[usize], axes: &AxisSet) -> Option<Shape> {
    if axes.rank() != array_shape.len() {
        return None;
    }
    Some(Shape::new(
        axes.mask_axis().iter().map(|&d| array_shape[d]).collect(),
    ))
}

/// Whether a mask of shape `mask_shape` broadcasts to `array_shape` along the
/// mask axes of `axes`.
///
/// Returns `false` if `axes` partitions an array of a different rank.
pub fn is_maskable_shape(array_shape: &[usize], mask_shape: &[usize], axes: &AxisSet) -> bool {
    mask_target(array_shape, axes)
        .is_some_and(|target| Shape::from_slice(mask_shape).broadcasts_to(&target))
}

/// Shape the mask takes after alignment: its own extents at the mask axes
/// and `1` at every non-mask axis.
pub fn aligned_mask_shape(
    array_shape: &[usize],
    mask_shape: &[usize],
    axes: &AxisSet,
) -> Result<Vec<usize>> {
    if !is_maskable_shape(array_shape, mask_shape, axes) {
        return Err(not_maskable("aligned_mask_shape", array_shape, mask_shape, axes));
    }

    let mut mask_dims = mask_shape.iter().copied();
    let aligned = (0..axes.rank())
        .map(|d| {
            if axes.non_mask_axis().binary_search(&d).is_ok() {
                1
            } else {
                mask_dims.next().unwrap_or(1)
            }
        })
        .collect();
    Ok(aligned)
}

fn not_maskable(
    operation: &str,
    array_shape: &[usize],
    mask_shape: &[usize],
    axes: &AxisSet,
) -> TensorError {
    let reason = format!(
        "Mask shape must be broadcastable to the array along the mask axes: \
         array shape {:?}, mask shape {:?}, mask_axis {:?}",
        array_shape,
        mask_shape,
        axes.mask_axis()
    );
    let context = ErrorContext::new()
        .with_input_shape(array_shape)
        .with_input_shape(mask_shape)
        .with_metadata("mask_axis", format!("{:?}", axes.mask_axis()))
        .with_metadata("non_mask_axis", format!("{:?}", axes.non_mask_axis()));
    TensorError::invalid_shape(operation, reason, Some(mask_shape)).with_context(context)
}

/// Whether `mask` can be applied to `a` under `spec`.
///
/// # Errors
/// Propagates axis resolution failures; an incompatible extent is reported as
/// `Ok(false)`.
pub fn is_maskable<T>(a: &Tensor<T>, mask: &Tensor<bool>, spec: &AxisSpec) -> Result<bool> {
    let axes = process_mask_axis(a.rank(), mask.rank(), spec)?;
    Ok(is_maskable_shape(a.shape().dims(), mask.shape().dims(), &axes))
}

/// Align `mask` with `a` so the two broadcast elementwise.
///
/// The result has the rank of `a`, the mask's extents at the mask axes and
/// size-1 axes at every non-mask axis.
///
/// # Example
/// ```
/// use npf_core::Tensor;
/// use npf_functional::{process_mask, AxisSpec};
///
/// let a = Tensor::<f32>::zeros(&[4, 3]);
/// let mask = Tensor::from_vec(vec![true, false, true], &[3]).unwrap();
/// let aligned = process_mask(&a, &mask, &AxisSpec::mask_axis(1)).unwrap();
/// assert_eq!(aligned.shape().dims(), &[1, 3]);
/// ```
pub fn process_mask<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    spec: &AxisSpec,
) -> Result<Tensor<bool>> {
    let axes = process_mask_axis(a.rank(), mask.rank(), spec)?;
    let (array_shape, mask_shape) = (a.shape().dims(), mask.shape().dims());

    if !is_maskable_shape(array_shape, mask_shape, &axes) {
        return Err(not_maskable("process_mask", array_shape, mask_shape, &axes));
    }

    tracing::debug!(
        array = %a.shape(),
        mask = %mask.shape(),
        non_mask_axis = ?axes.non_mask_axis(),
        "aligning mask"
    );
    unsqueeze(mask, axes.non_mask_axis())
}
