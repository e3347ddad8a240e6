//! Masked fill and masked reductions
//!
//! Every operation aligns the mask with [`process_mask`] and then hands the
//! aligned mask to the engine's `where`-aware kernels. Only elements whose
//! mask entry is `true` participate.

use crate::axis::{Axes, AxisSpec};
use crate::mask::process_mask;
use npf_core::ops::{
    max_where, mean_where, min_where, sum_where, where_op, MAX_IDENTITY, MIN_IDENTITY,
};
use npf_core::{Result, Tensor};
use scirs2_core::numeric::{Float, FromPrimitive, Zero};

/// Replace every element of `a` whose mask entry is `false` with `fill_value`.
///
/// The result has the shape of `a`.
///
/// # Example
/// ```
/// use npf_core::Tensor;
/// use npf_functional::{masked_fill, AxisSpec};
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let mask = Tensor::from_vec(vec![true, false], &[2]).unwrap();
/// let filled = masked_fill(&a, &mask, &AxisSpec::mask_axis(1), -1.0).unwrap();
/// assert_eq!(filled.to_vec(), vec![1.0, -1.0, 3.0, -1.0]);
/// ```
pub fn masked_fill<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    spec: &AxisSpec,
    fill_value: T,
) -> Result<Tensor<T>>
where
    T: Clone,
{
    let aligned = process_mask(a, mask, spec)?;
    where_op(&aligned, a, &Tensor::from_scalar(fill_value))
}

pub use self::masked_fill as apply_mask;

fn reduction_axes(axis: Option<Axes>) -> Option<Vec<i32>> {
    axis.map(|axes| axes.to_vec())
}

/// Sum over `axis` (every axis when `None`) of the elements selected by `mask`.
///
/// Slices without a selected element sum to zero.
pub fn masked_sum<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    axis: Option<Axes>,
    spec: &AxisSpec,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Clone + Zero + std::ops::Add<Output = T>,
{
    let aligned = process_mask(a, mask, spec)?;
    let axes = reduction_axes(axis);
    sum_where(a, &aligned, axes.as_deref(), keepdims)
}

/// Mean over `axis` of the elements selected by `mask`.
///
/// The denominator counts selected elements only; a slice with none is NaN.
pub fn masked_mean<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    axis: Option<Axes>,
    spec: &AxisSpec,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float + FromPrimitive,
{
    let aligned = process_mask(a, mask, spec)?;
    let axes = reduction_axes(axis);
    mean_where(a, &aligned, axes.as_deref(), keepdims)
}

/// Minimum over `axis` of the elements selected by `mask`; `+inf` for a slice
/// with none.
pub fn masked_min<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    axis: Option<Axes>,
    spec: &AxisSpec,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let aligned = process_mask(a, mask, spec)?;
    let axes = reduction_axes(axis);
    min_where(a, &aligned, axes.as_deref(), keepdims, MIN_IDENTITY.value())
}

/// Maximum over `axis` of the elements selected by `mask`; `-inf` for a slice
/// with none.
pub fn masked_max<T>(
    a: &Tensor<T>,
    mask: &Tensor<bool>,
    axis: Option<Axes>,
    spec: &AxisSpec,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let aligned = process_mask(a, mask, spec)?;
    let axes = reduction_axes(axis);
    max_where(a, &aligned, axes.as_deref(), keepdims, MAX_IDENTITY.value())
}
