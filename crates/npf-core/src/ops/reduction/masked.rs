//! Predicate-aware reductions
//!
//! Each reduction takes a boolean `where_mask` that must broadcast to the input
//! shape. Only elements whose mask entry is `true` contribute; a reduced slice
//! without any selected element yields the operation's identity.

use super::common::ReductionPlan;
use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayViewD, Dimension, IxDyn};
use scirs2_core::numeric::{Float, FromPrimitive, Zero};

/// Value substituted for excluded elements of a min/max reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionIdentity {
    PositiveInfinity,
    NegativeInfinity,
}

impl ReductionIdentity {
    pub fn value<T: Float>(self) -> T {
        match self {
            Self::PositiveInfinity => T::infinity(),
            Self::NegativeInfinity => T::neg_infinity(),
        }
    }
}

/// Identity of a masked minimum; an empty slice reduces to `+inf`.
pub const MIN_IDENTITY: ReductionIdentity = ReductionIdentity::PositiveInfinity;

/// Identity of a masked maximum; an empty slice reduces to `-inf`.
pub const MAX_IDENTITY: ReductionIdentity = ReductionIdentity::NegativeInfinity;

fn broadcast_where<'a>(
    operation: &str,
    x_shape: &[usize],
    where_mask: &'a Tensor<bool>,
) -> Result<ArrayViewD<'a, bool>> {
    where_mask
        .array()
        .broadcast(IxDyn(x_shape))
        .ok_or_else(|| {
            TensorError::shape_mismatch(
                operation,
                &format!("where mask broadcastable to {x_shape:?}"),
                &where_mask.shape().to_string(),
            )
        })
}

/// Fold every selected element of `x` into a keepdims-shaped accumulator.
fn fold_where<T, A, F>(
    operation: &str,
    x: &Tensor<T>,
    where_mask: &Tensor<bool>,
    plan: &ReductionPlan,
    init: A,
    mut fold: F,
) -> Result<scirs2_core::ndarray::ArrayD<A>>
where
    A: Clone,
    F: FnMut(&mut A, &T),
{
    let selected = broadcast_where(operation, x.shape().dims(), where_mask)?;
    let mut acc = plan.accumulator(init);
    let mut slot = vec![0; x.rank()];

    for (index, value) in x.array().indexed_iter() {
        let index = index.slice();
        if !selected[index] {
            continue;
        }
        plan.project(index, &mut slot);
        fold(&mut acc[slot.as_slice()], value);
    }

    Ok(acc)
}

/// Sum of the elements selected by `where_mask`. Empty slices sum to zero.
pub fn sum_where<T>(
    x: &Tensor<T>,
    where_mask: &Tensor<bool>,
    axes: Option<&[i32]>,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Clone + Zero + std::ops::Add<Output = T>,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let acc = fold_where("sum_where", x, where_mask, &plan, T::zero(), |acc, v| {
        *acc = acc.clone() + v.clone();
    })?;
    plan.finish(acc)
}

/// Mean of the elements selected by `where_mask`.
///
/// The denominator is the number of selected elements in each slice, so a
/// slice with no selected element evaluates to `0 / 0 = NaN`.
pub fn mean_where<T>(
    x: &Tensor<T>,
    where_mask: &Tensor<bool>,
    axes: Option<&[i32]>,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float + FromPrimitive,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let acc = fold_where(
        "mean_where",
        x,
        where_mask,
        &plan,
        (T::zero(), 0usize),
        |(total, count), v| {
            *total = *total + *v;
            *count += 1;
        },
    )?;

    let mut means = Vec::with_capacity(acc.len());
    for &(total, count) in acc.iter() {
        let count = T::from_usize(count).ok_or_else(|| {
            TensorError::numerical_error(
                "mean_where",
                format!("element count {count} is not representable"),
            )
        })?;
        means.push(total / count);
    }

    let means = scirs2_core::ndarray::ArrayD::from_shape_vec(acc.raw_dim(), means)?;
    plan.finish(means)
}

/// Minimum of the elements selected by `where_mask`, starting from `initial`.
///
/// NaN inputs propagate.
pub fn min_where<T>(
    x: &Tensor<T>,
    where_mask: &Tensor<bool>,
    axes: Option<&[i32]>,
    keepdims: bool,
    initial: T,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let acc = fold_where("min_where", x, where_mask, &plan, initial, |acc, &v| {
        if v.is_nan() || v < *acc {
            *acc = v;
        }
    })?;
    plan.finish(acc)
}

/// Maximum of the elements selected by `where_mask`, starting from `initial`.
///
/// NaN inputs propagate.
pub fn max_where<T>(
    x: &Tensor<T>,
    where_mask: &Tensor<bool>,
    axes: Option<&[i32]>,
    keepdims: bool,
    initial: T,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let acc = fold_where("max_where", x, where_mask, &plan, initial, |acc, &v| {
        if v.is_nan() || v > *acc {
            *acc = v;
        }
    })?;
    plan.finish(acc)
}
