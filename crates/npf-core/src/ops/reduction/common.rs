//! Common helper functions for reduction operations

use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayD, IxDyn};

/// Normalize negative axis indices
///
/// Converts negative axis indices to positive ones and validates that the axis
/// is within the valid range for a tensor of the given rank.
///
/// # Examples
/// ```
/// use npf_core::ops::reduction::normalize_axis;
/// assert_eq!(normalize_axis(0, 3).unwrap(), 0);
/// assert_eq!(normalize_axis(-1, 3).unwrap(), 2);
/// assert!(normalize_axis(3, 3).is_err());
/// assert!(normalize_axis(-4, 3).is_err());
/// ```
pub fn normalize_axis(axis: i32, rank: usize) -> Result<usize> {
    let rank_i = rank as i64;
    let normalized = if axis < 0 {
        rank_i + i64::from(axis)
    } else {
        i64::from(axis)
    };
    if normalized < 0 || normalized >= rank_i {
        Err(TensorError::invalid_axis("normalize_axis", i64::from(axis), rank))
    } else {
        Ok(normalized as usize)
    }
}

/// Normalize a reduction axis list. `None` selects every axis.
///
/// The result is sorted ascending; repeated axes are rejected.
pub fn normalize_axes(axes: Option<&[i32]>, rank: usize) -> Result<Vec<usize>> {
    let mut normalized = match axes {
        Some(axes) => axes
            .iter()
            .map(|&a| normalize_axis(a, rank))
            .collect::<Result<Vec<_>>>()?,
        None => (0..rank).collect(),
    };
    normalized.sort_unstable();
    if let Some(pair) = normalized.windows(2).find(|w| w[0] == w[1]) {
        return Err(TensorError::invalid_argument(
            "reduction",
            format!("Duplicate axis {} in reduction", pair[0]),
        ));
    }
    Ok(normalized)
}

/// Shape left after reducing `axes` of `dims`.
pub fn reduced_shape(dims: &[usize], axes: &[usize], keepdims: bool) -> Vec<usize> {
    dims.iter()
        .enumerate()
        .filter_map(|(i, &dim)| match (axes.contains(&i), keepdims) {
            (false, _) => Some(dim),
            (true, true) => Some(1),
            (true, false) => None,
        })
        .collect()
}

/// Index bookkeeping for an elementwise fold into a reduced accumulator.
///
/// The accumulator always has the keepdims shape; [`ReductionPlan::finish`]
/// drops the reduced axes afterwards when requested.
#[derive(Debug, Clone)]
pub(crate) struct ReductionPlan {
    reduce: Vec<bool>,
    keep_shape: Vec<usize>,
    out_shape: Vec<usize>,
}

impl ReductionPlan {
    pub(crate) fn new(dims: &[usize], axes: Option<&[i32]>, keepdims: bool) -> Result<Self> {
        let axes = normalize_axes(axes, dims.len())?;
        tracing::trace!(?dims, ?axes, keepdims, "reduction plan");
        let mut reduce = vec![false; dims.len()];
        for &axis in &axes {
            reduce[axis] = true;
        }
        Ok(Self {
            reduce,
            keep_shape: reduced_shape(dims, &axes, true),
            out_shape: reduced_shape(dims, &axes, keepdims),
        })
    }

    /// Accumulator filled with `init`, in keepdims shape.
    pub(crate) fn accumulator<A: Clone>(&self, init: A) -> ArrayD<A> {
        ArrayD::from_elem(IxDyn(&self.keep_shape), init)
    }

    /// Map an input index onto its accumulator slot.
    pub(crate) fn project(&self, index: &[usize], out: &mut [usize]) {
        for ((slot, &i), &reduced) in out.iter_mut().zip(index).zip(&self.reduce) {
            *slot = if reduced { 0 } else { i };
        }
    }

    pub(crate) fn finish<A>(&self, acc: ArrayD<A>) -> Result<Tensor<A>> {
        let array = acc.into_shape_with_order(IxDyn(&self.out_shape))?;
        Ok(Tensor::from_array(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axes() {
        assert_eq!(normalize_axes(None, 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(normalize_axes(Some(&[-1, 0]), 3).unwrap(), vec![0, 2]);
        assert!(normalize_axes(Some(&[1, -2]), 3).is_err());
        assert!(normalize_axes(Some(&[3]), 3).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_reduced_shape() {
        assert_eq!(reduced_shape(&[2, 3, 4], &[1], false), vec![2, 4]);
        assert_eq!(reduced_shape(&[2, 3, 4], &[0, 2], true), vec![1, 3, 1]);
        assert_eq!(reduced_shape(&[2, 3], &[0, 1], false), Vec::<usize>::new());
    }

    #[test]
    fn test_plan_projection() {
        let plan = ReductionPlan::new(&[2, 3, 4], Some(&[1]), false).unwrap();
        let mut out = vec![0; 3];
        plan.project(&[1, 2, 3], &mut out);
        assert_eq!(out, vec![1, 0, 3]);

        let acc = plan.accumulator(0i32);
        assert_eq!(acc.shape(), &[2, 1, 4]);
        assert_eq!(plan.finish(acc).unwrap().shape().dims(), &[2, 4]);
    }
}
