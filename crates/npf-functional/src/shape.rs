//! Flatten/unflatten of axis ranges, axis repetition and range masks

use crate::axis::{Axes, Repeats};
use npf_core::ops::reduction::normalize_axis;
use npf_core::ops::{repeat, reshape, unsqueeze};
use npf_core::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayD, IxDyn};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What [`flatten`] collapsed, so that [`unflatten`] can restore it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FlattenMeta {
    original_shape: Vec<usize>,
    flattened_size: usize,
}

impl FlattenMeta {
    pub fn new(original_shape: Vec<usize>) -> Self {
        let flattened_size = original_shape.iter().product();
        Self {
            original_shape,
            flattened_size,
        }
    }

    /// Extents of the collapsed axes
    pub fn original_shape(&self) -> &[usize] {
        &self.original_shape
    }

    pub fn flattened_size(&self) -> usize {
        self.flattened_size
    }
}

/// Resolve a half-open range bound; `rank` itself is a valid bound.
fn range_bound(operation: &str, bound: i32, rank: usize) -> Result<usize> {
    let rank_i = rank as i64;
    let resolved = if bound < 0 {
        rank_i + i64::from(bound)
    } else {
        i64::from(bound)
    };
    if resolved < 0 || resolved > rank_i {
        return Err(TensorError::invalid_axis(operation, i64::from(bound), rank));
    }
    Ok(resolved as usize)
}

/// Collapse axes `start..stop` of `a` into one axis.
///
/// `start` defaults to `0` and `stop` to the rank; negative values count from
/// the end. An empty range inserts a size-1 axis at `start`.
///
/// # Example
/// ```
/// use npf_core::Tensor;
/// use npf_functional::flatten;
///
/// let a = Tensor::<f32>::zeros(&[2, 3, 4, 5]);
/// let (flat, meta) = flatten(&a, Some(1), Some(3)).unwrap();
/// assert_eq!(flat.shape().dims(), &[2, 12, 5]);
/// assert_eq!(meta.original_shape(), &[3, 4]);
/// ```
pub fn flatten<T>(
    a: &Tensor<T>,
    start: Option<i32>,
    stop: Option<i32>,
) -> Result<(Tensor<T>, FlattenMeta)>
where
    T: Clone,
{
    let dims = a.shape().dims();
    let rank = dims.len();
    let start = range_bound("flatten", start.unwrap_or(0), rank)?;
    let stop = match stop {
        Some(stop) => range_bound("flatten", stop, rank)?,
        None => rank,
    };
    if start > stop {
        return Err(TensorError::invalid_shape(
            "flatten",
            format!("start {start} is after stop {stop}"),
            Some(dims),
        ));
    }

    let meta = FlattenMeta::new(dims[start..stop].to_vec());
    let mut new_shape = Vec::with_capacity(rank - (stop - start) + 1);
    new_shape.extend_from_slice(&dims[..start]);
    new_shape.push(meta.flattened_size);
    new_shape.extend_from_slice(&dims[stop..]);

    tracing::debug!(from = %a.shape(), to = ?new_shape, "flatten");
    Ok((reshape(a, &new_shape)?, meta))
}

/// Expand `axis` of `a` back into the extents recorded in `meta`.
pub fn unflatten<T>(a: &Tensor<T>, meta: &FlattenMeta, axis: i32) -> Result<Tensor<T>>
where
    T: Clone,
{
    let dims = a.shape().dims();
    let axis = normalize_axis(axis, dims.len())?;
    if dims[axis] != meta.flattened_size {
        return Err(TensorError::shape_mismatch(
            "unflatten",
            &format!("axis {axis} of size {}", meta.flattened_size),
            &format!("size {} (shape {})", dims[axis], a.shape()),
        ));
    }

    let mut new_shape = Vec::with_capacity(dims.len() + meta.original_shape.len());
    new_shape.extend_from_slice(&dims[..axis]);
    new_shape.extend_from_slice(&meta.original_shape);
    new_shape.extend_from_slice(&dims[axis + 1..]);

    tracing::debug!(from = %a.shape(), to = ?new_shape, "unflatten");
    reshape(a, &new_shape)
}

/// Insert new axes at `axis` and repeat `a` along each of them.
///
/// Axis positions refer to the result, whose rank is `a.rank()` plus the
/// number of axes. Each new axis `axis[i]` has extent `repeats[i]`.
pub fn repeat_axis<T>(
    a: &Tensor<T>,
    repeats: impl Into<Repeats>,
    axis: impl Into<Axes>,
) -> Result<Tensor<T>>
where
    T: Clone,
{
    let repeats = repeats.into().to_vec();
    let axis = axis.into().to_vec();
    if repeats.len() != axis.len() {
        return Err(TensorError::invalid_configuration(
            "repeat_axis",
            format!(
                "{} repeat counts given for {} axes",
                repeats.len(),
                axis.len()
            ),
        ));
    }

    let out_rank = a.rank() + axis.len();
    let positions = axis
        .iter()
        .map(|&d| normalize_axis(d, out_rank))
        .collect::<Result<Vec<_>>>()?;

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(TensorError::invalid_configuration(
            "repeat_axis",
            format!("axis {} is listed more than once in {axis:?}", pair[0]),
        ));
    }

    let mut out = unsqueeze(a, &positions)?;
    for (&count, &position) in repeats.iter().zip(&positions) {
        out = repeat(&out, count, Some(position))?;
    }
    Ok(out)
}

/// Boolean vector of length `n` that is `true` exactly on `start..stop`.
///
/// `stop` defaults to `n`; an empty or inverted range yields all `false`.
/// Bounds are absolute positions: negative bounds are not supported, and a
/// bound past `n` behaves like `n`.
///
/// # Example
/// ```
/// use npf_functional::get_mask;
///
/// let mask = get_mask(5, 1, Some(3));
/// assert_eq!(mask.to_vec(), vec![false, true, true, false, false]);
/// ```
pub fn get_mask(n: usize, start: usize, stop: Option<usize>) -> Tensor<bool> {
    let stop = stop.unwrap_or(n);
    Tensor::from_array(ArrayD::from_shape_fn(IxDyn(&[n]), |index| {
        let i = index[0];
        start <= i && i < stop
    }))
}
