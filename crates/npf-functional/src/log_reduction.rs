//! Log-domain sum and mean of exponentials

use crate::axis::Axes;
use npf_core::ops::reduction::normalize_axis;
use npf_core::{ops, Result, Tensor, TensorError};
use scirs2_core::numeric::{Float, FromPrimitive};

/// `log(sum(b * exp(a)))` over `axis`, computed stably.
///
/// `axis = None` reduces every axis. `b` scales each exponential and must
/// broadcast to `a`. A slice whose scaled sum is negative is NaN; see
/// [`logsumexp_with_sign`].
pub fn logsumexp<T>(
    a: &Tensor<T>,
    axis: Option<Axes>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let axes = axis.map(|axes| axes.to_vec());
    ops::logsumexp(a, axes.as_deref(), b, keepdims)
}

/// [`logsumexp`] returning `(log(|sum|), sign(sum))`.
pub fn logsumexp_with_sign<T>(
    a: &Tensor<T>,
    axis: Option<Axes>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<(Tensor<T>, Tensor<T>)>
where
    T: Float,
{
    let axes = axis.map(|axes| axes.to_vec());
    ops::logsumexp_with_sign(a, axes.as_deref(), b, keepdims)
}

/// Number of terms a log-mean divides by.
///
/// A single axis divides by that axis' extent and no axis by the total size.
/// A sequence of `k` axes divides by the product of the leading `k` extents
/// of `a`, whichever axes were listed.
fn mean_divider(dims: &[usize], axis: Option<&Axes>) -> Result<usize> {
    match axis {
        None => Ok(dims.iter().product()),
        Some(Axes::One(d)) => Ok(dims[normalize_axis(*d, dims.len())?]),
        Some(Axes::Many(axes)) => Ok(dims.iter().take(axes.len()).product()),
    }
}

fn log_divider<T: Float + FromPrimitive>(dims: &[usize], axis: Option<&Axes>) -> Result<T> {
    let divider = mean_divider(dims, axis)?;
    let divider = T::from_usize(divider).ok_or_else(|| {
        TensorError::numerical_error(
            "logmeanexp",
            format!("divider {divider} is not representable"),
        )
    })?;
    Ok(divider.ln())
}

/// `log(mean(b * exp(a)))` over `axis`: [`logsumexp`] minus the log of the
/// number of terms.
///
/// # Example
/// ```
/// use npf_core::Tensor;
/// use npf_functional::logmeanexp;
///
/// let a = Tensor::<f64>::zeros(&[3, 4]);
/// let out = logmeanexp(&a, Some(1.into()), None, false).unwrap();
/// assert_eq!(out.to_vec(), vec![0.0, 0.0, 0.0]);
/// ```
pub fn logmeanexp<T>(
    a: &Tensor<T>,
    axis: Option<Axes>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float + FromPrimitive,
{
    let lse = logsumexp(a, axis.clone(), b, keepdims)?;
    let log_div: T = log_divider(a.shape().dims(), axis.as_ref())?;
    Ok(lse.map(|&v| v - log_div))
}

/// [`logmeanexp`] returning `(log(|mean|), sign(mean))`.
pub fn logmeanexp_with_sign<T>(
    a: &Tensor<T>,
    axis: Option<Axes>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<(Tensor<T>, Tensor<T>)>
where
    T: Float + FromPrimitive,
{
    let (lse, sign) = logsumexp_with_sign(a, axis.clone(), b, keepdims)?;
    let log_div: T = log_divider(a.shape().dims(), axis.as_ref())?;
    Ok((lse.map(|&v| v - log_div), sign))
}
