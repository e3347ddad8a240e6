//! Numerically stable log-sum-exp
//!
//! `log(sum(b * exp(x)))` is evaluated as `m + log(sum(b * exp(x - m)))` where
//! `m` is the per-slice maximum of `x` over entries with non-zero scale. A
//! non-finite maximum is replaced by zero so that all `-inf` or `+inf` slices
//! produce `-inf` / `+inf` instead of NaN.

use super::common::ReductionPlan;
use crate::{Result, Tensor, TensorError};
use scirs2_core::ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn, Zip};
use scirs2_core::numeric::Float;

/// Log of the summed exponentials of `x` over `axes`.
///
/// `b` optionally scales each exponential and must broadcast to the shape of
/// `x`. Without the sign, a slice whose scaled sum is negative evaluates to
/// NaN; use [`logsumexp_with_sign`] to recover the sign in that case.
pub fn logsumexp<T>(
    x: &Tensor<T>,
    axes: Option<&[i32]>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<Tensor<T>>
where
    T: Float,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let (log_abs, sign) = log_abs_sum_exp(x, b, &plan)?;

    let out = Zip::from(&log_abs)
        .and(&sign)
        .map_collect(|&value, &s| if s < T::zero() { T::nan() } else { value });
    plan.finish(out)
}

/// Like [`logsumexp`] but returns `(log(|sum|), sign(sum))`.
///
/// The sign tensor holds `-1`, `0` or `1` and has the same shape as the
/// magnitude tensor.
pub fn logsumexp_with_sign<T>(
    x: &Tensor<T>,
    axes: Option<&[i32]>,
    b: Option<&Tensor<T>>,
    keepdims: bool,
) -> Result<(Tensor<T>, Tensor<T>)>
where
    T: Float,
{
    let plan = ReductionPlan::new(x.shape().dims(), axes, keepdims)?;
    let (log_abs, sign) = log_abs_sum_exp(x, b, &plan)?;
    Ok((plan.finish(log_abs)?, plan.finish(sign)?))
}

fn broadcast_scale<'a, T>(x: &Tensor<T>, b: &'a Tensor<T>) -> Result<ArrayViewD<'a, T>> {
    b.array().broadcast(IxDyn(x.shape().dims())).ok_or_else(|| {
        TensorError::shape_mismatch(
            "logsumexp",
            &format!("scale broadcastable to {}", x.shape()),
            &b.shape().to_string(),
        )
    })
}

fn log_abs_sum_exp<T>(
    x: &Tensor<T>,
    b: Option<&Tensor<T>>,
    plan: &ReductionPlan,
) -> Result<(ArrayD<T>, ArrayD<T>)>
where
    T: Float,
{
    let scale = b.map(|b| broadcast_scale(x, b)).transpose()?;
    let scale_at = |index: &[usize]| scale.as_ref().map_or(T::one(), |s| s[index]);
    let mut slot = vec![0; x.rank()];

    let mut amax = plan.accumulator(T::neg_infinity());
    for (index, &value) in x.array().indexed_iter() {
        let index = index.slice();
        if scale_at(index) == T::zero() {
            continue;
        }
        plan.project(index, &mut slot);
        let current = &mut amax[slot.as_slice()];
        if value.is_nan() || value > *current {
            *current = value;
        }
    }
    amax.mapv_inplace(|m| if m.is_finite() { m } else { T::zero() });

    let mut sum_exp = plan.accumulator(T::zero());
    for (index, &value) in x.array().indexed_iter() {
        let index = index.slice();
        let s = scale_at(index);
        if s == T::zero() {
            continue;
        }
        plan.project(index, &mut slot);
        let shift = amax[slot.as_slice()];
        sum_exp[slot.as_slice()] = sum_exp[slot.as_slice()] + s * (value - shift).exp();
    }

    let sign = sum_exp.mapv(|v| {
        if v == T::zero() || v.is_nan() {
            v
        } else {
            v.signum()
        }
    });
    let log_abs = Zip::from(&sum_exp)
        .and(&amax)
        .map_collect(|&total, &shift| total.abs().ln() + shift);

    Ok((log_abs, sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_logsumexp_all() {
        let x = Tensor::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap();
        let result = logsumexp(&x, None, None, false).unwrap();
        assert!(result.is_scalar());
        assert_relative_eq!(result.to_vec()[0], 4.440_189_698_561_196, epsilon = 1e-12);
    }

    #[test]
    fn test_logsumexp_large_values_are_stable() {
        let x = Tensor::<f64>::from_vec(vec![1000.0, 1000.0], &[2]).unwrap();
        let result = logsumexp(&x, None, None, false).unwrap();
        assert_relative_eq!(result.to_vec()[0], 1000.0 + 2f64.ln(), epsilon = 1e-9);
    }

    #[test]
    fn test_logsumexp_axis_keepdims() {
        let x = Tensor::<f64>::from_vec(vec![0.0, 0.0, 1.0, 1.0], &[2, 2]).unwrap();
        let result = logsumexp(&x, Some(&[1]), None, true).unwrap();
        assert_eq!(result.shape().dims(), &[2, 1]);
        let values = result.to_vec();
        assert_relative_eq!(values[0], 2f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(values[1], 1.0 + 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_logsumexp_neg_infinity_slice() {
        let x = Tensor::<f64>::full(&[3], f64::NEG_INFINITY);
        let result = logsumexp(&x, None, None, false).unwrap();
        assert_eq!(result.to_vec()[0], f64::NEG_INFINITY);
    }

    #[test]
    fn test_logsumexp_scale_and_sign() {
        let x = Tensor::<f64>::from_vec(vec![0.0, 0.0], &[2]).unwrap();
        let b = Tensor::<f64>::from_vec(vec![1.0, -3.0], &[2]).unwrap();

        let plain = logsumexp(&x, None, Some(&b), false).unwrap();
        assert!(plain.to_vec()[0].is_nan());

        let (value, sign) = logsumexp_with_sign(&x, None, Some(&b), false).unwrap();
        assert_relative_eq!(value.to_vec()[0], 2f64.ln(), epsilon = 1e-12);
        assert_eq!(sign.to_vec(), vec![-1.0]);
    }

    #[test]
    fn test_logsumexp_zero_scale_drops_entries() {
        let x = Tensor::<f64>::from_vec(vec![5.0, 1.0, 1.0], &[3]).unwrap();
        let b = Tensor::<f64>::from_vec(vec![0.0, 1.0, 1.0], &[3]).unwrap();
        let result = logsumexp(&x, None, Some(&b), false).unwrap();
        assert_relative_eq!(result.to_vec()[0], 1.0 + 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_logsumexp_scale_must_broadcast() {
        let x = Tensor::<f64>::zeros(&[2, 3]);
        let b = Tensor::<f64>::ones(&[2]);
        assert!(logsumexp(&x, None, Some(&b), false).unwrap_err().is_shape_error());
    }
}
