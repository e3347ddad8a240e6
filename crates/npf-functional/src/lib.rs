//! Masking utilities for n-dimensional arrays
//!
//! A boolean mask of lower rank than the array it masks is bound to a subset
//! of the array's axes and broadcast across the rest:
//!
//! - **axis**: resolve which array axes a mask covers ([`process_mask_axis`])
//! - **mask**: check and align masks against arrays ([`process_mask`])
//! - **masked**: fill and reduce under a mask ([`masked_fill`], [`masked_sum`], ...)
//! - **shape**: flatten/unflatten axis ranges, repeat along new axes, range masks
//! - **log_reduction**: stable [`logsumexp`] and [`logmeanexp`]
//!
//! All operations are pure: inputs are borrowed and results are new tensors.
//! Failures are [`npf_core::TensorError`]s classified by
//! [`ErrorKind`](npf_core::ErrorKind) as configuration or shape errors.
//!
//! ```
//! use npf_core::Tensor;
//! use npf_functional::{masked_mean, AxisSpec};
//!
//! let scores = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
//! let valid = Tensor::from_vec(vec![true, true, false], &[3]).unwrap();
//! let per_row = masked_mean(&scores, &valid, Some(1.into()), &AxisSpec::mask_axis(1), false).unwrap();
//! assert_eq!(per_row.to_vec(), vec![1.5, 4.5]);
//! ```

#![allow(clippy::result_large_err)]

pub mod axis;
pub mod log_reduction;
pub mod mask;
pub mod masked;
pub mod shape;

pub use axis::{process_mask_axis, Axes, AxisSet, AxisSpec, Repeats};
pub use log_reduction::{logmeanexp, logmeanexp_with_sign, logsumexp, logsumexp_with_sign};
pub use mask::{aligned_mask_shape, is_maskable, is_maskable_shape, process_mask};
pub use masked::{apply_mask, masked_fill, masked_max, masked_mean, masked_min, masked_sum};
pub use shape::{flatten, get_mask, repeat_axis, unflatten, FlattenMeta};
