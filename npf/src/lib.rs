//! # npf - masked array utilities
//!
//! Boolean masks rarely have the same rank as the data they mask: a padding
//! mask over `(batch, time)` guards a `(batch, time, features)` tensor, a
//! column mask guards every row of a matrix. npf binds such a mask to a chosen
//! subset of the array's axes, broadcasts it across the rest, and offers fill
//! and reduction operations that respect it.
//!
//! ## Quick Start
//!
//! ```rust
//! use npf::prelude::*;
//!
//! # fn main() -> Result<(), TensorError> {
//! // 2 sequences of length 4 with 3 features each
//! let x = Tensor::from_vec((0..24).map(f64::from).collect(), &[2, 4, 3])?;
//!
//! // only the first two time steps are valid
//! let valid = get_mask(4, 0, Some(2));
//! let spec = AxisSpec::mask_axis(1);
//!
//! let padded = masked_fill(&x, &valid, &spec, 0.0)?;
//! let pooled = masked_mean(&x, &valid, Some(1.into()), &spec, false)?;
//! assert_eq!(padded.shape().dims(), &[2, 4, 3]);
//! assert_eq!(pooled.shape().dims(), &[2, 3]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - [`core`]: the tensor engine (`Tensor`, `Shape`, errors, primitive ops)
//! - [`functional`]: axis resolution, mask alignment, masked reductions,
//!   shape helpers and log-domain reductions

#![deny(missing_docs)]
#![warn(clippy::all)]

pub use npf_core as core;
pub use npf_functional as functional;

/// Commonly used types and functions for a single glob import:
///
/// ```rust
/// use npf::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::ops;
    pub use crate::core::{ErrorKind, Shape, Tensor, TensorError};

    // Axis resolution and mask alignment
    pub use crate::functional::{
        is_maskable, process_mask, process_mask_axis, Axes, AxisSet, AxisSpec, Repeats,
    };

    // Masked operations
    pub use crate::functional::{
        apply_mask, masked_fill, masked_max, masked_mean, masked_min, masked_sum,
    };

    // Shape helpers
    pub use crate::functional::{flatten, get_mask, repeat_axis, unflatten, FlattenMeta};

    // Log-domain reductions
    pub use crate::functional::{logmeanexp, logsumexp};
}

/// The version of the npf crates
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version string of npf
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert_eq!(version(), VERSION);
    }

    #[test]
    fn test_prelude_pipeline() {
        let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let mask = Tensor::from_vec(vec![false, true, true], &[3]).unwrap();
        let spec = AxisSpec::non_mask_axis(0);

        assert!(is_maskable(&x, &mask, &spec).unwrap());
        let sums = masked_sum(&x, &mask, Some(1.into()), &spec, false).unwrap();
        assert_eq!(sums.to_vec(), vec![5.0, 11.0]);

        let lse = logsumexp(&x, None, None, false).unwrap();
        let direct = (1..=6).map(|v| f64::from(v).exp()).sum::<f64>().ln();
        assert_relative_eq!(lse.to_vec()[0], direct, epsilon = 1e-12);
    }
}
