//! Tensor Reduction Operations
//!
//! - **common**: axis normalization and reduced-shape bookkeeping
//! - **statistical**: plain reductions (sum, mean, max, min)
//! - **masked**: predicate-aware reductions with explicit identities
//! - **logsumexp**: numerically stable log-sum-exp

pub mod common;
pub mod logsumexp;
pub mod masked;
pub mod statistical;

pub use common::{normalize_axes, normalize_axis, reduced_shape};
pub use logsumexp::{logsumexp, logsumexp_with_sign};
pub use masked::{
    max_where, mean_where, min_where, sum_where, ReductionIdentity, MAX_IDENTITY, MIN_IDENTITY,
};
pub use statistical::{max, mean, min, sum};
