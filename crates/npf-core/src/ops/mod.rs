pub mod manipulation;
pub mod reduction;

pub use manipulation::{broadcast_to, expand_dims, repeat, reshape, unsqueeze, where_op};
pub use reduction::{
    logsumexp, logsumexp_with_sign, max, max_where, mean, mean_where, min, min_where, sum,
    sum_where, ReductionIdentity, MAX_IDENTITY, MIN_IDENTITY,
};
