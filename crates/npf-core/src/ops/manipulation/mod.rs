//! Tensor Manipulation Operations
//!
//! - **shape**: reshape, expand_dims, unsqueeze, broadcast_to
//! - **indexing**: elementwise selection (`where_op`)
//! - **concatenation**: repetition along an axis

pub mod concatenation;
pub mod indexing;
pub mod shape;

pub use concatenation::repeat;
pub use indexing::where_op;
pub use shape::{broadcast_to, expand_dims, reshape, unsqueeze};
