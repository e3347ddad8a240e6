//! # npf-core
//!
//! CPU tensor engine underneath the npf masking utilities. Tensors are dense,
//! row-major `scirs2_core::ndarray` arrays with a cached [`Shape`]; every
//! operation is a pure function returning a new tensor.
//!
//! The operations exposed in [`ops`] are the primitives the masking layer is
//! built on: reshape and singleton-axis insertion, broadcasting selection,
//! repetition, reductions with a boolean `where` predicate, and a numerically
//! stable log-sum-exp.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;

pub use error::{ErrorContext, ErrorKind, Result, TensorError};
pub use shape::Shape;
pub use tensor::Tensor;
