//! Tensor Module
//!
//! - **core**: tensor structure and property accessors
//! - **creation**: constructors
//! - **indexing**: `tensor[&[i, j]]` element access

pub mod core;
pub mod creation;
pub mod indexing;

pub use self::core::Tensor;
