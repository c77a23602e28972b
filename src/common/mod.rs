//! Common types, traits, and utilities shared by the logical vector types.
//!
//! This module provides the element types, the native register layer and the
//! error type used by [`LogicalVector`](crate::LogicalVector) and
//! [`LogicalMask`](crate::LogicalMask).

// Submodule declarations
pub mod error;
pub mod scalar;
pub mod simd;

// Re-exports for convenience
pub use error::{Error, Result};
pub use scalar::{ConvertFrom, LaneNeg, LaneShift, Scalar};
