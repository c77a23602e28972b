//! simd-array - fixed-width logical SIMD vectors
//!
//! This library presents a vector of `N` numeric elements as a single value
//! and executes every operation on it as a fixed sequence of native SIMD
//! register operations. The register type and count are chosen at compile
//! time from the element type, the logical width and the target features.
//!
//! # Features
//!
//! - **Compile-time layout**: `LogicalVector<T, N>` maps onto `N / W`
//!   registers of `W` lanes, or one partially used register for small `N`
//! - **Six element types**: `f64`, `f32`, `i32`, `u32`, `i16`, `u16`
//! - **Converting transfers**: load from and store to buffers of any supported
//!   element type, with unaligned, aligned and non-temporal policies
//! - **Masks**: element-wise comparisons produce a [`LogicalMask`] usable for
//!   blending and predicated assignment
//! - **Checked API**: slice transfers that validate length and alignment
//!
//! # Example - Arithmetic and comparison
//!
//! ```rust
//! use simd_array::{LogicalMask, LogicalVector};
//!
//! let v = LogicalVector::<i32, 8>::load(&[1, 2, 3, 4, 5, 6, 7, 8]);
//! let w = v + 10;
//! assert_eq!(w[4], 15);
//!
//! let big: LogicalMask<i32, 8> = w.simd_ge(&LogicalVector::broadcast(15));
//! assert_eq!(big.count(), 4);
//!
//! let clamped = LogicalVector::select(&big, LogicalVector::broadcast(15), w);
//! assert_eq!(clamped.to_array(), [11, 12, 13, 14, 15, 15, 15, 15]);
//! ```
//!
//! # Example - Converting and checked transfers
//!
//! ```rust
//! use simd_array::{LogicalVector, Unaligned};
//!
//! # fn main() -> simd_array::Result<()> {
//! let samples: Vec<i16> = vec![-3, 1, 4, -1, 5, 9, -2, 6, 5, 3];
//! let v = LogicalVector::<f32, 8>::try_load(&samples, Unaligned)?;
//! let scaled = v * 0.5;
//!
//! let mut out = [0.0f64; 8];
//! scaled.store(&mut out);
//! assert_eq!(out[5], 4.5);
//!
//! assert!(LogicalVector::<f32, 16>::try_load(&samples, Unaligned).is_err());
//! # Ok(())
//! # }
//! ```

/// Element types, native registers, load/store policies and errors
pub mod common;

/// Logical vector and mask types built on top of the native registers
pub mod array;

// Re-export commonly used types for convenience
pub use array::{Lanes, LogicalMask, LogicalVector, RegisterSet, RegisterStorage, Shape};
pub use common::simd;
pub use common::simd::{Aligned, Flags, Streaming, Unaligned};
pub use common::{ConvertFrom, Error, LaneNeg, LaneShift, Result, Scalar};
