//! Native SIMD registers
//!
//! This module provides the single-register building blocks that
//! [`LogicalVector`](crate::LogicalVector) fans its operations out to.
//!
//! # Supported Architectures
//!
//! ## x86_64
//! - **SSE2**: 128-bit registers, non-temporal stores
//! - **SSE4.1**: non-temporal loads
//! - **AVX**: 256-bit floating-point registers
//! - **AVX2**: 256-bit integer registers
//!
//! ## aarch64 (ARM)
//! - **NEON**: 128-bit registers (always available)
//!
//! ## Other
//! - 128-bit registers with scalar lane loops
//!
//! # Modules
//!
//! - [`register`]: the [`NativeVector`] contract and the twelve register types
//! - [`mask`]: per-register comparison results
//! - [`flags`]: load/store policies
//! - [`stream`]: non-temporal transfers
//!
//! # Performance Considerations
//!
//! - **Compile-Time Selection**: register widths follow the target features the
//!   crate is compiled with; there is no runtime feature detection
//! - **Inline Functions**: all hot-path functions are `#[inline(always)]`
//! - **Fixed-Size Loops**: every lane loop has a constant trip count and is
//!   unrolled and vectorized by the compiler
//!
//! ```rust
//! use simd_array::simd::{F32x4, NativeVector};
//!
//! let a = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
//! let b = F32x4::splat(2.5);
//! assert_eq!(a.simd_lt(&b).bits(), 0b0011);
//! assert_eq!((a + b).to_array(), [3.5, 4.5, 5.5, 6.5]);
//! ```

pub mod flags;
pub mod mask;
pub mod register;
pub mod stream;

pub use flags::{Aligned, Flags, Streaming, Unaligned};
pub use mask::{NativeMask, RegisterMask};
pub use register::{
    F32x4, F32x8, F64x2, F64x4, I16x8, I16x16, I32x4, I32x8, NativeVector, U16x8, U16x16, U32x4,
    U32x8,
};
