//! Load/store policies
//!
//! Every memory transfer takes one of three zero-sized policy values. The
//! policy is a type parameter, so the choice between unaligned, aligned and
//! non-temporal transfers is made at compile time.
//!
//! ```rust
//! use simd_array::{Aligned, LogicalVector};
//!
//! #[repr(C, align(32))]
//! struct Buffer([f32; 8]);
//!
//! let buf = Buffer([1.0; 8]);
//! let v = unsafe { LogicalVector::<f32, 8>::load_ptr(buf.0.as_ptr(), Aligned) };
//! assert_eq!(v[7], 1.0);
//! ```

mod sealed {
    pub trait Sealed {}
}

/// Memory transfer policy.
pub trait Flags: sealed::Sealed + Copy + Default + core::fmt::Debug {
    /// The address must be aligned to the register's natural alignment.
    const ALIGNED: bool;
    /// The transfer should bypass the cache hierarchy. Implies [`Self::ALIGNED`].
    const STREAMING: bool;
}

/// No alignment assumption. Always safe with respect to alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unaligned;

/// The address is aligned to the register's natural alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Aligned;

/// Aligned, non-temporal transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Streaming;

impl sealed::Sealed for Unaligned {}
impl sealed::Sealed for Aligned {}
impl sealed::Sealed for Streaming {}

impl Flags for Unaligned {
    const ALIGNED: bool = false;
    const STREAMING: bool = false;
}

impl Flags for Aligned {
    const ALIGNED: bool = true;
    const STREAMING: bool = false;
}

impl Flags for Streaming {
    const ALIGNED: bool = true;
    const STREAMING: bool = true;
}
