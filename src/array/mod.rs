//! Fixed-width logical vectors and masks.
//!
//! [`LogicalVector<T, N>`] presents `N` elements of `T` as one value while
//! storing them in a [`RegisterSet`] of native registers. Every operation is
//! fanned out to the registers in ascending order.
//!
//! # Modules
//!
//! - [`shape`]: compile-time choice of register type and count
//! - [`register_set`]: the register container and its fan-out primitives
//! - `vector`, `mask`: the logical types
//! - `ops`: operator overloads
//! - `checked`: slice transfers that return [`Result`](crate::Result)

mod checked;
mod mask;
mod ops;
pub mod register_set;
#[cfg(feature = "serde")]
mod serialize;
pub mod shape;
mod vector;

pub use mask::LogicalMask;
pub use register_set::{RegisterSet, RegisterStorage};
pub use shape::{Lanes, MasksOf, RegisterOf, RegistersOf, Shape};
pub use vector::LogicalVector;
