//! Compile-time register selection.
//!
//! A logical width `N` is mapped to a register type and a register count by
//! implementing [`Shape<T>`] for the marker type [`Lanes<N>`]. The tables
//! below are the only place the mapping is decided:
//!
//! - the default register is 256 bits wide when the target has 256-bit
//!   registers for the element type (`avx` for floats, `avx2` for integers),
//!   128 bits otherwise
//! - a logical width below the default register's lane count uses the
//!   128-bit register, so it still occupies exactly one register
//! - a logical width below even the 128-bit lane count (f64 × 1,
//!   f32 × 2, i16 × 4, ...) uses one 128-bit register with inactive trailing
//!   lanes
//!
//! Widths that are not a power of two, or above 64, have no `Shape`
//! implementation and fail to compile.

use crate::common::scalar::Scalar;
use crate::common::simd::{F32x4, F64x2, I16x8, I32x4, NativeVector, U16x8, U32x4};
#[cfg(target_feature = "avx")]
use crate::common::simd::{F32x8, F64x4};
#[cfg(target_feature = "avx2")]
use crate::common::simd::{I16x16, I32x8, U16x16, U32x8};

use super::register_set::{RegisterSet, RegisterStorage};

/// Type-level logical width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Lanes<const N: usize>;

/// Register layout of a logical vector of `N` elements of `T`.
#[diagnostic::on_unimplemented(
    message = "no register layout for {Self} with element type `{T}`",
    note = "logical widths must be a power of two between 1 and 64"
)]
pub trait Shape<T: Scalar> {
    /// The native register type backing the vector.
    type Register: NativeVector<Scalar = T>;
    /// `RegisterCount` registers of [`Self::Register`].
    type Registers: RegisterStorage<Register = Self::Register>;
    /// One native mask per register.
    type Masks: RegisterStorage<Register = <Self::Register as NativeVector>::Mask>;
}

/// `max(1, n / lanes)`.
pub const fn register_count(n: usize, lanes: usize) -> usize {
    if n > lanes { n / lanes } else { 1 }
}

/// Register type selected for `LogicalVector<T, N>`.
pub type RegisterOf<T, const N: usize> = <Lanes<N> as Shape<T>>::Register;
/// Register set type selected for `LogicalVector<T, N>`.
pub type RegistersOf<T, const N: usize> = <Lanes<N> as Shape<T>>::Registers;
/// Mask set type selected for `LogicalMask<T, N>`.
pub type MasksOf<T, const N: usize> = <Lanes<N> as Shape<T>>::Masks;

macro_rules! shapes {
    ($($elem:ty => $($reg:ident: [$($n:literal),*])*;)*) => {
        $($($(
            impl Shape<$elem> for Lanes<$n> {
                type Register = $reg;
                type Registers = RegisterSet<$reg, { register_count($n, <$reg as NativeVector>::LANES) }>;
                type Masks = RegisterSet<
                    <$reg as NativeVector>::Mask,
                    { register_count($n, <$reg as NativeVector>::LANES) },
                >;
            }
        )*)*)*
    };
}

#[cfg(target_feature = "avx")]
shapes! {
    f64 => F64x2: [1, 2] F64x4: [4, 8, 16, 32, 64];
    f32 => F32x4: [1, 2, 4] F32x8: [8, 16, 32, 64];
}

#[cfg(not(target_feature = "avx"))]
shapes! {
    f64 => F64x2: [1, 2, 4, 8, 16, 32, 64];
    f32 => F32x4: [1, 2, 4, 8, 16, 32, 64];
}

#[cfg(target_feature = "avx2")]
shapes! {
    i32 => I32x4: [1, 2, 4] I32x8: [8, 16, 32, 64];
    u32 => U32x4: [1, 2, 4] U32x8: [8, 16, 32, 64];
    i16 => I16x8: [1, 2, 4, 8] I16x16: [16, 32, 64];
    u16 => U16x8: [1, 2, 4, 8] U16x16: [16, 32, 64];
}

#[cfg(not(target_feature = "avx2"))]
shapes! {
    i32 => I32x4: [1, 2, 4, 8, 16, 32, 64];
    u32 => U32x4: [1, 2, 4, 8, 16, 32, 64];
    i16 => I16x8: [1, 2, 4, 8, 16, 32, 64];
    u16 => U16x8: [1, 2, 4, 8, 16, 32, 64];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout<T: Scalar, const N: usize>() -> (usize, usize)
    where
        Lanes<N>: Shape<T>,
    {
        (
            <RegisterOf<T, N> as NativeVector>::LANES,
            <RegistersOf<T, N> as RegisterStorage>::COUNT,
        )
    }

    #[test]
    fn test_register_count() {
        assert_eq!(register_count(1, 4), 1);
        assert_eq!(register_count(4, 4), 1);
        assert_eq!(register_count(8, 4), 2);
        assert_eq!(register_count(64, 2), 32);
    }

    #[test]
    fn test_small_widths_fit_one_register() {
        assert_eq!(layout::<f64, 1>(), (2, 1));
        assert_eq!(layout::<f64, 2>(), (2, 1));
        assert_eq!(layout::<f32, 2>(), (4, 1));
        assert_eq!(layout::<i16, 4>(), (8, 1));
    }

    #[test]
    fn test_register_covers_width() {
        fn covers<T: Scalar, const N: usize>()
        where
            Lanes<N>: Shape<T>,
        {
            let (lanes, count) = layout::<T, N>();
            assert!(lanes * count >= N);
            if N >= lanes {
                assert_eq!(lanes * count, N);
            } else {
                assert_eq!(count, 1);
            }
        }
        covers::<f64, 64>();
        covers::<f32, 32>();
        covers::<i32, 8>();
        covers::<u32, 16>();
        covers::<i16, 2>();
        covers::<u16, 64>();
    }

    #[cfg(target_feature = "avx")]
    #[test]
    fn test_avx_float_selection() {
        assert_eq!(layout::<f64, 2>(), (2, 1));
        assert_eq!(layout::<f64, 8>(), (4, 2));
        assert_eq!(layout::<f32, 4>(), (4, 1));
        assert_eq!(layout::<f32, 16>(), (8, 2));
    }

    #[cfg(not(target_feature = "avx"))]
    #[test]
    fn test_sse_float_selection() {
        assert_eq!(layout::<f64, 8>(), (2, 4));
        assert_eq!(layout::<f32, 16>(), (4, 4));
    }

    #[cfg(not(target_feature = "avx2"))]
    #[test]
    fn test_sse_integer_selection() {
        assert_eq!(layout::<i32, 8>(), (4, 2));
        assert_eq!(layout::<u16, 64>(), (8, 8));
    }
}
