//! Scalar element types.
//!
//! Only six element types may be stored in a [`LogicalVector`](crate::LogicalVector):
//! `f64`, `f32`, `i32`, `u32`, `i16` and `u16`. The [`Scalar`] trait is sealed,
//! so any other element type is rejected at compile time.
//!
//! Lane arithmetic follows what a SIMD lane does in hardware: integer
//! addition, subtraction and multiplication wrap, shift amounts are masked to
//! the lane width, and float bitwise operators act on the IEEE 754 bit pattern.

use core::fmt::Debug;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

mod sealed {
    pub trait Sealed {}
}

/// An element type that can live in a native register.
pub trait Scalar:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + PartialOrd
    + Debug
    + Send
    + Sync
    + FromBytes
    + IntoBytes
    + Immutable
    + KnownLayout
    + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Size of one lane in bits.
    const BITS: u32;

    /// The value `i` as this type, used for index sequences.
    fn from_index(i: usize) -> Self;

    fn lane_add(self, rhs: Self) -> Self;
    fn lane_sub(self, rhs: Self) -> Self;
    fn lane_mul(self, rhs: Self) -> Self;
    /// Integer division by zero panics; float division follows IEEE 754.
    fn lane_div(self, rhs: Self) -> Self;
    fn lane_rem(self, rhs: Self) -> Self;

    fn lane_and(self, rhs: Self) -> Self;
    fn lane_or(self, rhs: Self) -> Self;
    fn lane_xor(self, rhs: Self) -> Self;
}

/// Shift operators, implemented for the integer element types only.
pub trait LaneShift: Scalar {
    /// Shift left; the amount is taken modulo [`Scalar::BITS`].
    fn lane_shl(self, rhs: Self) -> Self;
    /// Shift right (arithmetic for signed types); the amount is taken modulo
    /// [`Scalar::BITS`].
    fn lane_shr(self, rhs: Self) -> Self;
    /// Bitwise complement.
    fn lane_not(self) -> Self;
}

/// Negation, implemented for the signed and floating-point element types.
pub trait LaneNeg: Scalar {
    fn lane_neg(self) -> Self;
}

macro_rules! impl_float_scalar {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const BITS: u32 = (core::mem::size_of::<$ty>() * 8) as u32;

                #[inline(always)]
                fn from_index(i: usize) -> Self {
                    i as $ty
                }

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self / rhs
                }

                #[inline(always)]
                fn lane_rem(self, rhs: Self) -> Self {
                    self % rhs
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() & rhs.to_bits())
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() | rhs.to_bits())
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    <$ty>::from_bits(self.to_bits() ^ rhs.to_bits())
                }
            }

            impl LaneNeg for $ty {
                #[inline(always)]
                fn lane_neg(self) -> Self {
                    -self
                }
            }
        )*
    };
}

macro_rules! impl_int_scalar {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const BITS: u32 = <$ty>::BITS;

                #[inline(always)]
                fn from_index(i: usize) -> Self {
                    i as $ty
                }

                #[inline(always)]
                fn lane_add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn lane_sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn lane_mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }

                #[inline(always)]
                fn lane_div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }

                #[inline(always)]
                fn lane_rem(self, rhs: Self) -> Self {
                    self.wrapping_rem(rhs)
                }

                #[inline(always)]
                fn lane_and(self, rhs: Self) -> Self {
                    self & rhs
                }

                #[inline(always)]
                fn lane_or(self, rhs: Self) -> Self {
                    self | rhs
                }

                #[inline(always)]
                fn lane_xor(self, rhs: Self) -> Self {
                    self ^ rhs
                }
            }

            impl LaneShift for $ty {
                #[inline(always)]
                fn lane_shl(self, rhs: Self) -> Self {
                    self.wrapping_shl(rhs as u32)
                }

                #[inline(always)]
                fn lane_shr(self, rhs: Self) -> Self {
                    self.wrapping_shr(rhs as u32)
                }

                #[inline(always)]
                fn lane_not(self) -> Self {
                    !self
                }
            }
        )*
    };
}

impl_float_scalar!(f64, f32);
impl_int_scalar!(i32, u32, i16, u16);

impl LaneNeg for i32 {
    #[inline(always)]
    fn lane_neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl LaneNeg for i16 {
    #[inline(always)]
    fn lane_neg(self) -> Self {
        self.wrapping_neg()
    }
}

/// Element-wise numeric conversion from `U`.
///
/// Implemented once per supported pair. Conversions use Rust's `as`
/// semantics:
///
/// - float to integer truncates toward zero and saturates at the integer
///   range; NaN becomes zero
/// - integer to narrower integer keeps the low bits
/// - integer to float rounds to nearest
/// - `f64` to `f32` rounds to nearest
pub trait ConvertFrom<U: Scalar>: Scalar {
    /// `true` only for the identity conversion, where loads and stores can
    /// move whole registers instead of single lanes.
    const IDENTITY: bool = false;

    fn convert_from(value: U) -> Self;
}

macro_rules! impl_identity {
    ($($ty:ty),*) => {
        $(
            impl ConvertFrom<$ty> for $ty {
                const IDENTITY: bool = true;

                #[inline(always)]
                fn convert_from(value: $ty) -> Self {
                    value
                }
            }
        )*
    };
}

macro_rules! impl_convert {
    ($($from:ty => [$($to:ty),*];)*) => {
        $($(
            impl ConvertFrom<$from> for $to {
                #[inline(always)]
                fn convert_from(value: $from) -> Self {
                    value as $to
                }
            }
        )*)*
    };
}

impl_identity!(f64, f32, i32, u32, i16, u16);

impl_convert! {
    f64 => [f32, i32, u32, i16, u16];
    f32 => [f64, i32, u32, i16, u16];
    i32 => [f64, f32, u32, i16, u16];
    u32 => [f64, f32, i32, i16, u16];
    i16 => [f64, f32, i32, u32, u16];
    u16 => [f64, f32, i32, u32, i16];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_lanes_wrap() {
        assert_eq!(i32::MAX.lane_add(1), i32::MIN);
        assert_eq!(0u16.lane_sub(1), u16::MAX);
        assert_eq!(i16::MIN.lane_div(-1), i16::MIN);
        assert_eq!(i16::MIN.lane_neg(), i16::MIN);
    }

    #[test]
    fn test_shift_amount_is_masked() {
        assert_eq!(1u32.lane_shl(33), 2);
        assert_eq!(1i16.lane_shl(17), 2);
        assert_eq!((-8i32).lane_shr(1), -4);
    }

    #[test]
    fn test_float_bitwise_uses_bit_pattern() {
        let sign = -0.0f32;
        assert_eq!(1.5f32.lane_or(sign), -1.5);
        assert_eq!((-2.0f64).lane_and(f64::from_bits(!(1u64 << 63))), 2.0);
        assert_eq!(3.0f64.lane_xor(3.0), 0.0);
    }

    #[test]
    fn test_float_bits() {
        assert_eq!(<f32 as Scalar>::BITS, 32);
        assert_eq!(<f64 as Scalar>::BITS, 64);
        assert_eq!(<u16 as Scalar>::BITS, 16);
    }

    #[test]
    fn test_conversions() {
        assert!(<f64 as ConvertFrom<f64>>::IDENTITY);
        assert!(!<f64 as ConvertFrom<i32>>::IDENTITY);
        assert_eq!(f64::convert_from(-7i32), -7.0);
        assert_eq!(i32::convert_from(2.9f32), 2);
        assert_eq!(i32::convert_from(-2.9f64), -2);
        assert_eq!(u16::convert_from(-1.0f32), 0);
        assert_eq!(i16::convert_from(70000u32), 70000u32 as i16);
        assert_eq!(u32::convert_from(f64::NAN), 0);
    }
}
