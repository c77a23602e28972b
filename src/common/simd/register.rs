//! Native register types
//!
//! Each register type holds one hardware register's worth of lanes in a
//! `#[repr(C, align(N))]` array. Operations are written lane by lane over
//! fixed-size arrays; with the matching target features enabled the compiler
//! lowers every loop to a single vector instruction.
//!
//! # Register shapes
//!
//! | Width | f64     | f32     | i32     | u32     | i16      | u16      |
//! |-------|---------|---------|---------|---------|----------|----------|
//! | 128b  | `F64x2` | `F32x4` | `I32x4` | `U32x4` | `I16x8`  | `U16x8`  |
//! | 256b  | `F64x4` | `F32x8` | `I32x8` | `U32x8` | `I16x16` | `U16x16` |

use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use super::flags::Flags;
use super::mask::{NativeMask, RegisterMask};
use super::stream::{stream_load, stream_store};
use crate::common::scalar::{ConvertFrom, LaneNeg, LaneShift, Scalar};

/// Contract of a single hardware register holding [`Self::LANES`] elements.
///
/// Arithmetic and bitwise operators are expressed through the `core::ops`
/// traits, so a register type only offers the operators its element type
/// supports (no shifts on floats, no negation on unsigned integers).
pub trait NativeVector:
    Copy + Send + Sync + PartialEq + fmt::Debug + FromBytes + IntoBytes + Immutable + 'static
{
    type Scalar: Scalar;
    type Mask: NativeMask;

    /// Number of elements in one register.
    const LANES: usize;
    /// Natural alignment in bytes, required by aligned and streaming transfers.
    const ALIGN: usize = core::mem::align_of::<Self>();

    /// Build a register lane by lane, in ascending lane order.
    fn from_fn(f: impl FnMut(usize) -> Self::Scalar) -> Self;

    fn lanes(&self) -> &[Self::Scalar];

    fn lanes_mut(&mut self) -> &mut [Self::Scalar];

    #[inline(always)]
    fn splat(value: Self::Scalar) -> Self {
        Self::from_fn(|_| value)
    }

    #[inline(always)]
    fn zeroed() -> Self {
        Self::new_zeroed()
    }

    #[inline(always)]
    fn one() -> Self {
        Self::splat(Self::Scalar::ONE)
    }

    /// Lane `l` holds `offset + l`.
    #[inline(always)]
    fn indexes_from(offset: usize) -> Self {
        Self::from_fn(|lane| Self::Scalar::from_index(offset + lane))
    }

    /// Load a full register.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of [`Self::LANES`] elements. With an
    /// aligned or streaming policy it must also be aligned to [`Self::ALIGN`].
    #[inline(always)]
    unsafe fn load<F: Flags>(src: *const Self::Scalar) -> Self {
        let src = src.cast::<Self>();
        if F::STREAMING {
            unsafe { stream_load(src) }
        } else if F::ALIGNED {
            debug_assert!(src.is_aligned(), "aligned load from misaligned address");
            unsafe { src.read() }
        } else {
            unsafe { src.read_unaligned() }
        }
    }

    /// Store a full register.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of [`Self::LANES`] elements. With an
    /// aligned or streaming policy it must also be aligned to [`Self::ALIGN`].
    #[inline(always)]
    unsafe fn store<F: Flags>(&self, dst: *mut Self::Scalar) {
        let dst = dst.cast::<Self>();
        if F::STREAMING {
            unsafe { stream_store(dst, self) }
        } else if F::ALIGNED {
            debug_assert!(dst.is_aligned(), "aligned store to misaligned address");
            unsafe { dst.write(*self) }
        } else {
            unsafe { dst.write_unaligned(*self) }
        }
    }

    /// Load the first `count` lanes from a buffer of `U`, converting each
    /// element. Remaining lanes are zero.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `count` elements and
    /// `count <= Self::LANES`.
    #[inline(always)]
    unsafe fn load_converted<U: Scalar>(src: *const U, count: usize) -> Self
    where
        Self::Scalar: ConvertFrom<U>,
    {
        let mut r = Self::zeroed();
        for (lane, slot) in r.lanes_mut()[..count].iter_mut().enumerate() {
            *slot = Self::Scalar::convert_from(unsafe { src.add(lane).read_unaligned() });
        }
        r
    }

    /// Store the first `count` lanes into a buffer of `U`, converting each
    /// element.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `count` elements and
    /// `count <= Self::LANES`.
    #[inline(always)]
    unsafe fn store_converted<U>(&self, dst: *mut U, count: usize)
    where
        U: ConvertFrom<Self::Scalar>,
    {
        for (lane, &value) in self.lanes()[..count].iter().enumerate() {
            unsafe { dst.add(lane).write_unaligned(U::convert_from(value)) };
        }
    }

    /// Lane-wise predicate over two registers.
    #[inline(always)]
    fn compare(
        &self,
        rhs: &Self,
        mut f: impl FnMut(Self::Scalar, Self::Scalar) -> bool,
    ) -> Self::Mask {
        let (a, b) = (self.lanes(), rhs.lanes());
        Self::Mask::from_fn(|lane| f(a[lane], b[lane]))
    }

    #[inline(always)]
    fn simd_eq(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a == b)
    }

    #[inline(always)]
    fn simd_ne(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a != b)
    }

    #[inline(always)]
    fn simd_lt(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a < b)
    }

    #[inline(always)]
    fn simd_le(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a <= b)
    }

    #[inline(always)]
    fn simd_gt(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a > b)
    }

    #[inline(always)]
    fn simd_ge(&self, rhs: &Self) -> Self::Mask {
        self.compare(rhs, |a, b| a >= b)
    }

    #[inline(always)]
    fn increment(&mut self) {
        for lane in self.lanes_mut() {
            *lane = lane.lane_add(Self::Scalar::ONE);
        }
    }

    #[inline(always)]
    fn decrement(&mut self) {
        for lane in self.lanes_mut() {
            *lane = lane.lane_sub(Self::Scalar::ONE);
        }
    }

    /// Lane `l` from `if_true` where the mask is set, otherwise from
    /// `if_false`.
    #[inline(always)]
    fn select(mask: &Self::Mask, if_true: &Self, if_false: &Self) -> Self {
        let (t, f) = (if_true.lanes(), if_false.lanes());
        Self::from_fn(|lane| if mask.test(lane) { t[lane] } else { f[lane] })
    }
}

macro_rules! lane_binary_op {
    ($name:ident: $($assign:ident $assign_fn:ident, $op:ident $op_fn:ident => $lane:ident;)*) => {
        $(
            impl $assign for $name {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    for (a, b) in self.0.iter_mut().zip(rhs.0) {
                        *a = a.$lane(b);
                    }
                }
            }

            impl $op for $name {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(mut self, rhs: Self) -> Self {
                    self.$assign_fn(rhs);
                    self
                }
            }
        )*
    };
}

macro_rules! native_register {
    ($($(#[$attr:meta])* $name:ident: [$elem:ty; $lanes:literal], align $align:literal;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable, KnownLayout)]
            #[repr(C, align($align))]
            pub struct $name([$elem; $lanes]);

            impl $name {
                #[inline(always)]
                pub const fn from_array(lanes: [$elem; $lanes]) -> Self {
                    Self(lanes)
                }

                #[inline(always)]
                pub const fn to_array(self) -> [$elem; $lanes] {
                    self.0
                }
            }

            impl NativeVector for $name {
                type Scalar = $elem;
                type Mask = RegisterMask<$lanes>;

                const LANES: usize = $lanes;

                #[inline(always)]
                fn from_fn(f: impl FnMut(usize) -> $elem) -> Self {
                    Self(core::array::from_fn(f))
                }

                #[inline(always)]
                fn lanes(&self) -> &[$elem] {
                    &self.0
                }

                #[inline(always)]
                fn lanes_mut(&mut self) -> &mut [$elem] {
                    &mut self.0
                }
            }

            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.0).finish()
                }
            }

            lane_binary_op!($name:
                AddAssign add_assign, Add add => lane_add;
                SubAssign sub_assign, Sub sub => lane_sub;
                MulAssign mul_assign, Mul mul => lane_mul;
                DivAssign div_assign, Div div => lane_div;
                RemAssign rem_assign, Rem rem => lane_rem;
                BitAndAssign bitand_assign, BitAnd bitand => lane_and;
                BitOrAssign bitor_assign, BitOr bitor => lane_or;
                BitXorAssign bitxor_assign, BitXor bitxor => lane_xor;
            );
        )*
    };
}

macro_rules! lane_integer_ops {
    ($($name:ident),*) => {
        $(
            lane_binary_op!($name:
                ShlAssign shl_assign, Shl shl => lane_shl;
                ShrAssign shr_assign, Shr shr => lane_shr;
            );

            impl Not for $name {
                type Output = Self;

                #[inline(always)]
                fn not(mut self) -> Self {
                    for lane in self.0.iter_mut() {
                        *lane = lane.lane_not();
                    }
                    self
                }
            }
        )*
    };
}

macro_rules! lane_neg_op {
    ($($name:ident),*) => {
        $(
            impl Neg for $name {
                type Output = Self;

                #[inline(always)]
                fn neg(mut self) -> Self {
                    for lane in self.0.iter_mut() {
                        *lane = lane.lane_neg();
                    }
                    self
                }
            }
        )*
    };
}

native_register! {
    /// 2 × f64 in one 128-bit register (SSE2 `__m128d`, NEON `float64x2_t`).
    F64x2: [f64; 2], align 16;
    /// 4 × f32 in one 128-bit register.
    F32x4: [f32; 4], align 16;
    /// 4 × i32 in one 128-bit register.
    I32x4: [i32; 4], align 16;
    /// 4 × u32 in one 128-bit register.
    U32x4: [u32; 4], align 16;
    /// 8 × i16 in one 128-bit register.
    I16x8: [i16; 8], align 16;
    /// 8 × u16 in one 128-bit register.
    U16x8: [u16; 8], align 16;

    /// 4 × f64 in one 256-bit register (AVX `__m256d`).
    F64x4: [f64; 4], align 32;
    /// 8 × f32 in one 256-bit register.
    F32x8: [f32; 8], align 32;
    /// 8 × i32 in one 256-bit register (AVX2 `__m256i`).
    I32x8: [i32; 8], align 32;
    /// 8 × u32 in one 256-bit register.
    U32x8: [u32; 8], align 32;
    /// 16 × i16 in one 256-bit register.
    I16x16: [i16; 16], align 32;
    /// 16 × u16 in one 256-bit register.
    U16x16: [u16; 16], align 32;
}

lane_integer_ops!(I32x4, U32x4, I16x8, U16x8, I32x8, U32x8, I16x16, U16x16);
lane_neg_op!(F64x2, F32x4, I32x4, I16x8, F64x4, F32x8, I32x8, I16x16);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::simd::flags::{Aligned, Streaming, Unaligned};

    #[repr(C, align(32))]
    struct AlignedBuf<T, const N: usize>([T; N]);

    #[test]
    fn test_layout() {
        assert_eq!(core::mem::size_of::<F64x2>(), 16);
        assert_eq!(F64x2::ALIGN, 16);
        assert_eq!(core::mem::size_of::<U16x16>(), 32);
        assert_eq!(U16x16::ALIGN, 32);
        assert_eq!(I16x8::LANES, 8);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(F32x4::zeroed().to_array(), [0.0; 4]);
        assert_eq!(I32x4::one().to_array(), [1; 4]);
        assert_eq!(U16x8::splat(7).to_array(), [7; 8]);
        assert_eq!(I32x8::indexes_from(8).to_array(), [8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_load_store_policies() {
        let src = AlignedBuf([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let mut dst = AlignedBuf([0.0f32; 8]);

        unsafe {
            let a = F32x8::load::<Aligned>(src.0.as_ptr());
            let s = F32x8::load::<Streaming>(src.0.as_ptr());
            let u = F32x4::load::<Unaligned>(src.0.as_ptr().add(1));
            assert_eq!(a, s);
            assert_eq!(u.to_array(), [2.0, 3.0, 4.0, 5.0]);

            a.store::<Streaming>(dst.0.as_mut_ptr());
        }
        assert_eq!(dst.0, src.0);
    }

    #[test]
    fn test_partial_and_converted_transfers() {
        let src = [3i32, -4];
        let r = unsafe { F64x4::load_converted(src.as_ptr(), 2) };
        assert_eq!(r.to_array(), [3.0, -4.0, 0.0, 0.0]);

        let mut out = [0u16; 3];
        unsafe { U32x4::from_array([1, 2, 70000, 4]).store_converted(out.as_mut_ptr(), 3) };
        assert_eq!(out, [1, 2, 70000u32 as u16]);
    }

    #[test]
    fn test_lane_arithmetic() {
        let a = I32x4::from_array([1, 2, 3, i32::MAX]);
        let b = I32x4::from_array([10, 20, 30, 1]);
        assert_eq!((a + b).to_array(), [11, 22, 33, i32::MIN]);
        assert_eq!((b - a).to_array(), [9, 18, 27, 1 - i32::MAX]);
        assert_eq!((a << I32x4::one()).to_array(), [2, 4, 6, -2]);
        assert_eq!((!I32x4::zeroed()).to_array(), [-1; 4]);
        assert_eq!((-F64x2::from_array([1.0, -2.0])).to_array(), [-1.0, 2.0]);
    }

    #[test]
    fn test_compare_and_select() {
        let a = U16x8::indexes_from(0);
        let b = U16x8::splat(4);
        let lt = a.simd_lt(&b);
        assert_eq!(lt.bits(), 0b0000_1111);
        assert_eq!(a.simd_ge(&b).bits(), 0b1111_0000);
        assert_eq!(a.simd_eq(&b).bits(), 0b0001_0000);

        let picked = U16x8::select(&lt, &a, &b);
        assert_eq!(picked.to_array(), [0, 1, 2, 3, 4, 4, 4, 4]);
    }

    #[test]
    fn test_increment_decrement() {
        let mut r = F32x4::splat(1.5);
        r.increment();
        assert_eq!(r.to_array(), [2.5; 4]);
        r.decrement();
        r.decrement();
        assert_eq!(r.to_array(), [0.5; 4]);

        let mut u = U32x4::zeroed();
        u.decrement();
        assert_eq!(u.to_array(), [u32::MAX; 4]);
    }
}
