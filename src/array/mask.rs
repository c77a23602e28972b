//! Fixed-width logical mask.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::common::scalar::Scalar;
use crate::common::simd::{NativeMask, NativeVector};

use super::register_set::RegisterStorage;
use super::shape::{Lanes, MasksOf, RegisterOf, Shape};
use super::vector::LogicalVector;

type NativeMaskOf<T, const N: usize> = <RegisterOf<T, N> as NativeVector>::Mask;

/// One boolean per element of a [`LogicalVector<T, N>`], stored as one
/// native mask per register.
///
/// When `N` is smaller than a register's lane count the trailing lanes are
/// never reported: queries such as [`all`](Self::all) and
/// [`count`](Self::count) only look at elements `0..N`.
#[repr(transparent)]
pub struct LogicalMask<T: Scalar, const N: usize>
where
    Lanes<N>: Shape<T>,
{
    d: MasksOf<T, N>,
}

impl<T: Scalar, const N: usize> LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    /// Number of elements.
    pub const SIZE: usize = N;
    const WIDTH: usize = <RegisterOf<T, N> as NativeVector>::LANES;
    /// Native masks backing the logical mask.
    pub const REGISTER_COUNT: usize = <MasksOf<T, N> as RegisterStorage>::COUNT;

    /// Lane bits holding elements, per register.
    const ACTIVE_BITS: u32 = {
        let active = if N < Self::WIDTH { N } else { Self::WIDTH };
        if active >= 32 { u32::MAX } else { (1u32 << active) - 1 }
    };

    /// Compare two vectors register by register, in ascending register order.
    #[inline(always)]
    pub fn assemble(
        a: &LogicalVector<T, N>,
        b: &LogicalVector<T, N>,
        mut cmp: impl FnMut(&RegisterOf<T, N>, &RegisterOf<T, N>) -> NativeMaskOf<T, N>,
    ) -> Self {
        let (a, b) = (a.registers(), b.registers());
        Self::from_registers(<MasksOf<T, N> as RegisterStorage>::from_fn(|k| {
            cmp(a.register(k), b.register(k))
        }))
    }

    #[inline(always)]
    pub fn from_registers(d: MasksOf<T, N>) -> Self {
        Self { d }
    }

    /// The backing native masks, one per register.
    #[inline(always)]
    pub fn registers(&self) -> &MasksOf<T, N> {
        &self.d
    }

    /// Every element set to `value`.
    #[inline(always)]
    pub fn splat(value: bool) -> Self {
        Self::from_fn(|_| value)
    }

    /// Element `i` set to `f(i)`, called in ascending order.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        Self::from_registers(<MasksOf<T, N> as RegisterStorage>::from_fn(|k| {
            NativeMaskOf::<T, N>::from_fn(|lane| {
                let i = k * Self::WIDTH + lane;
                i < N && f(i)
            })
        }))
    }

    #[inline(always)]
    pub fn from_array(elements: [bool; N]) -> Self {
        Self::from_fn(|i| elements[i])
    }

    /// State of element `i`.
    ///
    /// `i` must be less than `N`; debug builds assert it. Use
    /// [`get`](Self::get) for a checked read.
    #[inline(always)]
    pub fn test(&self, i: usize) -> bool {
        debug_assert!(i < N, "mask index {i} out of range for width {N}");
        self.d.register(i / Self::WIDTH).test(i % Self::WIDTH)
    }

    /// State of element `i`, or `None` when `i >= N`.
    #[inline(always)]
    pub fn get(&self, i: usize) -> Option<bool> {
        (i < N).then(|| self.d.register(i / Self::WIDTH).test(i % Self::WIDTH))
    }

    pub fn to_array(&self) -> [bool; N] {
        core::array::from_fn(|i| self.d.register(i / Self::WIDTH).test(i % Self::WIDTH))
    }

    #[inline(always)]
    fn active_bits(&self) -> impl Iterator<Item = u32> + '_ {
        self.d.registers().iter().map(|m| m.bits() & Self::ACTIVE_BITS)
    }

    /// Every element set.
    #[inline(always)]
    pub fn all(&self) -> bool {
        self.active_bits().all(|bits| bits == Self::ACTIVE_BITS)
    }

    /// At least one element set.
    #[inline(always)]
    pub fn any(&self) -> bool {
        self.active_bits().any(|bits| bits != 0)
    }

    #[inline(always)]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Number of set elements.
    #[inline(always)]
    pub fn count(&self) -> usize {
        self.active_bits().map(|bits| bits.count_ones() as usize).sum()
    }
}

impl<T: Scalar, const N: usize> Clone for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar, const N: usize> Copy for LogicalMask<T, N> where Lanes<N>: Shape<T> {}

impl<T: Scalar, const N: usize> Default for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<T: Scalar, const N: usize> From<[bool; N]> for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn from(elements: [bool; N]) -> Self {
        Self::from_array(elements)
    }
}

impl<T: Scalar, const N: usize> PartialEq for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.active_bits().eq(other.active_bits())
    }
}

impl<T: Scalar, const N: usize> Eq for LogicalMask<T, N> where Lanes<N>: Shape<T> {}

macro_rules! mask_logic_ops {
    ($($assign:ident $assign_fn:ident, $op:ident $op_fn:ident;)*) => {
        $(
            impl<T: Scalar, const N: usize> $assign for LogicalMask<T, N>
            where
                Lanes<N>: Shape<T>,
            {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    self.d.assign(&rhs.d, |a, b| $assign::$assign_fn(a, *b));
                }
            }

            impl<T: Scalar, const N: usize> $op for LogicalMask<T, N>
            where
                Lanes<N>: Shape<T>,
            {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(mut self, rhs: Self) -> Self {
                    $assign::$assign_fn(&mut self, rhs);
                    self
                }
            }
        )*
    };
}

mask_logic_ops! {
    BitAndAssign bitand_assign, BitAnd bitand;
    BitOrAssign bitor_assign, BitOr bitor;
    BitXorAssign bitxor_assign, BitXor bitxor;
}

impl<T: Scalar, const N: usize> Not for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    type Output = Self;

    /// Inactive trailing lanes may become set; every query ignores them.
    #[inline(always)]
    fn not(mut self) -> Self {
        self.d.call(|m| *m = !*m);
        self
    }
}

impl<T: Scalar, const N: usize> fmt::Debug for LogicalMask<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    type M8 = LogicalMask<i32, 8>;

    #[test]
    fn test_from_array_round_trip() {
        let bits = [true, false, false, true, true, false, true, false];
        let m = M8::from_array(bits);
        assert_eq!(m.to_array(), bits);
        assert_eq!(m.count(), 4);
        assert!(m.test(3));
        assert_eq!(m.get(8), None);
    }

    #[rstest]
    #[case([false; 8], false, false, true, 0)]
    #[case([true; 8], true, true, false, 8)]
    #[case([false, false, false, false, false, false, false, true], false, true, false, 1)]
    fn test_queries(
        #[case] bits: [bool; 8],
        #[case] all: bool,
        #[case] any: bool,
        #[case] none: bool,
        #[case] count: usize,
    ) {
        let m = M8::from_array(bits);
        assert_eq!(m.all(), all);
        assert_eq!(m.any(), any);
        assert_eq!(m.none(), none);
        assert_eq!(m.count(), count);
    }

    #[test]
    fn test_partial_register_ignores_trailing_lanes() {
        let m = LogicalMask::<f32, 2>::splat(true);
        assert!(m.all());
        assert_eq!(m.count(), 2);

        let inverted = !LogicalMask::<f32, 2>::from_array([true, false]);
        assert_eq!(inverted.to_array(), [false, true]);
        assert_eq!(inverted.count(), 1);
        assert!(!(!m).any());
        assert_eq!(!!m, m);
    }

    #[test]
    fn test_boolean_operators_across_registers() {
        let a = LogicalMask::<u16, 32>::from_fn(|i| i % 2 == 0);
        let b = LogicalMask::<u16, 32>::from_fn(|i| i < 16);

        let and = a & b;
        let or = a | b;
        let xor = a ^ b;
        for i in 0..32 {
            assert_eq!(and.test(i), i % 2 == 0 && i < 16);
            assert_eq!(or.test(i), i % 2 == 0 || i < 16);
            assert_eq!(xor.test(i), (i % 2 == 0) != (i < 16));
        }

        let mut c = a;
        c |= !a;
        assert!(c.all());
        c ^= LogicalMask::splat(true);
        assert!(c.none());
    }

    #[test]
    fn test_assemble_from_vectors() {
        let a = LogicalVector::<f64, 8>::indexes_from_zero();
        let b = LogicalVector::<f64, 8>::broadcast(5.0);
        let m = LogicalMask::assemble(&a, &b, |x, y| x.simd_lt(y));
        assert_eq!(m.to_array(), [true, true, true, true, true, false, false, false]);
        assert_eq!(m, a.simd_lt(&b));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_asserts_in_debug() {
        M8::splat(true).test(8);
    }

    #[test]
    fn test_get_is_the_checked_read() {
        let m = !LogicalMask::<i16, 2>::splat(false);
        assert_eq!(m.get(0), Some(true));
        assert_eq!(m.get(1), Some(true));
        assert_eq!(m.get(2), None);
        assert_eq!(m.get(usize::MAX), None);
        assert!(m.test(1));
    }

    #[test]
    fn test_debug_format() {
        let m = LogicalMask::<f64, 2>::from_array([true, false]);
        assert_eq!(format!("{:?}", m), "[true, false]");
    }
}
