//! Native register masks
//!
//! A comparison between two native registers yields one bit per lane. The
//! bits are kept packed in a `u32`, which covers every register shape in this
//! crate (at most 16 lanes).

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Result of comparing two native registers of `W` lanes.
///
/// Bit `l` is set when the comparison held for lane `l`. Bits at and above
/// `W` are always clear.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegisterMask<const W: usize> {
    bits: u32,
}

impl<const W: usize> RegisterMask<W> {
    /// All `W` lane bits set.
    pub const FULL: u32 = if W >= 32 { u32::MAX } else { (1u32 << W) - 1 };

    /// Create a mask from raw bits; bits outside the lane range are dropped.
    #[inline]
    pub const fn new(bits: u32) -> Self {
        Self { bits: bits & Self::FULL }
    }

    /// Mask with every lane set to `value`.
    #[inline]
    pub const fn splat(value: bool) -> Self {
        Self { bits: if value { Self::FULL } else { 0 } }
    }

    /// Build a mask lane by lane, in ascending lane order.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = 0u32;
        for lane in 0..W {
            bits |= (f(lane) as u32) << lane;
        }
        Self { bits }
    }

    /// Raw lane bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// State of lane `lane`.
    #[inline]
    pub const fn test(self, lane: usize) -> bool {
        lane < W && (self.bits >> lane) & 1 == 1
    }

    /// Check if all lanes are set
    #[inline]
    pub const fn all(self) -> bool {
        self.bits == Self::FULL
    }

    /// Check if any lane is set
    #[inline]
    pub const fn any(self) -> bool {
        self.bits != 0
    }

    /// Check if no lane is set
    #[inline]
    pub const fn none(self) -> bool {
        self.bits == 0
    }

    /// Number of set lanes.
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }
}

/// Native mask contract consumed by [`LogicalMask`](crate::LogicalMask).
pub trait NativeMask:
    Copy
    + Send
    + Sync
    + PartialEq
    + fmt::Debug
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Not<Output = Self>
    + 'static
{
    /// Number of lanes covered by the mask.
    const LANES: usize;

    fn from_fn(f: impl FnMut(usize) -> bool) -> Self;
    fn splat(value: bool) -> Self;
    fn bits(&self) -> u32;
    fn test(&self, lane: usize) -> bool;
}

impl<const W: usize> NativeMask for RegisterMask<W> {
    const LANES: usize = W;

    #[inline(always)]
    fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        RegisterMask::from_fn(f)
    }

    #[inline(always)]
    fn splat(value: bool) -> Self {
        RegisterMask::splat(value)
    }

    #[inline(always)]
    fn bits(&self) -> u32 {
        self.bits
    }

    #[inline(always)]
    fn test(&self, lane: usize) -> bool {
        RegisterMask::test(*self, lane)
    }
}

impl<const W: usize> fmt::Debug for RegisterMask<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries((0..W).map(|lane| self.test(lane))).finish()
    }
}

impl<const W: usize> BitAndAssign for RegisterMask<W> {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl<const W: usize> BitOrAssign for RegisterMask<W> {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl<const W: usize> BitXorAssign for RegisterMask<W> {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.bits ^= rhs.bits;
    }
}

impl<const W: usize> BitAnd for RegisterMask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitand(mut self, rhs: Self) -> Self {
        self &= rhs;
        self
    }
}

impl<const W: usize> BitOr for RegisterMask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl<const W: usize> BitXor for RegisterMask<W> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(mut self, rhs: Self) -> Self {
        self ^= rhs;
        self
    }
}

impl<const W: usize> Not for RegisterMask<W> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self { bits: !self.bits & Self::FULL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_bits() {
        assert_eq!(RegisterMask::<2>::FULL, 0b11);
        assert_eq!(RegisterMask::<16>::FULL, 0xFFFF);
        assert_eq!(RegisterMask::<32>::FULL, u32::MAX);
    }

    #[test]
    fn test_new_drops_out_of_range_bits() {
        let m = RegisterMask::<4>::new(0xFF);
        assert_eq!(m.bits(), 0xF);
        assert!(m.all());
    }

    #[test]
    fn test_from_fn_and_queries() {
        let m = RegisterMask::<8>::from_fn(|lane| lane % 2 == 0);
        assert_eq!(m.bits(), 0b0101_0101);
        assert!(m.test(0));
        assert!(!m.test(1));
        assert!(!m.test(8));
        assert!(m.any());
        assert!(!m.all());
        assert!(!m.none());
        assert_eq!(m.count(), 4);
    }

    #[test]
    fn test_boolean_operators() {
        let a = RegisterMask::<4>::new(0b0011);
        let b = RegisterMask::<4>::new(0b0110);
        assert_eq!((a & b).bits(), 0b0010);
        assert_eq!((a | b).bits(), 0b0111);
        assert_eq!((a ^ b).bits(), 0b0101);
        assert_eq!((!a).bits(), 0b1100);
        assert!((!RegisterMask::<4>::splat(true)).none());
    }

    #[test]
    fn test_debug_lists_lanes() {
        let m = RegisterMask::<2>::new(0b01);
        assert_eq!(format!("{:?}", m), "[true, false]");
    }
}
