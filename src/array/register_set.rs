//! Fixed-size register container.
//!
//! [`RegisterSet`] owns `K` native registers and applies an operation to each
//! of them. Registers are always visited in ascending index order, and the
//! set is laid out register 0 first, so a set of `K` registers of `W` lanes
//! covers elements `0..K * W` of a flat buffer in order.

/// Ownership container for `K` registers of type `R`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(transparent)]
pub struct RegisterSet<R, const K: usize>([R; K]);

/// Register fan-out primitives used by the logical vector and mask types.
pub trait RegisterStorage: Copy + Send + Sync + 'static {
    type Register: Copy;

    /// Number of registers.
    const COUNT: usize;

    /// Build the set register by register, in ascending order.
    fn from_fn(f: impl FnMut(usize) -> Self::Register) -> Self;

    fn registers(&self) -> &[Self::Register];

    fn registers_mut(&mut self) -> &mut [Self::Register];

    /// Every register set to `register`.
    #[inline(always)]
    fn splat(register: Self::Register) -> Self {
        Self::from_fn(|_| register)
    }

    /// Register `k`.
    #[inline(always)]
    fn register(&self, k: usize) -> &Self::Register {
        &self.registers()[k]
    }

    /// Apply a mutating operation to every register.
    #[inline(always)]
    fn call(&mut self, mut f: impl FnMut(&mut Self::Register)) {
        for r in self.registers_mut() {
            f(r);
        }
    }

    /// Combine every register with the register at the same index in `rhs`.
    #[inline(always)]
    fn assign(&mut self, rhs: &Self, mut f: impl FnMut(&mut Self::Register, &Self::Register)) {
        for (a, b) in self.registers_mut().iter_mut().zip(rhs.registers()) {
            f(a, b);
        }
    }
}

impl<R, const K: usize> RegisterStorage for RegisterSet<R, K>
where
    R: Copy + Send + Sync + 'static,
{
    type Register = R;

    const COUNT: usize = K;

    #[inline(always)]
    fn from_fn(f: impl FnMut(usize) -> R) -> Self {
        Self(core::array::from_fn(f))
    }

    #[inline(always)]
    fn registers(&self) -> &[R] {
        &self.0
    }

    #[inline(always)]
    fn registers_mut(&mut self) -> &mut [R] {
        &mut self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::simd::{I32x4, NativeVector};

    type Set = RegisterSet<I32x4, 3>;

    #[test]
    fn test_from_fn_visits_in_order() {
        let mut seen = Vec::new();
        let set = Set::from_fn(|k| {
            seen.push(k);
            I32x4::indexes_from(k * I32x4::LANES)
        });
        assert_eq!(seen, [0, 1, 2]);
        assert_eq!(set.register(2).to_array(), [8, 9, 10, 11]);
        assert_eq!(Set::COUNT, 3);
    }

    #[test]
    fn test_call_reaches_every_register() {
        let mut set = Set::splat(I32x4::zeroed());
        set.call(|r| r.increment());
        for r in set.registers() {
            assert_eq!(r.to_array(), [1; 4]);
        }
    }

    #[test]
    fn test_assign_pairs_registers_by_index() {
        let mut a = Set::from_fn(|k| I32x4::splat(k as i32));
        let b = Set::from_fn(|k| I32x4::splat(10 * k as i32));
        let mut order = Vec::new();
        a.assign(&b, |x, y| {
            order.push(x.to_array()[0]);
            *x += *y;
        });
        assert_eq!(order, [0, 1, 2]);
        assert_eq!(a.register(1).to_array(), [11; 4]);
        assert_eq!(a.register(2).to_array(), [22; 4]);
    }
}
