//! Operator overloads for [`LogicalVector`].
//!
//! Each binary operator comes in four forms: vector and scalar right-hand
//! sides, compound and plain. Scalars are broadcast first. An operator is only
//! available when the native register supports it, so shifts and `!` exist for
//! integer vectors only and unary `-` for signed and floating-point ones.

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use crate::common::scalar::Scalar;

use super::register_set::RegisterStorage;
use super::shape::{Lanes, RegisterOf, Shape};
use super::vector::LogicalVector;

/// Right-hand side used unchanged.
#[inline(always)]
fn as_is<T: Scalar, const N: usize>(rhs: LogicalVector<T, N>) -> LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    rhs
}

/// Divisor with the lanes past `N` set to one, so a partially used register
/// never divides by the zeros held there.
#[inline(always)]
fn divisor<T: Scalar, const N: usize>(mut rhs: LogicalVector<T, N>) -> LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    rhs.fill_inactive(T::ONE);
    rhs
}

macro_rules! impl_binary_ops {
    ($($assign:ident $assign_fn:ident, $op:ident $op_fn:ident => $rhs:ident;)*) => {
        $(
            impl<T: Scalar, const N: usize> $assign for LogicalVector<T, N>
            where
                Lanes<N>: Shape<T>,
                RegisterOf<T, N>: $assign,
            {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    let rhs = $rhs(rhs);
                    self.registers_mut()
                        .assign(rhs.registers(), |a, b| $assign::$assign_fn(a, *b));
                }
            }

            impl<T: Scalar, const N: usize> $assign<T> for LogicalVector<T, N>
            where
                Lanes<N>: Shape<T>,
                RegisterOf<T, N>: $assign,
            {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: T) {
                    $assign::$assign_fn(self, Self::broadcast(rhs));
                }
            }

            impl<T: Scalar, const N: usize> $op for LogicalVector<T, N>
            where
                Lanes<N>: Shape<T>,
                RegisterOf<T, N>: $assign,
            {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(mut self, rhs: Self) -> Self {
                    $assign::$assign_fn(&mut self, rhs);
                    self
                }
            }

            impl<T: Scalar, const N: usize> $op<T> for LogicalVector<T, N>
            where
                Lanes<N>: Shape<T>,
                RegisterOf<T, N>: $assign,
            {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(mut self, rhs: T) -> Self {
                    $assign::$assign_fn(&mut self, Self::broadcast(rhs));
                    self
                }
            }
        )*
    };
}

impl_binary_ops! {
    AddAssign add_assign, Add add => as_is;
    SubAssign sub_assign, Sub sub => as_is;
    MulAssign mul_assign, Mul mul => as_is;
    DivAssign div_assign, Div div => divisor;
    RemAssign rem_assign, Rem rem => divisor;
    BitAndAssign bitand_assign, BitAnd bitand => as_is;
    BitOrAssign bitor_assign, BitOr bitor => as_is;
    BitXorAssign bitxor_assign, BitXor bitxor => as_is;
    ShlAssign shl_assign, Shl shl => as_is;
    ShrAssign shr_assign, Shr shr => as_is;
}

impl<T: Scalar, const N: usize> Neg for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
    RegisterOf<T, N>: Neg<Output = RegisterOf<T, N>>,
{
    type Output = Self;

    #[inline(always)]
    fn neg(mut self) -> Self {
        self.registers_mut().call(|r| *r = -*r);
        self
    }
}

impl<T: Scalar, const N: usize> Not for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
    RegisterOf<T, N>: Not<Output = RegisterOf<T, N>>,
{
    type Output = Self;

    #[inline(always)]
    fn not(mut self) -> Self {
        self.registers_mut().call(|r| *r = !*r);
        self
    }
}
