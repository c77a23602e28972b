//! Fixed-width logical vector.

use core::fmt;
use core::ops::Index;

use crate::common::scalar::{ConvertFrom, Scalar};
use crate::common::simd::{Flags, NativeVector, Unaligned};

use super::mask::LogicalMask;
use super::register_set::RegisterStorage;
use super::shape::{Lanes, RegisterOf, RegistersOf, Shape};

/// `N` elements of `T`, stored in as many native registers as needed.
///
/// The register type and count are chosen at compile time by
/// [`Shape`]; every operation is applied register by register without
/// runtime dispatch. The type is `Copy` and owns its registers outright.
///
/// ```rust
/// use simd_array::LogicalVector;
///
/// let v = LogicalVector::<i32, 8>::from_array([1, 2, 3, 4, 5, 6, 7, 8]);
/// let w = v + LogicalVector::broadcast(10);
/// assert_eq!(w.to_array(), [11, 12, 13, 14, 15, 16, 17, 18]);
/// assert_eq!(v.simd_gt(&LogicalVector::broadcast(6)).count(), 2);
/// ```
#[repr(transparent)]
pub struct LogicalVector<T: Scalar, const N: usize>
where
    Lanes<N>: Shape<T>,
{
    d: RegistersOf<T, N>,
}

macro_rules! compare_ops {
    ($($(#[$attr:meta])* $name:ident;)*) => {
        $(
            $(#[$attr])*
            #[inline(always)]
            pub fn $name(&self, rhs: &Self) -> LogicalMask<T, N> {
                LogicalMask::assemble(self, rhs, <RegisterOf<T, N> as NativeVector>::$name)
            }
        )*
    };
}

impl<T: Scalar, const N: usize> LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    /// Number of elements.
    pub const SIZE: usize = N;
    /// Lanes in one native register.
    pub const NATIVE_WIDTH: usize = <RegisterOf<T, N> as NativeVector>::LANES;
    /// Native registers backing the vector.
    pub const REGISTER_COUNT: usize = <RegistersOf<T, N> as RegisterStorage>::COUNT;
    /// Alignment in bytes required by [`Aligned`](crate::Aligned) and
    /// [`Streaming`](crate::Streaming) transfers.
    pub const REGISTER_ALIGN: usize = <RegisterOf<T, N> as NativeVector>::ALIGN;

    /// Lanes per register that hold elements; below `NATIVE_WIDTH` only when
    /// the whole vector fits in part of one register.
    const ACTIVE_LANES: usize = if N < Self::NATIVE_WIDTH {
        N
    } else {
        Self::NATIVE_WIDTH
    };

    const LAYOUT: () = {
        assert!(N.is_power_of_two());
        assert!(Self::REGISTER_COUNT * Self::NATIVE_WIDTH >= N);
        assert!(N < Self::NATIVE_WIDTH || Self::REGISTER_COUNT * Self::NATIVE_WIDTH == N);
        assert!(
            core::mem::size_of::<RegisterOf<T, N>>()
                == Self::NATIVE_WIDTH * core::mem::size_of::<T>()
        );
    };

    /// Wrap an existing register set.
    #[inline(always)]
    pub fn from_registers(d: RegistersOf<T, N>) -> Self {
        let () = Self::LAYOUT;
        Self { d }
    }

    #[inline(always)]
    fn build(f: impl FnMut(usize) -> RegisterOf<T, N>) -> Self {
        Self::from_registers(<RegistersOf<T, N> as RegisterStorage>::from_fn(f))
    }

    /// The backing registers, register 0 holding elements `0..NATIVE_WIDTH`.
    #[inline(always)]
    pub fn registers(&self) -> &RegistersOf<T, N> {
        &self.d
    }

    #[inline(always)]
    pub fn registers_mut(&mut self) -> &mut RegistersOf<T, N> {
        &mut self.d
    }

    /// Set the lanes past `N` of a partially used register to `value`.
    /// No-op when every lane holds an element.
    #[inline(always)]
    pub(crate) fn fill_inactive(&mut self, value: T) {
        if Self::ACTIVE_LANES < Self::NATIVE_WIDTH {
            self.d.call(|r| r.lanes_mut()[Self::ACTIVE_LANES..].fill(value));
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// All elements zero.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::build(|_| RegisterOf::<T, N>::zeroed())
    }

    /// All elements one.
    #[inline(always)]
    pub fn one() -> Self {
        Self::build(|_| RegisterOf::<T, N>::one())
    }

    /// Element `i` equals `i`.
    #[inline(always)]
    pub fn indexes_from_zero() -> Self {
        Self::build(|k| RegisterOf::<T, N>::indexes_from(k * Self::NATIVE_WIDTH))
    }

    /// Every element set to `value`.
    #[inline(always)]
    pub fn broadcast(value: T) -> Self {
        Self::build(|_| RegisterOf::<T, N>::splat(value))
    }

    /// Element `i` set to `f(i)`, called in ascending order.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> T) -> Self {
        Self::build(|k| {
            RegisterOf::<T, N>::from_fn(|lane| {
                let i = k * Self::NATIVE_WIDTH + lane;
                if i < N { f(i) } else { T::ZERO }
            })
        })
    }

    #[inline(always)]
    pub fn from_array(elements: [T; N]) -> Self {
        Self::from_fn(|i| elements[i])
    }

    /// Load `N` elements, converting each from `U` when `U` is not `T`.
    #[inline(always)]
    pub fn load<U: Scalar>(src: &[U; N]) -> Self
    where
        T: ConvertFrom<U>,
    {
        // SAFETY: `src` holds exactly N readable elements and `Unaligned`
        // carries no alignment requirement.
        unsafe { Self::load_ptr(src.as_ptr(), Unaligned) }
    }

    /// Load `N` elements from `src` under the given policy.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `N` elements of `U`. With
    /// [`Aligned`](crate::Aligned) or [`Streaming`](crate::Streaming) it must
    /// also be aligned to [`Self::REGISTER_ALIGN`] bytes.
    #[inline(always)]
    pub unsafe fn load_ptr<U: Scalar, F: Flags>(src: *const U, _flags: F) -> Self
    where
        T: ConvertFrom<U>,
    {
        if <T as ConvertFrom<U>>::IDENTITY && N >= Self::NATIVE_WIDTH {
            let src = src.cast::<T>();
            Self::build(|k| unsafe { RegisterOf::<T, N>::load::<F>(src.add(k * Self::NATIVE_WIDTH)) })
        } else {
            Self::build(|k| unsafe {
                RegisterOf::<T, N>::load_converted(src.add(k * Self::NATIVE_WIDTH), Self::ACTIVE_LANES)
            })
        }
    }

    /// Overwrite all elements from `src`.
    #[inline(always)]
    pub fn copy_from<U: Scalar>(&mut self, src: &[U; N])
    where
        T: ConvertFrom<U>,
    {
        *self = Self::load(src);
    }

    /// Overwrite all elements from `src` under the given policy.
    ///
    /// # Safety
    ///
    /// Same contract as [`Self::load_ptr`].
    #[inline(always)]
    pub unsafe fn copy_from_ptr<U: Scalar, F: Flags>(&mut self, src: *const U, flags: F)
    where
        T: ConvertFrom<U>,
    {
        *self = unsafe { Self::load_ptr(src, flags) };
    }

    /// Element-wise numeric conversion of a vector of the same width.
    #[inline(always)]
    pub fn convert_from<U: Scalar>(other: &LogicalVector<U, N>) -> Self
    where
        T: ConvertFrom<U>,
        Lanes<N>: Shape<U>,
    {
        Self::load(&other.to_array())
    }

    /// Element-wise numeric conversion into another element type.
    #[inline(always)]
    pub fn cast<U: Scalar>(self) -> LogicalVector<U, N>
    where
        U: ConvertFrom<T>,
        Lanes<N>: Shape<U>,
    {
        LogicalVector::convert_from(&self)
    }

    // ------------------------------------------------------------------
    // Store
    // ------------------------------------------------------------------

    /// Store `N` elements, converting each to `U` when `U` is not `T`.
    #[inline(always)]
    pub fn store<U: Scalar>(&self, dst: &mut [U; N])
    where
        U: ConvertFrom<T>,
    {
        // SAFETY: `dst` holds exactly N writable elements and `Unaligned`
        // carries no alignment requirement.
        unsafe { self.store_ptr(dst.as_mut_ptr(), Unaligned) }
    }

    /// Store `N` elements to `dst` under the given policy.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes of `N` elements of `U`. With
    /// [`Aligned`](crate::Aligned) or [`Streaming`](crate::Streaming) it must
    /// also be aligned to [`Self::REGISTER_ALIGN`] bytes.
    #[inline(always)]
    pub unsafe fn store_ptr<U: Scalar, F: Flags>(&self, dst: *mut U, _flags: F)
    where
        U: ConvertFrom<T>,
    {
        if <U as ConvertFrom<T>>::IDENTITY && N >= Self::NATIVE_WIDTH {
            let dst = dst.cast::<T>();
            for (k, r) in self.d.registers().iter().enumerate() {
                unsafe { r.store::<F>(dst.add(k * Self::NATIVE_WIDTH)) };
            }
        } else {
            for (k, r) in self.d.registers().iter().enumerate() {
                unsafe { r.store_converted(dst.add(k * Self::NATIVE_WIDTH), Self::ACTIVE_LANES) };
            }
        }
    }

    #[inline(always)]
    pub fn to_array(&self) -> [T; N] {
        let mut out = [T::ZERO; N];
        out.copy_from_slice(self.as_slice());
        out
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// The `N` elements as a flat slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        let registers = self.d.registers();
        // SAFETY: registers are contiguous and each is exactly NATIVE_WIDTH
        // elements of T with no padding (checked in LAYOUT), so the set holds
        // REGISTER_COUNT * NATIVE_WIDTH >= N initialized elements in order.
        unsafe { core::slice::from_raw_parts(registers.as_ptr().cast::<T>(), N) }
    }

    /// Element `i`, or `None` when `i >= N`.
    #[inline(always)]
    pub fn get(&self, i: usize) -> Option<T> {
        self.as_slice().get(i).copied()
    }

    /// Element `i` without a bounds check.
    ///
    /// # Safety
    ///
    /// `i` must be less than `N`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, i: usize) -> T {
        unsafe { *self.as_slice().get_unchecked(i) }
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    compare_ops! {
        /// Element-wise `==`.
        simd_eq;
        /// Element-wise `!=`.
        simd_ne;
        /// Element-wise `<`.
        simd_lt;
        /// Element-wise `<=`.
        simd_le;
        /// Element-wise `>`.
        simd_gt;
        /// Element-wise `>=`.
        simd_ge;
    }

    // ------------------------------------------------------------------
    // Increment / decrement
    // ------------------------------------------------------------------

    /// Prefix increment: add one to every element, return the updated vector.
    #[inline(always)]
    pub fn increment(&mut self) -> &mut Self {
        self.d.call(NativeVector::increment);
        self
    }

    /// Prefix decrement.
    #[inline(always)]
    pub fn decrement(&mut self) -> &mut Self {
        self.d.call(NativeVector::decrement);
        self
    }

    /// Postfix increment: return the value before the increment.
    #[inline(always)]
    pub fn post_increment(&mut self) -> Self {
        let before = *self;
        self.d.call(NativeVector::increment);
        before
    }

    /// Postfix decrement.
    #[inline(always)]
    pub fn post_decrement(&mut self) -> Self {
        let before = *self;
        self.d.call(NativeVector::decrement);
        before
    }

    // ------------------------------------------------------------------
    // Predicated operations
    // ------------------------------------------------------------------

    /// Element `i` from `if_true` where `mask[i]` is set, else from `if_false`.
    #[inline(always)]
    pub fn select(mask: &LogicalMask<T, N>, if_true: Self, if_false: Self) -> Self {
        let masks = mask.registers();
        Self::build(|k| {
            RegisterOf::<T, N>::select(masks.register(k), if_true.d.register(k), if_false.d.register(k))
        })
    }

    /// Overwrite the elements where `mask` is set with `value`.
    #[inline(always)]
    pub fn assign_where(&mut self, mask: &LogicalMask<T, N>, value: Self) {
        *self = Self::select(mask, value, *self);
    }
}

impl<T: Scalar, const N: usize> Clone for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar, const N: usize> Copy for LogicalVector<T, N> where Lanes<N>: Shape<T> {}

impl<T: Scalar, const N: usize> Default for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar, const N: usize> From<T> for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::broadcast(value)
    }
}

impl<T: Scalar, const N: usize> From<[T; N]> for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn from(elements: [T; N]) -> Self {
        Self::from_array(elements)
    }
}

impl<T: Scalar, const N: usize> From<LogicalVector<T, N>> for [T; N]
where
    Lanes<N>: Shape<T>,
{
    #[inline(always)]
    fn from(v: LogicalVector<T, N>) -> Self {
        v.to_array()
    }
}

impl<T: Scalar, const N: usize> Index<usize> for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    type Output = T;

    /// Panics when `i >= N`; see [`LogicalVector::get_unchecked`] for the
    /// unchecked read.
    #[inline(always)]
    fn index(&self, i: usize) -> &T {
        &self.as_slice()[i]
    }
}

impl<T: Scalar, const N: usize> fmt::Debug for LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
