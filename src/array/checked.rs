//! Slice-based transfers with length and alignment validation.
//!
//! The pointer transfers on [`LogicalVector`] trust the caller. The methods
//! here take slices instead and reject buffers that are too short, or not
//! aligned when the policy asks for alignment, before touching memory.

use tracing::debug;

use crate::common::error::{Error, Result};
use crate::common::scalar::{ConvertFrom, Scalar};
use crate::common::simd::Flags;

use super::shape::{Lanes, Shape};
use super::vector::LogicalVector;

impl<T: Scalar, const N: usize> LogicalVector<T, N>
where
    Lanes<N>: Shape<T>,
{
    /// Load the first `N` elements of `src`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferTooSmall`] when `src` has fewer than `N` elements, and
    /// [`Error::Misaligned`] when `flags` requires alignment and `src` does
    /// not start on a [`Self::REGISTER_ALIGN`] boundary.
    pub fn try_load<U: Scalar, F: Flags>(src: &[U], flags: F) -> Result<Self>
    where
        T: ConvertFrom<U>,
    {
        Self::check_buffer::<F>(src.as_ptr() as usize, src.len())?;
        // SAFETY: the buffer holds at least N elements and satisfies the
        // alignment the policy requires.
        Ok(unsafe { Self::load_ptr(src.as_ptr(), flags) })
    }

    /// Store all elements into the first `N` slots of `dst`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::try_load`]; `dst` is left untouched on
    /// error.
    pub fn try_store<U: Scalar, F: Flags>(&self, dst: &mut [U], flags: F) -> Result<()>
    where
        U: ConvertFrom<T>,
    {
        Self::check_buffer::<F>(dst.as_ptr() as usize, dst.len())?;
        // SAFETY: see try_load.
        unsafe { self.store_ptr(dst.as_mut_ptr(), flags) };
        Ok(())
    }

    fn check_buffer<F: Flags>(address: usize, len: usize) -> Result<()> {
        if len < N {
            debug!(required = N, actual = len, "buffer too small for logical vector");
            return Err(Error::BufferTooSmall {
                required: N,
                actual: len,
            });
        }
        if F::ALIGNED && address % Self::REGISTER_ALIGN != 0 {
            debug!(
                address,
                required = Self::REGISTER_ALIGN,
                "misaligned buffer for aligned transfer"
            );
            return Err(Error::Misaligned {
                address,
                required: Self::REGISTER_ALIGN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::simd::{Aligned, Streaming, Unaligned};

    #[repr(C, align(32))]
    struct AlignedBuf([f32; 24]);

    #[test]
    fn test_try_load_accepts_longer_buffers() {
        let src: Vec<i32> = (0..20).collect();
        let v = LogicalVector::<i32, 16>::try_load(&src, Unaligned).unwrap();
        assert_eq!(v[15], 15);

        let mut dst = vec![-1i32; 20];
        v.try_store(&mut dst, Unaligned).unwrap();
        assert_eq!(&dst[..16], &src[..16]);
        assert_eq!(&dst[16..], &[-1; 4]);
    }

    #[test]
    fn test_short_buffer_rejected() {
        let src = [1.0f64; 3];
        let err = LogicalVector::<f64, 4>::try_load(&src, Unaligned).unwrap_err();
        assert_eq!(
            err,
            Error::BufferTooSmall {
                required: 4,
                actual: 3
            }
        );

        let mut dst = [0u16; 7];
        let v = LogicalVector::<u16, 8>::one();
        assert!(v.try_store(&mut dst, Unaligned).is_err());
        assert_eq!(dst, [0; 7]);
    }

    #[test]
    fn test_alignment_checked_only_when_requested() {
        let buf = AlignedBuf(core::array::from_fn(|i| i as f32));
        let align = LogicalVector::<f32, 8>::REGISTER_ALIGN;

        let aligned = LogicalVector::<f32, 8>::try_load(&buf.0, Aligned).unwrap();
        assert_eq!(aligned[0], 0.0);
        let streamed = LogicalVector::<f32, 8>::try_load(&buf.0, Streaming).unwrap();
        assert_eq!(streamed.to_array(), aligned.to_array());

        let shifted = &buf.0[1..];
        let err = LogicalVector::<f32, 8>::try_load(shifted, Aligned).unwrap_err();
        assert!(matches!(err, Error::Misaligned { required, .. } if required == align));
        assert!(LogicalVector::<f32, 8>::try_load(shifted, Streaming).is_err());

        let unaligned = LogicalVector::<f32, 8>::try_load(shifted, Unaligned).unwrap();
        assert_eq!(unaligned[0], 1.0);
    }

    #[test]
    fn test_try_store_converts() {
        let v = LogicalVector::<f32, 4>::from_array([1.9, -1.9, 300.0, 0.0]);
        let mut out = [0i16; 4];
        v.try_store(&mut out, Unaligned).unwrap();
        assert_eq!(out, [1, -1, 300, 0]);
    }
}
