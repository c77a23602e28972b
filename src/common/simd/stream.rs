//! Non-temporal register transfers
//!
//! Streaming stores bypass the cache so that large output buffers do not
//! evict the working set. The implementation is picked at compile time:
//! - x86_64: `MOVNTDQ` (SSE2, always available) for stores, `MOVNTDQA`
//!   (SSE4.1) for loads when the target enables it
//! - Other: plain aligned transfer
//!
//! Non-temporal stores are weakly ordered. Publishing the written buffer to
//! another thread needs a store fence, which these helpers do not issue.

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use zerocopy::{FromBytes, Immutable, IntoBytes};

/// Read a whole register from `src` with a non-temporal hint.
///
/// # Safety
///
/// `src` must be valid for reads of `size_of::<V>()` bytes and aligned to
/// 16 bytes. `size_of::<V>()` must be a multiple of 16.
#[inline(always)]
pub unsafe fn stream_load<V: FromBytes + IntoBytes>(src: *const V) -> V {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
    {
        let mut out = V::new_zeroed();
        unsafe { stream_load_sse41(src.cast::<u8>(), out.as_mut_bytes()) };
        out
    }

    #[cfg(not(all(target_arch = "x86_64", target_feature = "sse4.1")))]
    {
        unsafe { src.read() }
    }
}

/// Write a whole register to `dst` with non-temporal stores.
///
/// # Safety
///
/// `dst` must be valid for writes of `size_of::<V>()` bytes and aligned to
/// 16 bytes. `size_of::<V>()` must be a multiple of 16.
#[inline(always)]
pub unsafe fn stream_store<V: IntoBytes + Immutable>(dst: *mut V, value: &V) {
    #[cfg(target_arch = "x86_64")]
    {
        unsafe { stream_store_sse2(dst.cast::<u8>(), value.as_bytes()) }
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        unsafe { core::ptr::copy_nonoverlapping(value as *const V, dst, 1) }
    }
}

// === x86_64 implementations ===

#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
#[target_feature(enable = "sse4.1")]
#[inline]
unsafe fn stream_load_sse41(src: *const u8, out: &mut [u8]) {
    debug_assert_eq!(out.len() % 16, 0);
    unsafe {
        for (i, chunk) in out.chunks_exact_mut(16).enumerate() {
            let v = _mm_stream_load_si128(src.add(i * 16).cast_mut() as *mut __m128i);
            _mm_storeu_si128(chunk.as_mut_ptr() as *mut __m128i, v);
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
#[inline]
unsafe fn stream_store_sse2(dst: *mut u8, bytes: &[u8]) {
    debug_assert_eq!(bytes.len() % 16, 0);
    unsafe {
        for (i, chunk) in bytes.chunks_exact(16).enumerate() {
            let v = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
            _mm_stream_si128(dst.add(i * 16) as *mut __m128i, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C, align(32))]
    #[derive(Debug, Clone, Copy, PartialEq, FromBytes, IntoBytes, Immutable)]
    struct Block([u32; 8]);

    #[test]
    fn test_stream_store_then_load() {
        let value = Block([1, 2, 3, 4, 5, 6, 7, 8]);
        let mut dst = Block([0; 8]);

        unsafe { stream_store(&mut dst as *mut Block, &value) };
        let back = unsafe { stream_load(&dst as *const Block) };

        assert_eq!(dst, value);
        assert_eq!(back, value);
    }
}
