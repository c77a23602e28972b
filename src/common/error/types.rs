//! Error types for the checked transfer API.
//!
//! The trusted API never reports errors: unsupported element types and widths
//! fail to compile, and caller contract violations are documented under
//! `# Safety`. This type is only produced by the checked layer
//! (`try_load`, `try_store`), which validates buffers before delegating.
use thiserror::Error;

/// Main error type for simd-array operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Buffer holds fewer elements than the vector
    #[error("Buffer too small: need {required} elements, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Buffer address does not satisfy an aligned or streaming policy
    #[error("Misaligned buffer: address {address:#x} is not aligned to {required} bytes")]
    Misaligned { address: usize, required: usize },
}

/// Result type for simd-array operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::BufferTooSmall { required: 8, actual: 3 };
        assert_eq!(e.to_string(), "Buffer too small: need 8 elements, got 3");

        let e = Error::Misaligned { address: 0x1004, required: 32 };
        assert_eq!(e.to_string(), "Misaligned buffer: address 0x1004 is not aligned to 32 bytes");
    }
}
