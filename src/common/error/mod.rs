//! Unified error types for simd-array.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
