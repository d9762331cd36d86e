//! Error types for the simulated heap
//!
//! Only region construction can fail. Overflowing writes and integrity
//! mismatches are observable outcomes of the exercise and are reported through
//! return values instead.

use thiserror::Error;

/// Errors raised while building the simulated heap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// A region was requested with a capacity of zero bytes
    #[error("invalid capacity for region '{name}': {capacity} (must be at least 1 byte)")]
    InvalidCapacity { name: String, capacity: usize },

    /// The two regions together do not fit in the simulated address space
    #[error("heap too large: {requested} bytes requested, limit is {limit}")]
    HeapTooLarge { requested: usize, limit: usize },
}
