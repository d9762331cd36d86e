//! Error type for the front-ends
//!
//! The core only fails while building the heap; the front-ends add I/O and
//! serialization failures on top of that.

use crate::memory::HeapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to build heap: {0}")]
    Heap(#[from] HeapError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}
