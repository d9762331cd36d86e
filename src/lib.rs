//! # Introduction
//!
//! heapsmash is a sandbox for watching a heap buffer overflow happen. Two
//! fixed-size regions are allocated back to back; the first one can be written
//! through a copy that never checks its capacity, and an integrity check on the
//! second one reveals whether the write leaked across the boundary.
//!
//! ## Flow
//!
//! ```text
//! HeapConfig → HeapModel → Session → console menu | TUI | JSON report
//! ```
//!
//! 1. [`config`]: region capacities and initial values; the default is the
//!    8-byte `"Buffer1"` followed by the 13-byte `"Unbreakable!"`.
//! 2. [`memory`]: the simulated heap: one contiguous backing block with
//!    [`memory::MemoryRegion`] views into it and the unchecked write path on
//!    [`memory::HeapModel`].
//! 3. [`session`]: menu commands, the exercise phase and the captured
//!    transcript.
//! 4. [`console`], [`report`], [`ui`]: the three ways of driving a session.
//!
//! The write path is deliberately unsafe in the C sense: overflowing it is
//! the point of the exercise, so nothing here rejects or truncates a write
//! that fits in the block.

pub mod config;
pub mod console;
pub mod error;
pub mod memory;
pub mod report;
pub mod session;
pub mod ui;
