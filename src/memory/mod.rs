//! Memory model for the overflow sandbox
//!
//! This module provides the core memory abstractions:
//! - [`region`]: Fixed-capacity regions described as views into a backing block
//! - [`heap`]: The two-region heap with its unchecked write path and guard check
//! - [`errors`]: Construction-time errors
//!
//! # Layout
//!
//! Both regions are carved out of one contiguous backing block, primary first:
//!
//! ```text
//! 0x10000000                 0x10000008
//! | Buffer1 (8 bytes)       | Buffer2 (13 bytes)               |
//! ```
//!
//! A write that runs past the end of the primary region lands in the guard
//! region's bytes, exactly as an unchecked `strcpy` into adjacent `malloc`
//! chunks would.

pub mod errors;
pub mod heap;
pub mod region;

pub use errors::HeapError;
pub use heap::{HeapModel, HeapState, RegionState, WriteReport};
pub use region::{MemoryRegion, RegionId, RegionView};

/// Simulated memory address type (64-bit)
pub type Address = u64;

/// Starting address of the simulated heap block
/// Chosen to look like a typical heap address in the address table
pub const HEAP_ADDRESS_START: Address = 0x1000_0000;

/// Upper bound on the backing block size
pub const MAX_HEAP_SIZE: usize = 64 * 1024;

/// Byte that terminates a displayed string
pub const TERMINATOR: u8 = 0;

/// Decode stored bytes the way `printf("%s")` would show them: stop at the
/// first terminator, replace non-printable bytes with `.`
pub fn display_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != TERMINATOR)
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_stops_at_terminator() {
        assert_eq!(display_bytes(b"Buffer1\0garbage"), "Buffer1");
    }

    #[test]
    fn test_display_without_terminator_uses_all_bytes() {
        assert_eq!(display_bytes(b"AAAA"), "AAAA");
    }

    #[test]
    fn test_display_masks_control_bytes() {
        assert_eq!(display_bytes(&[b'a', 0x07, b'b', 0]), "a.b");
    }
}
