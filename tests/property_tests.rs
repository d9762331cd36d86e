//! Property-based tests using proptest.
//!
//! These check the overflow contract for arbitrary values and layouts rather
//! than the single reference scenario.

use heapsmash::config::HeapConfig;
use heapsmash::memory::{HeapError, HeapModel, MemoryRegion};
use proptest::prelude::*;

/// Printable values without terminators, like a scanf token
fn token(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0x21u8..0x7f, 1..max_len)
}

fn layout() -> impl Strategy<Value = HeapConfig> {
    (1usize..32, 1usize..32, "[a-zA-Z!]{0,40}").prop_map(|(primary, guard, sentinel)| {
        HeapConfig {
            primary_capacity: primary,
            primary_value: "seed".to_string(),
            guard_capacity: guard,
            guard_sentinel: sentinel,
        }
    })
}

proptest! {
    #[test]
    fn prop_short_writes_leave_guard_intact(value in token(7)) {
        // At most 6 bytes plus terminator fits in the 8-byte primary
        let mut heap = HeapModel::reference().unwrap();
        let before = heap.guard().contents().to_vec();

        let report = heap.write_primary_unchecked(&value);

        prop_assert_eq!(report.spilled, 0);
        prop_assert_eq!(heap.guard().contents(), &before[..]);
        prop_assert!(heap.verify_guard_integrity());
    }

    #[test]
    fn prop_long_writes_corrupt_guard(value in token(40)) {
        let mut heap = HeapModel::reference().unwrap();
        let capacity = heap.primary().region().capacity();
        prop_assume!(value.len() >= capacity);

        let report = heap.write_primary_unchecked(&value);

        let overflowed = value.len() - (capacity - 1);
        let in_guard = overflowed.min(heap.guard().region().capacity());
        prop_assert_eq!(report.spilled, in_guard);
        prop_assert!(heap.corrupted_offsets().len() >= 1);
        prop_assert!(!heap.verify_guard_integrity());
    }

    #[test]
    fn prop_verify_is_idempotent(value in token(40)) {
        let mut heap = HeapModel::reference().unwrap();
        heap.write_primary_unchecked(&value);

        let first = heap.verify_guard_integrity();
        let bytes = heap.bytes().to_vec();
        for _ in 0..5 {
            prop_assert_eq!(heap.verify_guard_integrity(), first);
        }
        prop_assert_eq!(heap.bytes(), &bytes[..]);
    }

    #[test]
    fn prop_regions_adjacent_for_any_layout(config in layout()) {
        let heap = HeapModel::new(&config).unwrap();
        let primary = heap.primary();
        let guard = heap.guard();

        prop_assert_eq!(
            guard.address_tag(),
            primary.address_tag() + config.primary_capacity as u64
        );
        prop_assert_eq!(heap.bytes().len(), config.total_size());
        prop_assert!(heap.verify_guard_integrity());
    }

    #[test]
    fn prop_region_image_is_capacity_long(capacity in 1usize..64, initial in ".{0,80}") {
        let region = MemoryRegion::create("r", capacity, initial.as_bytes()).unwrap();
        prop_assert_eq!(region.sentinel().len(), capacity);
    }
}

#[test]
fn test_zero_capacity_always_rejected() {
    for initial in [&b""[..], b"x", b"Unbreakable!"] {
        assert!(matches!(
            MemoryRegion::create("r", 0, initial),
            Err(HeapError::InvalidCapacity { .. })
        ));
    }
}
