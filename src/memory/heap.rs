//! The two-region simulated heap
//!
//! [`HeapModel`] owns one contiguous backing block and two regions carved out
//! of it: `primary` first, `guard` immediately after. The write path into
//! `primary` is deliberately unchecked. Bytes past the primary's capacity are
//! deposited into the guard's storage, and [`HeapModel::verify_guard_integrity`]
//! detects the damage.
//!
//! The backing block never grows. Bytes that would land past its end are
//! discarded and counted in [`WriteReport::dropped`].

use super::region::{MemoryRegion, RegionId, RegionView};
use super::{Address, HeapError, HEAP_ADDRESS_START, MAX_HEAP_SIZE, TERMINATOR};
use crate::config::HeapConfig;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of one unchecked write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Bytes the copy tried to store (value plus terminator)
    pub requested: usize,
    /// Bytes actually stored in the backing block
    pub written: usize,
    /// Bytes that landed past the primary region's capacity
    pub spilled: usize,
    /// Bytes that fell past the end of the backing block
    pub dropped: usize,
}

impl WriteReport {
    /// Whether the write overran the primary region
    pub fn overflowed(&self) -> bool {
        self.spilled > 0 || self.dropped > 0
    }
}

/// Display snapshot of one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionState {
    pub name: String,
    pub address: Address,
    pub capacity: usize,
    pub value: String,
    pub bytes: Vec<u8>,
    pub matches_initial: bool,
}

impl RegionState {
    fn from_view(view: &RegionView<'_>) -> Self {
        RegionState {
            name: view.region().name().to_string(),
            address: view.address_tag(),
            capacity: view.region().capacity(),
            value: view.read(),
            bytes: view.contents().to_vec(),
            matches_initial: view.matches_sentinel(),
        }
    }
}

/// Display snapshot of the whole heap, regions in allocation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeapState {
    pub regions: Vec<RegionState>,
}

impl HeapState {
    pub fn primary(&self) -> &RegionState {
        &self.regions[0]
    }

    pub fn guard(&self) -> &RegionState {
        &self.regions[1]
    }
}

/// Two adjacent regions in one backing block
#[derive(Debug, Clone)]
pub struct HeapModel {
    block: Vec<u8>,
    primary: MemoryRegion,
    guard: MemoryRegion,
    base_address: Address,
}

impl HeapModel {
    /// Allocate both regions from `config`, primary first
    pub fn new(config: &HeapConfig) -> Result<Self, HeapError> {
        // Size first: region creation allocates the sentinel images
        let total = config.total_size();
        if total > MAX_HEAP_SIZE {
            return Err(HeapError::HeapTooLarge {
                requested: total,
                limit: MAX_HEAP_SIZE,
            });
        }

        let primary = MemoryRegion::create(
            "Buffer1",
            config.primary_capacity,
            config.primary_value.as_bytes(),
        )?;
        let guard = MemoryRegion::create(
            "Buffer2",
            config.guard_capacity,
            config.guard_sentinel.as_bytes(),
        )?;

        let primary = primary.placed_at(0);
        let guard = guard.placed_at(primary.end());

        let mut block = Vec::with_capacity(total);
        block.extend_from_slice(primary.sentinel());
        block.extend_from_slice(guard.sentinel());

        debug!(
            primary = primary.capacity(),
            guard = guard.capacity(),
            base = HEAP_ADDRESS_START,
            "allocated heap block"
        );

        Ok(HeapModel {
            block,
            primary,
            guard,
            base_address: HEAP_ADDRESS_START,
        })
    }

    /// The reference scenario: 8-byte "Buffer1" then 13-byte "Unbreakable!"
    pub fn reference() -> Result<Self, HeapError> {
        Self::new(&HeapConfig::default())
    }

    /// Copy `value` plus a terminator into the primary region without any
    /// bounds check against its capacity.
    ///
    /// Excess bytes are written into the guard region's storage. Nothing is
    /// rejected and no error is raised.
    pub fn write_primary_unchecked(&mut self, value: &[u8]) -> WriteReport {
        let start = self.primary.offset();
        let requested = value.len() + 1;
        let written = requested.min(self.block.len() - start);

        let dest = &mut self.block[start..start + written];
        let from_value = written.min(value.len());
        dest[..from_value].copy_from_slice(&value[..from_value]);
        if written > value.len() {
            dest[value.len()] = TERMINATOR;
        }

        let report = WriteReport {
            requested,
            written,
            spilled: written.saturating_sub(self.primary.capacity()),
            dropped: requested - written,
        };

        if report.spilled > 0 {
            warn!(
                capacity = self.primary.capacity(),
                requested,
                spilled = report.spilled,
                "write overran {} into {}",
                self.primary.name(),
                self.guard.name()
            );
        } else {
            debug!(requested, "write fit inside {}", self.primary.name());
        }
        if report.dropped > 0 {
            warn!(
                dropped = report.dropped,
                "write ran past the end of the heap block"
            );
        }

        report
    }

    /// `true` when the guard region's bytes still equal its sentinel
    pub fn verify_guard_integrity(&self) -> bool {
        let intact = self.guard().matches_sentinel();
        info!(intact, "checked {} integrity", self.guard.name());
        intact
    }

    /// Address and displayed value of each region, in allocation order
    pub fn describe_state(&self) -> HeapState {
        HeapState {
            regions: RegionId::ALL
                .iter()
                .map(|&id| RegionState::from_view(&self.region(id)))
                .collect(),
        }
    }

    pub fn region(&self, id: RegionId) -> RegionView<'_> {
        let region = match id {
            RegionId::Primary => &self.primary,
            RegionId::Guard => &self.guard,
        };
        RegionView::new(
            region,
            &self.block[region.offset()..region.end()],
            self.address_of(region.offset()),
        )
    }

    pub fn primary(&self) -> RegionView<'_> {
        self.region(RegionId::Primary)
    }

    pub fn guard(&self) -> RegionView<'_> {
        self.region(RegionId::Guard)
    }

    /// Which region a backing-block offset belongs to
    pub fn owner_of(&self, offset: usize) -> Option<RegionId> {
        if self.primary.contains(offset) {
            Some(RegionId::Primary)
        } else if self.guard.contains(offset) {
            Some(RegionId::Guard)
        } else {
            None
        }
    }

    /// Guard-relative offsets whose byte differs from the sentinel
    pub fn corrupted_offsets(&self) -> Vec<usize> {
        let guard = self.guard();
        guard
            .contents()
            .iter()
            .zip(guard.region().sentinel())
            .enumerate()
            .filter(|(_, (current, expected))| current != expected)
            .map(|(i, _)| i)
            .collect()
    }

    /// The whole backing block
    pub fn bytes(&self) -> &[u8] {
        &self.block
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    /// Simulated address of a backing-block offset
    pub fn address_of(&self, offset: usize) -> Address {
        self.base_address + offset as Address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> HeapModel {
        HeapModel::reference().expect("reference heap")
    }

    #[test]
    fn test_regions_are_adjacent() {
        let heap = model();
        let primary = heap.primary();
        let guard = heap.guard();
        assert_eq!(primary.address_tag(), HEAP_ADDRESS_START);
        assert_eq!(guard.address_tag(), HEAP_ADDRESS_START + 8);
        assert_eq!(heap.bytes().len(), 21);
    }

    #[test]
    fn test_initial_state() {
        let state = model().describe_state();
        assert_eq!(state.primary().value, "Buffer1");
        assert_eq!(state.guard().value, "Unbreakable!");
        assert_eq!(state.primary().name, "Buffer1");
        assert_eq!(state.guard().name, "Buffer2");
    }

    #[test]
    fn test_fitting_write() {
        let mut heap = model();
        let report = heap.write_primary_unchecked(b"Hi");
        assert_eq!(
            report,
            WriteReport {
                requested: 3,
                written: 3,
                spilled: 0,
                dropped: 0
            }
        );
        assert_eq!(heap.primary().read(), "Hi");
        assert!(heap.verify_guard_integrity());
    }

    #[test]
    fn test_seven_bytes_exactly_fill_primary() {
        let mut heap = model();
        let report = heap.write_primary_unchecked(b"1234567");
        assert!(!report.overflowed());
        assert!(heap.verify_guard_integrity());
    }

    #[test]
    fn test_terminator_alone_corrupts_guard() {
        let mut heap = model();
        let report = heap.write_primary_unchecked(b"12345678");
        assert_eq!(report.spilled, 1);
        assert_eq!(heap.guard().contents()[0], 0);
        assert_eq!(heap.guard().read(), "");
        assert!(!heap.verify_guard_integrity());
        assert_eq!(heap.corrupted_offsets(), vec![0]);
    }

    #[test]
    fn test_overflow_spills_into_guard() {
        let mut heap = model();
        let report = heap.write_primary_unchecked(b"AAAAAAAAAAAAAAAAAAAA");
        assert_eq!(report.requested, 21);
        assert_eq!(report.written, 21);
        assert_eq!(report.spilled, 13);
        assert_eq!(report.dropped, 0);
        assert_eq!(heap.primary().read(), "AAAAAAAA");
        assert_eq!(heap.guard().read(), "AAAAAAAAAAAA");
        assert!(!heap.verify_guard_integrity());
    }

    #[test]
    fn test_write_past_block_end_is_dropped() {
        let mut heap = model();
        let value = vec![b'B'; 30];
        let report = heap.write_primary_unchecked(&value);
        assert_eq!(report.written, 21);
        assert_eq!(report.dropped, 10);
        assert!(heap.bytes().iter().all(|&b| b == b'B'));
        assert_eq!(heap.guard().read(), "BBBBBBBBBBBBB");
    }

    #[test]
    fn test_rewriting_sentinel_bytes_restores_guard() {
        let mut heap = model();
        heap.write_primary_unchecked(b"AAAAAAAAAAAA");
        assert!(!heap.verify_guard_integrity());

        let mut value = b"AAAAAAAA".to_vec();
        value.extend_from_slice(b"Unbreakable!");
        heap.write_primary_unchecked(&value);
        assert!(heap.verify_guard_integrity());
    }

    #[test]
    fn test_owner_of() {
        let heap = model();
        assert_eq!(heap.owner_of(0), Some(RegionId::Primary));
        assert_eq!(heap.owner_of(7), Some(RegionId::Primary));
        assert_eq!(heap.owner_of(8), Some(RegionId::Guard));
        assert_eq!(heap.owner_of(20), Some(RegionId::Guard));
        assert_eq!(heap.owner_of(21), None);
    }

    #[test]
    fn test_invalid_capacity_prevents_construction() {
        let config = HeapConfig {
            guard_capacity: 0,
            ..HeapConfig::default()
        };
        assert!(matches!(
            HeapModel::new(&config),
            Err(HeapError::InvalidCapacity { capacity: 0, .. })
        ));
    }

    #[test]
    fn test_huge_capacity_rejected() {
        let config = HeapConfig {
            primary_capacity: usize::MAX,
            ..HeapConfig::default()
        };
        assert_eq!(
            HeapModel::new(&config).unwrap_err(),
            HeapError::HeapTooLarge {
                requested: usize::MAX,
                limit: MAX_HEAP_SIZE
            }
        );

        let config = HeapConfig {
            guard_capacity: usize::MAX,
            ..HeapConfig::default()
        };
        assert!(matches!(
            HeapModel::new(&config),
            Err(HeapError::HeapTooLarge { .. })
        ));
    }

    #[test]
    fn test_oversized_heap_rejected() {
        let config = HeapConfig {
            primary_capacity: MAX_HEAP_SIZE,
            ..HeapConfig::default()
        };
        assert!(matches!(
            HeapModel::new(&config),
            Err(HeapError::HeapTooLarge { .. })
        ));
    }
}
