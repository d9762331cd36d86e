//! Fixed-capacity memory regions
//!
//! A [`MemoryRegion`] does not own its bytes. It records where it lives inside
//! the heap's backing block (`offset`), how many bytes it was allocated
//! (`capacity`) and the image it was initialized with (`sentinel`). The heap
//! hands out [`RegionView`]s that pair a region with its current bytes.

use super::{display_bytes, Address, HeapError, MAX_HEAP_SIZE};

/// Which of the two heap regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    Primary,
    Guard,
}

impl RegionId {
    /// All regions in allocation order
    pub const ALL: [RegionId; 2] = [RegionId::Primary, RegionId::Guard];
}

/// A named span of the simulated heap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    name: String,
    offset: usize,
    capacity: usize,
    sentinel: Vec<u8>,
}

impl MemoryRegion {
    /// Create a region of `capacity` bytes whose initial image is `initial`
    /// truncated or NUL-padded to `capacity`.
    ///
    /// The region starts at offset 0; the heap moves it into place when it
    /// allocates the backing block.
    pub fn create(
        name: impl Into<String>,
        capacity: usize,
        initial: &[u8],
    ) -> Result<Self, HeapError> {
        let name = name.into();
        if capacity == 0 {
            return Err(HeapError::InvalidCapacity { name, capacity });
        }
        if capacity > MAX_HEAP_SIZE {
            return Err(HeapError::HeapTooLarge {
                requested: capacity,
                limit: MAX_HEAP_SIZE,
            });
        }

        let mut sentinel = vec![0; capacity];
        let len = initial.len().min(capacity);
        sentinel[..len].copy_from_slice(&initial[..len]);

        Ok(MemoryRegion {
            name,
            offset: 0,
            capacity,
            sentinel,
        })
    }

    pub(super) fn placed_at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset of the first byte inside the backing block
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// One past the last byte inside the backing block
    pub fn end(&self) -> usize {
        self.offset + self.capacity
    }

    /// The bytes the region was initialized with, exactly `capacity` long
    pub fn sentinel(&self) -> &[u8] {
        &self.sentinel
    }

    /// Whether a backing-block offset belongs to this region
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset < self.end()
    }
}

/// A region paired with its current contents
#[derive(Debug, Clone, Copy)]
pub struct RegionView<'a> {
    region: &'a MemoryRegion,
    contents: &'a [u8],
    address: Address,
}

impl<'a> RegionView<'a> {
    pub(super) fn new(region: &'a MemoryRegion, contents: &'a [u8], address: Address) -> Self {
        debug_assert_eq!(contents.len(), region.capacity());
        RegionView {
            region,
            contents,
            address,
        }
    }

    pub fn region(&self) -> &'a MemoryRegion {
        self.region
    }

    /// Current stored bytes, exactly `capacity` long
    pub fn contents(&self) -> &'a [u8] {
        self.contents
    }

    /// Current contents as a displayable string, stopping at the first
    /// terminator or at `capacity`, whichever comes first
    pub fn read(&self) -> String {
        display_bytes(self.contents)
    }

    /// Simulated address of the first byte. Display only.
    pub fn address_tag(&self) -> Address {
        self.address
    }

    /// Whether the stored bytes still equal the initial image
    pub fn matches_sentinel(&self) -> bool {
        self.contents == self.region.sentinel()
    }
}
