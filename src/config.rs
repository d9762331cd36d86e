//! Heap layout configuration
//!
//! [`HeapConfig::default`] is the reference scenario: an 8-byte `Buffer1`
//! followed by a 13-byte `Buffer2` holding `"Unbreakable!"`.

/// Default capacity of the primary region
pub const PRIMARY_CAPACITY: usize = 8;

/// Default initial value of the primary region
pub const PRIMARY_VALUE: &str = "Buffer1";

/// Default capacity of the guard region
pub const GUARD_CAPACITY: usize = 13;

/// Default sentinel stored in the guard region
pub const GUARD_SENTINEL: &str = "Unbreakable!";

/// Capacities and initial values for both regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapConfig {
    pub primary_capacity: usize,
    pub primary_value: String,
    pub guard_capacity: usize,
    pub guard_sentinel: String,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            primary_capacity: PRIMARY_CAPACITY,
            primary_value: PRIMARY_VALUE.to_string(),
            guard_capacity: GUARD_CAPACITY,
            guard_sentinel: GUARD_SENTINEL.to_string(),
        }
    }
}

impl HeapConfig {
    /// Total size of the backing block
    pub fn total_size(&self) -> usize {
        self.primary_capacity.saturating_add(self.guard_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario() {
        let config = HeapConfig::default();
        assert_eq!(config.primary_capacity, 8);
        assert_eq!(config.guard_capacity, 13);
        assert_eq!(config.guard_sentinel, "Unbreakable!");
        assert_eq!(config.total_size(), 21);
    }
}
