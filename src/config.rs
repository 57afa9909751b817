use crate::error::{HashTableError, Result};

/// Table sizes used for growth steps. Every capacity a table ever has is one
/// of these values, starting from the first.
pub const CAPACITIES: [usize; 28] = [
    11, 23, 47, 97, 197, 397, 797, 1597, 3203, 6421, 12853, 25717, 51437, 102877, 205759, 411527,
    823117, 1646237, 3292489, 6584983, 13169977, 26339969, 52679969, 105359969, 210719881,
    421439783, 842879579, 1685759167,
];

pub const DEFAULT_RESIZE_THRESHOLD: f64 = 0.4;

/// Construction-time settings of a [`HashTable`](crate::hash_table::HashTable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Load factor at or above which an insert resizes the table first.
    pub resize_threshold: f64,
    /// Largest ladder capacity the table may grow to.
    pub max_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            resize_threshold: DEFAULT_RESIZE_THRESHOLD,
            max_capacity: CAPACITIES[CAPACITIES.len() - 1],
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resize_threshold(mut self, threshold: f64) -> Self {
        self.resize_threshold = threshold;
        self
    }

    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.resize_threshold > 0.0 && self.resize_threshold <= 1.0) {
            return Err(HashTableError::InvalidThreshold(self.resize_threshold));
        }
        if self.max_capacity_index().is_none() {
            return Err(HashTableError::InvalidMaxCapacity(self.max_capacity));
        }
        Ok(())
    }

    /// Ladder index of `max_capacity`, if it is a ladder value.
    pub fn max_capacity_index(&self) -> Option<usize> {
        CAPACITIES.iter().position(|&c| c == self.max_capacity)
    }
}
