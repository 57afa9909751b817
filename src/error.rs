use thiserror::Error;

pub type Result<T> = std::result::Result<T, HashTableError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HashTableError {
    #[error("Key not found")]
    KeyNotFound,
    #[error("No free location found in a table of capacity {capacity}")]
    ProbeExhausted { capacity: usize },
    #[error("Maximum capacity {capacity} reached, cannot resize further")]
    CapacityExhausted { capacity: usize },
    #[error("Resize threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("Maximum capacity {0} is not a value of the capacity ladder")]
    InvalidMaxCapacity(usize),
}
