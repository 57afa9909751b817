//! Open addressing hash tables with pluggable probing.
//!
//! [`HashTable`] keeps every entry directly in its slot array and resolves
//! collisions with a [`Prober`], either [`LinearProber`] or
//! [`DoubleHashProber`]. Removed entries become tombstones that are reclaimed
//! when the table grows along the fixed capacity ladder. [`StringHash`] is a
//! base-36 digit folding hash for string keys, usable both as the primary
//! hash and as the secondary hash of double hashing.

pub mod config;
pub mod error;
pub mod hash_table;
pub mod key;
pub mod probe;
pub mod string_hash;

pub use config::TableConfig;
pub use error::{HashTableError, Result};
pub use hash_table::{HashTable, Slot};
pub use key::{KeyEq, KeyHasher, StdHasher, StdKeyEq};
pub use probe::{DoubleHashProber, LinearProber, Prober};
pub use string_hash::StringHash;
