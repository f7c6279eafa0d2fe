//! # Chain Table
//!
//! A Rust implementation of a hash table that resolves collisions by separate chaining.
//!
//! Each key is routed to one bucket by `hash(key) mod capacity`. Keys that collide share the
//! bucket's chain, kept in insertion order. When the ratio of entries to buckets rises above the
//! load factor (0.75 by default) the bucket array doubles and every entry is redistributed, which
//! keeps `put`, `get` and `remove` amortized O(1).
//!
//! ## Basic Usage
//!
//! ```rust
//! use chaintable::HashTable;
//!
//! // Create a new table with 16 buckets
//! let mut table = HashTable::new();
//!
//! // Insert values
//! table.put("apple".to_string(), 1);
//! table.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // Replace values, getting the previous one back
//! assert_eq!(table.put("apple".to_string(), 10), Some(1));
//! assert_eq!(table.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(table.remove("apple"), Some(10));
//! assert_eq!(table.get("apple"), None);
//! assert_eq!(table.len(), 1);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use chaintable::{Error, HashTable, TableConfig};
//!
//! let config = TableConfig::new().with_capacity(4).with_load_factor(1.0);
//! let mut table = HashTable::with_config(config)?;
//! for i in 0..5 {
//!     table.put(i, i * i);
//! }
//! // five entries in four buckets is above a load factor of 1.0
//! assert_eq!(table.capacity(), 8);
//!
//! assert!(matches!(HashTable::<u32, u32>::with_capacity(0), Err(Error::InvalidArgument { .. })));
//! # Ok::<(), Error>(())
//! ```

/// Construction parameters and their defaults
mod config;
/// Error type reported by fallible constructors
mod error;
/// Module implementing the separate-chaining hash table
mod hash_table;
/// Bucket occupancy statistics
mod stats;
/// Utility functions and traits for the hash table
mod utils;

pub use config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, TableConfig};
pub use error::{Error, Result};
pub use hash_table::{HashTable, Iter};
pub use stats::BucketStats;
pub use utils::{HashMapExtensions, from_iter_with_config};
