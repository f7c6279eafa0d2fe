//! Construction parameters for `HashTable`

use crate::error::{Error, Result};

/// Number of buckets a table starts with when none is requested
pub const DEFAULT_CAPACITY: usize = 16;

/// Ratio of entries to buckets above which the table doubles
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Parameters a `HashTable` is built from.
///
/// The load factor is fixed for the lifetime of the table. The capacity is only the starting
/// point; it doubles every time the table outgrows the load factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Initial number of buckets
    pub capacity: usize,
    /// Growth threshold for `len / capacity`
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, load_factor: DEFAULT_LOAD_FACTOR }
    }
}

impl TableConfig {
    /// Creates a configuration with the default capacity and load factor
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial number of buckets
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the growth threshold
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that the parameters describe a usable table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the capacity is zero or the load factor is not a
    /// finite number greater than zero.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::invalid_argument("capacity", "must be greater than zero"));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(Error::invalid_argument(
                "load_factor",
                format!("must be a finite number greater than zero, got {}", self.load_factor),
            ));
        }
        Ok(())
    }
}
