//! Utility functions and traits for `HashTable`

use crate::{HashTable, TableConfig, error::Result};
use std::hash::Hash;

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<K, V> {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the hash map as a Vec
    fn to_pairs(&self) -> Vec<(K, V)>;
}

impl<K, V> HashMapExtensions<K, V> for HashTable<K, V>
where
    K: Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn to_pairs(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Creates a `HashTable` with the given configuration from an iterator of key-value pairs.
///
/// Later pairs replace earlier ones with an equal key.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the configuration is
/// rejected by [`TableConfig::validate`].
pub fn from_iter_with_config<K, V, I>(config: TableConfig, iter: I) -> Result<HashTable<K, V>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = HashTable::with_config(config)?;
    table.extend(iter);
    Ok(table)
}
