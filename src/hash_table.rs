use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    iter::{self, FusedIterator},
    mem, slice,
};

use tracing::{debug, trace};

use crate::{
    config::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, TableConfig},
    error::Result,
    stats::BucketStats,
};

/// A key-value pair stored in a bucket chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// The chain of entries whose keys hash to one slot, in insertion order
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash table resolving collisions by separate chaining.
///
/// Every key is routed to exactly one bucket by `hash(key) mod capacity`. Colliding keys share
/// the bucket's chain. Once `len / capacity` rises above the load factor the bucket array is
/// doubled and every entry is redistributed.
///
/// Note: This implementation is not thread-safe. Callers sharing a table must serialize access.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    /// The buckets storing the key-value pairs
    buckets: Vec<Bucket<K, V>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Growth threshold for `size / buckets.len()`, fixed at construction
    load_factor: f64,
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty table with 16 buckets and a 0.75 load factor
    #[must_use]
    pub fn new() -> Self {
        Self::empty(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty table with `capacity` buckets and the default load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::new().with_capacity(capacity))
    }

    /// Creates an empty table from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the configuration
    /// does not pass [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config.capacity, config.load_factor))
    }

    /// Builds a table without validating its parameters
    fn empty(capacity: usize, load_factor: f64) -> Self {
        Self { buckets: Self::empty_buckets(capacity), size: 0, load_factor }
    }

    /// Allocates `capacity` empty chains
    fn empty_buckets(capacity: usize) -> Vec<Bucket<K, V>> {
        iter::repeat_with(Vec::new).take(capacity).collect()
    }

    /// Computes the hash for a key
    #[allow(clippy::unused_self)]
    fn hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the bucket a key is routed to under the current capacity.
    ///
    /// Equal keys always map to the same index for a given capacity. The index changes when the
    /// table grows.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn bucket_index<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        // capacity is never zero and the remainder always fits back into usize
        let capacity = self.buckets.len() as u64;
        (self.hash(key) % capacity) as usize
    }

    /// Scans the chain at `index` for `key`, returning the entry's position in the chain
    fn find<Q>(&self, index: usize, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.buckets.get(index)?.iter().position(|entry| entry.key.borrow() == key)
    }

    /// Retrieve a value for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let position = self.find(index, key)?;
        self.buckets.get(index)?.get(position).map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let position = self.find(index, key)?;
        self.buckets.get_mut(index)?.get_mut(position).map(|entry| &mut entry.value)
    }

    /// Returns true if the table holds an entry for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.bucket_index(key), key).is_some()
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// An existing entry keeps its place in the chain and only has its value swapped, which never
    /// grows the table. A new key is appended to the end of its bucket's chain, and the table
    /// doubles if that pushes it past the load factor.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);

        if let Some(position) = self.find(index, &key) {
            return self
                .buckets
                .get_mut(index)
                .and_then(|bucket| bucket.get_mut(position))
                .map(|entry| mem::replace(&mut entry.value, value));
        }

        self.append(index, key, value);
        if self.exceeds_load_factor() {
            self.rehash();
        }
        None
    }

    /// Appends a new entry to the chain at `index`; the caller guarantees the key is absent
    fn append(&mut self, index: usize, key: K, value: V) {
        if let Some(bucket) = self.buckets.get_mut(index) {
            if !bucket.is_empty() {
                trace!(index, chain_len = bucket.len(), "collision");
            }
            bucket.push(Entry { key, value });
            self.size = self.size.saturating_add(1);
        }
    }

    /// Whether `size / capacity` is strictly above the load factor
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn exceeds_load_factor(&self) -> bool {
        (self.size as f64) / (self.buckets.len() as f64) > self.load_factor
    }

    /// Doubles the bucket array and re-appends every entry, bucket by bucket in chain order
    fn rehash(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity.saturating_mul(2);
        debug!(old_capacity, new_capacity, entries = self.size, "rehashing");

        let old_buckets = mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        self.size = 0;
        for Entry { key, value } in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.append(index, key, value);
        }

        debug!(capacity = new_capacity, entries = self.size, "rehash complete");
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// The remaining entries of the chain keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let position = self.find(index, key)?;
        let bucket = self.buckets.get_mut(index)?;
        let entry = bucket.remove(position);
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Clears the table, removing all key-value pairs. The capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.size = 0;
    }
}

impl<K, V> HashTable<K, V> {
    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the growth threshold the table was built with
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the table's current parameters
    #[must_use]
    pub fn config(&self) -> TableConfig {
        TableConfig { capacity: self.capacity(), load_factor: self.load_factor }
    }

    /// Returns chain-length statistics for every bucket
    #[must_use]
    pub fn stats(&self) -> BucketStats {
        BucketStats::new(self.buckets.iter().map(Vec::len).collect())
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket in chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), chain: slice::Iter::default(), remaining: self.size }
    }

    /// Renders one line per bucket: the index followed by each entry as `key=value`, all
    /// tab-terminated.
    #[must_use]
    pub fn show(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V> fmt::Display for HashTable<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{index}\t")?;
            for entry in bucket {
                write!(f, "{}={}\t", entry.key, entry.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Bucket<K, V>>,
    /// Entries left in the bucket being visited
    chain: slice::Iter<'a, Entry<K, V>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// Finds `count` keys that share a bucket with key 0
    fn colliding_keys(table: &HashTable<u64, u64>, count: usize) -> Vec<u64> {
        let target = table.bucket_index(&0_u64);
        (0_u64..).filter(|k| table.bucket_index(k) == target).take(count).collect()
    }

    #[test]
    fn test_put_and_get() {
        let mut table = HashTable::new();
        assert_eq!(table.put("key1".to_string(), 1), None);
        assert_eq!(table.put("key2".to_string(), 2), None);
        assert_eq!(table.put("key3".to_string(), 3), None);

        assert_eq!(table.get("key1"), Some(&1));
        assert_eq!(table.get("key2"), Some(&2));
        assert_eq!(table.get("key3"), Some(&3));
        assert_eq!(table.get("key4"), None);
    }

    #[test]
    fn test_replace() {
        let mut table = HashTable::new();
        assert_eq!(table.put("key1".to_string(), 1), None);
        assert_eq!(table.put("key1".to_string(), 10), Some(1));
        assert_eq!(table.get("key1"), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut table = HashTable::new();
        table.put("key1".to_string(), 1);
        table.put("key2".to_string(), 2);

        assert_eq!(table.remove("key1"), Some(1));
        assert_eq!(table.get("key1"), None);
        assert_eq!(table.get("key2"), Some(&2));
        assert_eq!(table.remove("key1"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut table: HashTable<String, i32> = HashTable::new();
        assert_eq!(table.remove("missing"), None);
        table.put("present".to_string(), 1);
        assert_eq!(table.remove("missing"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = HashTable::<u64, u64>::with_capacity(0);
        assert!(matches!(result, Err(Error::InvalidArgument { name: "capacity", .. })));
    }

    #[test]
    fn test_grows_past_load_factor() {
        let mut table = HashTable::new();
        for i in 0..12_u64 {
            table.put(i, i);
        }
        assert_eq!(table.len(), 12);
        assert_eq!(table.get(&5), Some(&5));
        // 12 / 16 sits exactly on the threshold
        assert_eq!(table.capacity(), 16);

        table.put(12, 12);
        assert_eq!(table.len(), 13);
        assert_eq!(table.capacity(), 32);
        for i in 0..=12_u64 {
            assert_eq!(table.get(&i), Some(&i));
        }
    }

    #[test]
    fn test_replace_never_grows() {
        let mut table = HashTable::new();
        for i in 0..12_u64 {
            table.put(i, i);
        }
        for i in 0..12_u64 {
            assert_eq!(table.put(i, i * 10), Some(i));
        }
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_custom_load_factor() {
        let config = TableConfig::new().with_capacity(4).with_load_factor(2.0);
        let mut table = HashTable::with_config(config).unwrap();
        for i in 0..8_u64 {
            table.put(i, i);
        }
        assert_eq!(table.capacity(), 4);

        table.put(8, 8);
        assert_eq!(table.capacity(), 8);
        assert_eq!(table.config(), TableConfig { capacity: 8, load_factor: 2.0 });
    }

    #[test]
    fn test_repeated_growth() {
        let mut table = HashTable::with_capacity(1).unwrap();
        for i in 0..1000_u64 {
            table.put(i, i * 2);
        }
        assert_eq!(table.len(), 1000);
        assert_eq!(table.capacity(), 2048);
        for i in 0..1000_u64 {
            assert_eq!(table.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_collisions_stay_independent() {
        let mut table = HashTable::new();
        let keys = colliding_keys(&table, 2);
        let (first, second) = (keys[0], keys[1]);

        table.put(first, 1);
        table.put(second, 2);
        assert_eq!(table.get(&first), Some(&1));
        assert_eq!(table.get(&second), Some(&2));
        assert_eq!(table.stats().longest_chain(), 2);

        assert_eq!(table.remove(&second), Some(2));
        assert_eq!(table.get(&first), Some(&1));
        assert_eq!(table.get(&second), None);

        table.put(second, 3);
        assert_eq!(table.remove(&first), Some(1));
        assert_eq!(table.get(&second), Some(&3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_keeps_chain_order() {
        let keys = {
            let table = HashTable::new();
            colliding_keys(&table, 4)
        };

        // head, middle and tail removals
        for victim in 0..keys.len() {
            let mut table = HashTable::new();
            for (value, key) in keys.iter().enumerate() {
                table.put(*key, value as u64);
            }
            assert_eq!(table.remove(&keys[victim]), Some(victim as u64));

            let expected: Vec<u64> =
                keys.iter().enumerate().filter(|(i, _)| *i != victim).map(|(_, k)| *k).collect();
            let remaining: Vec<u64> = table.iter().map(|(k, _)| *k).collect();
            assert_eq!(remaining, expected);
            assert_eq!(table.len(), keys.len() - 1);
        }
    }

    #[test]
    fn test_replace_in_middle_of_chain() {
        let mut table = HashTable::new();
        let keys = colliding_keys(&table, 3);
        for key in &keys {
            table.put(*key, 0);
        }

        assert_eq!(table.put(keys[1], 7), Some(0));
        assert_eq!(table.len(), 3);
        assert_eq!(table.stats().longest_chain(), 3);
        let order: Vec<u64> = table.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, keys);
    }

    #[test]
    fn test_show_format() {
        let mut table = HashTable::with_capacity(4).unwrap();
        let keys = colliding_keys(&table, 2);
        table.put(keys[0], 10);
        table.put(keys[1], 20);

        let target = table.bucket_index(&keys[0]);
        let expected: String = (0..4)
            .map(|index| {
                if index == target {
                    format!("{index}\t{}=10\t{}=20\t\n", keys[0], keys[1])
                } else {
                    format!("{index}\t\n")
                }
            })
            .collect();
        assert_eq!(table.show(), expected);
    }

    #[test]
    fn test_show_empty() {
        let table: HashTable<u64, u64> = HashTable::with_capacity(2).unwrap();
        assert_eq!(table.show(), "0\t\n1\t\n");
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut table = HashTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);

        table.put("key1".to_string(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.len(), 1);

        table.put("key2".to_string(), 2);
        assert_eq!(table.len(), 2);

        table.remove("key1");
        assert_eq!(table.len(), 1);

        table.remove("key2");
        assert!(table.is_empty());
    }

    #[test]
    fn test_iter() {
        let mut table = HashTable::new();
        table.put("key1".to_string(), 1);
        table.put("key2".to_string(), 2);
        table.put("key3".to_string(), 3);

        let iter = table.iter();
        assert_eq!(iter.len(), 3);

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in &table {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new();
        table.put("key1".to_string(), 1);

        if let Some(value) = table.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(table.get("key1"), Some(&11));
        assert_eq!(table.get_mut("key2"), None);
    }

    #[test]
    fn test_contains_key() {
        let mut table = HashTable::new();
        table.put("a".to_string(), 1);

        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));
    }

    #[test]
    fn test_clear() {
        let mut table = HashTable::new();
        for i in 0..20_u64 {
            table.put(i, i);
        }
        let capacity = table.capacity();

        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
        assert_eq!(table.get(&1), None);
        assert_eq!(table.stats().entries(), 0);
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut table: HashTable<u64, u64> = (0..5_u64).map(|i| (i, i + 100)).collect();
        table.extend([(5, 105), (0, 0)]);

        assert_eq!(table.len(), 6);
        assert_eq!(table.get(&0), Some(&0));
        assert_eq!(table.get(&5), Some(&105));
    }
}
