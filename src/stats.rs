//! Bucket occupancy statistics for inspecting how keys spread across a `HashTable`

/// Snapshot of the chain length of every bucket, in bucket order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStats {
    /// Number of entries in each bucket's chain
    chain_lengths: Vec<usize>,
}

impl BucketStats {
    /// Wraps per-bucket chain lengths
    pub(crate) fn new(chain_lengths: Vec<usize>) -> Self {
        Self { chain_lengths }
    }

    /// Number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.chain_lengths.len()
    }

    /// Total number of entries across all buckets
    #[must_use]
    pub fn entries(&self) -> usize {
        self.chain_lengths.iter().sum()
    }

    /// Number of buckets holding no entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.chain_lengths.iter().filter(|&&len| len == 0).count()
    }

    /// Length of the longest chain, 0 for an empty table
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.chain_lengths.iter().copied().max().unwrap_or(0)
    }

    /// Chain length of every bucket, indexed by bucket
    #[must_use]
    pub fn chain_lengths(&self) -> &[usize] {
        &self.chain_lengths
    }

    /// Number of buckets per chain length: `histogram()[n]` buckets hold exactly `n` entries
    #[must_use]
    pub fn histogram(&self) -> Vec<usize> {
        let mut histogram: Vec<usize> = vec![0; self.longest_chain().saturating_add(1)];
        for &len in &self.chain_lengths {
            if let Some(count) = histogram.get_mut(len) {
                *count = count.saturating_add(1);
            }
        }
        histogram
    }

    /// Average chain length over non-empty buckets, 0.0 when every bucket is empty
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn mean_occupied_chain(&self) -> f64 {
        let occupied = self.capacity().saturating_sub(self.empty_buckets());
        if occupied == 0 {
            return 0.0;
        }
        self.entries() as f64 / occupied as f64
    }
}
