//! Concurrent slot-keyed bucket storage.

use dashmap::DashMap;

use crate::bucket::{Bucket, Statistics};

/// Mapping from one-second slot keys (epoch seconds) to their aggregates.
///
/// Backed by a sharded map: the `entry` API makes each upsert-or-merge an
/// atomic read-modify-write per key, so concurrent writers to the same slot
/// never lose an update and writers on different shards proceed in parallel.
/// The store may transiently hold slots older than the window between
/// eviction passes; readers filter by threshold at query time.
#[derive(Debug, Default)]
pub struct WindowStore {
    slots: DashMap<i64, Bucket>,
}

impl WindowStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Merge one observed amount into the bucket at `slot_key`, creating the
    /// bucket if the slot has none yet.
    pub fn merge_into(&self, slot_key: i64, amount: f64) {
        self.slots
            .entry(slot_key)
            .and_modify(|bucket| bucket.record(amount))
            .or_insert_with(|| Bucket::seed(amount));
    }

    /// Fold every bucket with `slot_key >= threshold_key` into one result.
    ///
    /// Tolerates concurrent merges and evictions during the scan; each bucket
    /// is read under its shard lock, so a half-applied merge is never
    /// observed. The result reflects some recent subset of completed merges.
    pub fn fold_in_window(&self, threshold_key: i64) -> Statistics {
        let mut folded: Option<Bucket> = None;

        for entry in self.slots.iter() {
            if *entry.key() < threshold_key {
                continue;
            }
            match folded.as_mut() {
                Some(acc) => acc.merge(entry.value()),
                None => folded = Some(*entry.value()),
            }
        }

        Statistics::from_fold(folded)
    }

    /// Remove every slot with `slot_key < threshold_key`. Idempotent.
    ///
    /// Returns the number of slots dropped by this pass.
    pub fn evict_before(&self, threshold_key: i64) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot_key, _| *slot_key >= threshold_key);
        before.saturating_sub(self.slots.len())
    }

    /// Number of live slots, in-window or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store holds no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a bucket currently exists at `slot_key`.
    #[must_use]
    pub fn contains_slot(&self, slot_key: i64) -> bool {
        self.slots.contains_key(&slot_key)
    }
}
