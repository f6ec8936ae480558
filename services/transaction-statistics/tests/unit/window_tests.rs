//! Unit tests for the concurrent slot store

use pretty_assertions::assert_eq;
use transaction_statistics::WindowStore;

const SLOT: i64 = 1_700_000_000;

#[test]
fn test_merge_into_creates_bucket_on_first_amount() {
    let store = WindowStore::new();

    store.merge_into(SLOT, 5.0);

    assert_eq!(store.len(), 1);
    assert!(store.contains_slot(SLOT));
}

#[test]
fn test_merge_into_same_slot_accumulates() {
    let store = WindowStore::new();

    store.merge_into(SLOT, 5.0);
    store.merge_into(SLOT, 3.0);
    store.merge_into(SLOT, 4.0);

    let stats = store.fold_in_window(SLOT);
    assert_eq!(stats.sum, 12.0);
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, 3.0);
    assert_eq!(stats.max, 5.0);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_fold_threshold_is_inclusive() {
    let store = WindowStore::new();
    store.merge_into(SLOT, 5.0);
    store.merge_into(SLOT - 1, 3.0);

    // A slot exactly at the threshold is counted; one second older is not.
    let stats = store.fold_in_window(SLOT);
    assert_eq!(stats.count, 1);
    assert_eq!(stats.sum, 5.0);

    let stats = store.fold_in_window(SLOT - 1);
    assert_eq!(stats.count, 2);
    assert_eq!(stats.sum, 8.0);
}

#[test]
fn test_fold_combines_values_across_slots() {
    let store = WindowStore::new();
    store.merge_into(SLOT, 5.0);
    store.merge_into(SLOT - 5, 3.0);
    store.merge_into(SLOT - 5, 4.0);

    let stats = store.fold_in_window(SLOT - 60);

    assert_eq!(stats.sum, 12.0);
    assert_eq!(stats.avg, 4.0);
    assert_eq!(stats.max, 5.0);
    assert_eq!(stats.min, 3.0);
    assert_eq!(stats.count, 3);
}

#[test]
fn test_fold_of_empty_store_is_zero_result() {
    let store = WindowStore::new();

    let stats = store.fold_in_window(0);

    assert_eq!(stats.sum, 0.0);
    assert_eq!(stats.avg, 0.0);
    assert_eq!(stats.max, 0.0);
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.count, 0);
}

#[test]
fn test_evict_before_drops_only_older_slots() {
    let store = WindowStore::new();
    store.merge_into(SLOT - 2, 1.0);
    store.merge_into(SLOT - 1, 2.0);
    store.merge_into(SLOT, 3.0);

    let evicted = store.evict_before(SLOT);

    assert_eq!(evicted, 2);
    assert_eq!(store.len(), 1);
    assert!(store.contains_slot(SLOT));
    assert!(!store.contains_slot(SLOT - 1));
    assert!(!store.contains_slot(SLOT - 2));
}

#[test]
fn test_evict_before_is_idempotent() {
    let store = WindowStore::new();
    store.merge_into(SLOT - 10, 1.0);
    store.merge_into(SLOT, 2.0);

    assert_eq!(store.evict_before(SLOT), 1);
    assert_eq!(store.evict_before(SLOT), 0);

    assert_eq!(store.len(), 1);
    assert!(store.contains_slot(SLOT));
}

#[test]
fn test_expired_slots_stay_visible_to_len_until_evicted() {
    // Readers filter by threshold at query time; the store itself keeps
    // out-of-window slots until an eviction pass runs.
    let store = WindowStore::new();
    store.merge_into(SLOT - 120, 9.0);

    assert_eq!(store.fold_in_window(SLOT - 60).count, 0);
    assert_eq!(store.len(), 1);

    store.evict_before(SLOT - 60);
    assert!(store.is_empty());
}
