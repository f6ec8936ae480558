//! Service façade: write acceptance, windowed reads, eviction.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::bucket::Statistics;
use crate::clock::{Clock, SystemClock};
use crate::window::WindowStore;

const MILLIS_PER_SEC: i64 = 1000;

/// Outcome of recording a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The transaction fell inside the acceptance window and was merged.
    Accepted,
    /// The timestamp was in the future or older than the window; nothing was
    /// stored. Both cases surface identically.
    OutOfWindow,
}

/// Invariant violations, as opposed to the expected [`RecordOutcome::OutOfWindow`].
#[derive(Debug, Error)]
pub enum StatisticsError {
    /// Bucket arithmetic is only meaningful over finite amounts.
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),

    /// The window length is fixed at construction and must be positive.
    #[error("window length must be positive, got {0}s")]
    InvalidWindow(i64),
}

/// Sliding-window transaction statistics.
///
/// Producers call [`record`](Self::record), readers call
/// [`snapshot`](Self::snapshot), and a periodic task drives
/// [`run_eviction_pass`](Self::run_eviction_pass); all three may run
/// concurrently from any number of tasks. Every operation is synchronous and
/// in-memory.
pub struct StatisticsService {
    store: WindowStore,
    window_secs: i64,
    clock: Arc<dyn Clock>,
}

impl StatisticsService {
    /// Create a service over the wall clock.
    pub fn new(window_secs: i64) -> Result<Self, StatisticsError> {
        Self::with_clock(window_secs, Arc::new(SystemClock))
    }

    /// Create a service over an explicit time source.
    pub fn with_clock(
        window_secs: i64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StatisticsError> {
        if window_secs <= 0 {
            return Err(StatisticsError::InvalidWindow(window_secs));
        }

        Ok(Self {
            store: WindowStore::new(),
            window_secs,
            clock,
        })
    }

    /// Configured window length in seconds.
    #[must_use]
    pub fn window_secs(&self) -> i64 {
        self.window_secs
    }

    /// Record a transaction amount observed at `timestamp_millis`.
    ///
    /// Age is truncated to whole seconds on the old end, making the window
    /// boundary inclusive: with a 60 s window an event aged exactly 60 s (or
    /// 60.9 s) is accepted, one aged 61 s is not. Any timestamp after "now",
    /// even by a millisecond, is rejected.
    pub fn record(
        &self,
        amount: f64,
        timestamp_millis: i64,
    ) -> Result<RecordOutcome, StatisticsError> {
        if !amount.is_finite() {
            return Err(StatisticsError::NonFiniteAmount(amount));
        }

        let age_millis = self.clock.now_millis() - timestamp_millis;
        if age_millis < 0 || age_millis / MILLIS_PER_SEC > self.window_secs {
            debug!(
                amount,
                timestamp_millis, age_millis, "transaction outside acceptance window"
            );
            return Ok(RecordOutcome::OutOfWindow);
        }

        let slot_key = timestamp_millis.div_euclid(MILLIS_PER_SEC);
        self.store.merge_into(slot_key, amount);
        debug!(amount, slot_key, "transaction merged");

        Ok(RecordOutcome::Accepted)
    }

    /// Aggregate every bucket currently inside the window.
    ///
    /// Always succeeds; returns [`Statistics::EMPTY`] when no bucket is in
    /// range. Expired-but-unevicted slots are filtered out here, not relied on
    /// being pruned already.
    #[must_use]
    pub fn snapshot(&self) -> Statistics {
        self.store.fold_in_window(self.window_threshold())
    }

    /// Drop buckets that have aged out of the window.
    ///
    /// Idempotent and safe to run concurrently with producers and readers;
    /// meant to be driven by a fixed-rate external trigger.
    pub fn run_eviction_pass(&self) {
        let threshold = self.window_threshold();
        let evicted = self.store.evict_before(threshold);
        if evicted > 0 {
            debug!(threshold, evicted, "evicted expired slots");
        }
    }

    /// Read-only handle to the underlying slot storage.
    #[must_use]
    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    /// Oldest slot key still inside the window.
    fn window_threshold(&self) -> i64 {
        self.clock.now_millis().div_euclid(MILLIS_PER_SEC) - self.window_secs
    }
}
