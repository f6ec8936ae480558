//! Per-slot aggregates and the folded statistics result.

use serde::{Deserialize, Serialize};

/// Aggregate of every amount observed within one one-second slot.
///
/// Seeded from the first observation, so min/max never rely on a sentinel
/// value; a genuine zero (or negative) amount is representable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Arithmetic sum of all merged amounts
    pub sum: f64,
    /// Smallest merged amount
    pub min: f64,
    /// Largest merged amount
    pub max: f64,
    /// Number of merged amounts
    pub count: u64,
}

impl Bucket {
    /// Create a bucket from the first observation of a slot.
    #[must_use]
    pub fn seed(amount: f64) -> Self {
        Self {
            sum: amount,
            min: amount,
            max: amount,
            count: 1,
        }
    }

    /// Fold one more observed amount into the bucket.
    pub fn record(&mut self, amount: f64) {
        self.sum += amount;
        self.count += 1;
        if amount < self.min {
            self.min = amount;
        }
        if amount > self.max {
            self.max = amount;
        }
    }

    /// Merge another bucket into this one.
    ///
    /// Associative and commutative over the underlying observations.
    pub fn merge(&mut self, other: &Bucket) {
        self.sum += other.sum;
        self.count += other.count;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }
}

/// Point-in-time aggregation of all in-window buckets.
///
/// Derived on every query, never cached. An empty window renders every field
/// as zero, including min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Sum of all in-window amounts
    pub sum: f64,
    /// Average amount, 0 when the window is empty
    pub avg: f64,
    /// Largest in-window amount, 0 when the window is empty
    pub max: f64,
    /// Smallest in-window amount, 0 when the window is empty
    pub min: f64,
    /// Number of in-window amounts
    pub count: u64,
}

impl Statistics {
    /// The empty-window result.
    pub const EMPTY: Self = Self {
        sum: 0.0,
        avg: 0.0,
        max: 0.0,
        min: 0.0,
        count: 0,
    };

    /// Finish a fold: derive the average, or render the zero result when no
    /// bucket was in range.
    #[must_use]
    pub fn from_fold(folded: Option<Bucket>) -> Self {
        match folded {
            Some(bucket) => Self {
                sum: bucket.sum,
                avg: bucket.sum / bucket.count as f64,
                max: bucket.max,
                min: bucket.min,
                count: bucket.count,
            },
            None => Self::EMPTY,
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::EMPTY
    }
}
