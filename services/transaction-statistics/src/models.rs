//! REST API request/response models.

use serde::{Deserialize, Serialize};

use crate::bucket::Statistics;

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Transaction amount; must be strictly positive
    pub amount: f64,
    /// Transaction time as milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl TransactionRequest {
    /// Transport-level validation, applied before the core sees the input.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0 && self.timestamp > 0
    }
}

/// Body of `GET /statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// Sum of all in-window amounts
    pub sum: f64,
    /// Average amount, 0 when the window is empty
    pub avg: f64,
    /// Largest in-window amount, 0 when the window is empty
    pub max: f64,
    /// Smallest in-window amount, 0 when the window is empty
    pub min: f64,
    /// Number of in-window transactions
    pub count: u64,
}

impl From<Statistics> for StatisticsResponse {
    fn from(stats: Statistics) -> Self {
        Self {
            sum: stats.sum,
            avg: stats.avg,
            max: stats.max,
            min: stats.min,
            count: stats.count,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service health status
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
}
