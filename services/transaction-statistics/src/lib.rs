//! Sliding-window transaction statistics service.
//!
//! Maintains running statistics (sum, count, min, max, average) over
//! transactions observed in a trailing time window:
//! - One-second buckets merged concurrently by many producers
//! - On-demand aggregation over the buckets still inside the window
//! - Periodic eviction bounding memory to the window length
//! - REST endpoints for recording transactions and reading statistics

pub mod bucket;
pub mod clock;
pub mod config;
pub mod models;
pub mod server;
pub mod service;
pub mod window;

pub use bucket::{Bucket, Statistics};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ServerConfig, StatisticsConfig};
pub use models::{HealthResponse, StatisticsResponse, TransactionRequest};
pub use server::{AppState, StatisticsServer, create_app, start_evictor};
pub use service::{RecordOutcome, StatisticsError, StatisticsService};
pub use window::WindowStore;
