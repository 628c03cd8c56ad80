//! # redis-stats-history
//!
//! Time-series stats storage on Redis sorted sets.
//!
//! Callers periodically submit a [`Report`] — one timestamp, many per-monitor
//! measurement snapshots. The store appends each monitor's snapshot to a
//! per-monitor ordered log (score = timestamp), answers range queries across
//! multiple monitors with chronologically merged [`CollatedReport`]s, tracks
//! the set of known monitor ids, and periodically discards entries older than
//! a retention horizon.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use redis_stats_history::{
//!     init_trim_job, HistoryConfig, RedisBackend, Report, StatsHistory, TimeRange,
//!     TokioScheduler,
//! };
//! use serde_json::json;
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> redis_stats_history::Result<()> {
//!     let backend = RedisBackend::connect("redis://127.0.0.1:6379/").await?;
//!     let history = Arc::new(StatsHistory::new(backend));
//!
//!     // background retention, once at startup
//!     let scheduler = TokioScheduler::new();
//!     init_trim_job(history.clone(), &scheduler, &HistoryConfig::default());
//!
//!     // write one report covering two monitors
//!     let mut monitors = BTreeMap::new();
//!     monitors.insert("api".to_string(), json!({"requests": 1042}));
//!     monitors.insert("db".to_string(), json!({"connections": 17}));
//!     history.insert(&Report { created_date: 1551285871000, monitors }).await?;
//!
//!     // read it back, merged across monitors
//!     let ids = vec!["api".to_string(), "db".to_string()];
//!     for report in history.find(&ids, TimeRange::all()).await? {
//!         println!("{}: {:?}", report.created_date, report.monitors);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The backend sits behind the [`Backend`](backend::Backend) trait:
//! [`RedisBackend`] is the production implementation, [`MemoryBackend`] a
//! single-process stand-in for tests and embedding without a Redis server.

pub mod backend;
pub mod config;
pub mod error;
pub mod history;
pub mod keys;
pub mod report;
pub mod scheduler;

pub use backend::{MemoryBackend, RedisBackend};
pub use config::HistoryConfig;
pub use error::{BackendError, HistoryError, Result};
pub use history::StatsHistory;
pub use report::{CollatedReport, Report, TimeRange};
pub use scheduler::{init_trim_job, JobScheduler, TokioScheduler, TRIM_JOB_ID};
