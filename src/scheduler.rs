//! Recurring trim-job binding.
//!
//! The repeating-job facility is an external collaborator; [`JobScheduler`]
//! is its contract and [`TokioScheduler`] the tokio-backed implementation.
//! [`init_trim_job`] is the explicit one-shot initializer the embedding
//! process calls at startup.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use crate::backend::Backend;
use crate::config::HistoryConfig;
use crate::history::StatsHistory;

/// Fixed id of the singleton trim job. Registering it twice is a no-op, so
/// repeated process starts never stack concurrent trim loops.
pub const TRIM_JOB_ID: &str = "trim-history";

/// Handler invoked on each firing of a repeating job.
pub type RepeatingJob =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

// ─── Scheduler contract ──────────────────────────────────────────

/// A facility for named, deduplicated repeating jobs.
///
/// At-least-once delivery per interval tick is acceptable for every job this
/// crate registers; the trim operation is idempotent and absorbs duplicate
/// firings.
pub trait JobScheduler: Send + Sync {
    /// Register `job` to fire every `every`. Returns `false` (and registers
    /// nothing) when a job with the same id already exists.
    fn register_repeating(&self, job_id: &str, every: Duration, job: RepeatingJob) -> bool;
}

// ─── Tokio implementation ────────────────────────────────────────

/// Runs each registered job on its own spawned task.
///
/// A firing is awaited to completion before the next tick is taken, so a
/// named job never overlaps itself; missed ticks are delayed rather than
/// burst. There is no completion history — the job simply fires forever
/// until [`shutdown`](TokioScheduler::shutdown).
#[derive(Default)]
pub struct TokioScheduler {
    jobs: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort every registered job.
    pub fn shutdown(&self) {
        let mut jobs = self.jobs.lock();
        for (_, handle) in jobs.drain() {
            handle.abort();
        }
    }
}

impl JobScheduler for TokioScheduler {
    fn register_repeating(&self, job_id: &str, every: Duration, job: RepeatingJob) -> bool {
        let mut jobs = self.jobs.lock();
        if jobs.contains_key(job_id) {
            return false;
        }

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick resolves immediately; firings start one
            // interval out
            interval.tick().await;
            let mut ticks = IntervalStream::new(interval);
            while ticks.next().await.is_some() {
                job().await;
            }
        });
        jobs.insert(job_id.to_string(), handle);
        true
    }
}

// ─── Trim-job binding ────────────────────────────────────────────

/// Register the recurring trim job. Call once at process start.
///
/// Every `config.trim_interval_ms` the job recomputes
/// `before_date = now - config.ttl_ms` and trims each registered monitor's
/// log. Returns whether a new registration happened; `false` means the
/// singleton job already exists and nothing changed.
pub fn init_trim_job<B, S>(
    history: Arc<StatsHistory<B>>,
    scheduler: &S,
    config: &HistoryConfig,
) -> bool
where
    B: Backend,
    S: JobScheduler + ?Sized,
{
    let ttl_ms = config.ttl_ms as i64;
    let job: RepeatingJob = Arc::new(move || {
        let history = history.clone();
        Box::pin(async move {
            let before_date = Utc::now().timestamp_millis() - ttl_ms;
            match history.trim_history(before_date).await {
                Ok(removed) => tracing::debug!(
                    before_date,
                    removed = removed.iter().sum::<i64>(),
                    "trim job completed"
                ),
                // the next scheduled firing is the retry
                Err(e) => tracing::warn!(error = %e, "trim job failed"),
            }
        })
    });

    let registered = scheduler.register_repeating(TRIM_JOB_ID, config.trim_interval(), job);
    if registered {
        tracing::info!(
            interval_ms = config.trim_interval_ms,
            ttl_ms = config.ttl_ms,
            "registered stats history trim job"
        );
    }
    registered
}
