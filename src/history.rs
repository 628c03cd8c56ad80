//! The storage, query, and retention engine.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::backend::{Backend, Score, WriteOp};
use crate::error::{HistoryError, Result};
use crate::keys;
use crate::report::{CollatedReport, Report, StoredSnapshot, TimeRange};

/// Time-series stats store over a sorted-set backend.
///
/// Each monitor gets one scored set used as an append log (score = report
/// timestamp), plus one global set tracks every monitor id ever seen.
/// All methods are async and suspend only while awaiting the backend; share
/// the store across tasks with an `Arc`.
///
/// # Example
///
/// ```rust
/// use redis_stats_history::{MemoryBackend, Report, StatsHistory, TimeRange};
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> redis_stats_history::Result<()> {
/// let history = StatsHistory::new(MemoryBackend::new());
///
/// let mut monitors = BTreeMap::new();
/// monitors.insert("a".to_string(), json!({"statOne": 1}));
/// history.insert(&Report { created_date: 1551285871, monitors }).await?;
///
/// let reports = history.find(&["a".to_string()], TimeRange::all()).await?;
/// assert_eq!(reports[0].created_date, 1551285871);
/// # Ok(())
/// # }
/// ```
pub struct StatsHistory<B> {
    backend: B,
}

impl<B: Backend> StatsHistory<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend, e.g. for test fixtures that seed raw members.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ─── Insert ──────────────────────────────────────────────────

    /// Append one report: one scored entry per monitor plus registry
    /// membership for every id in the report, committed as a single atomic
    /// transaction. Returns the backend's per-op reply summary.
    ///
    /// An empty `monitors` map commits nothing and returns an empty summary.
    pub async fn insert(&self, report: &Report) -> Result<Vec<i64>> {
        if report.monitors.is_empty() {
            return Ok(Vec::new());
        }

        let mut ops = Vec::with_capacity(report.monitors.len() + 1);
        for (monitor_id, snapshot) in &report.monitors {
            // created_date rides along as a nonce so identical payloads at
            // different timestamps stay distinct members
            let member = serde_json::to_string(&StoredSnapshot {
                nonce: report.created_date,
                payload: snapshot.clone(),
            })
            .map_err(|e| {
                HistoryError::InvalidArgument(format!(
                    "snapshot for monitor {monitor_id} is not serializable: {e}"
                ))
            })?;
            ops.push(WriteOp::ZAdd {
                key: keys::monitor(monitor_id),
                score: report.created_date,
                member,
            });
        }
        ops.push(WriteOp::SAdd {
            key: keys::monitor_set(),
            members: report.monitors.keys().cloned().collect(),
        });

        Ok(self.backend.exec(ops).await?)
    }

    // ─── Query ───────────────────────────────────────────────────

    /// Fetch every requested monitor's entries within `range` and merge them
    /// into one chronologically ascending sequence, one record per distinct
    /// timestamp. Bounds are inclusive; unbounded ends cover the full log.
    ///
    /// A monitor with no stored entries (registered or not) contributes
    /// nothing. A stored member that fails to deserialize surfaces as
    /// [`HistoryError::CorruptData`] rather than being dropped.
    pub async fn find(
        &self,
        monitor_ids: &[String],
        range: TimeRange,
    ) -> Result<Vec<CollatedReport>> {
        if monitor_ids.is_empty() {
            return Err(HistoryError::InvalidArgument(
                "monitor_ids must not be empty".into(),
            ));
        }

        let monitor_keys: Vec<String> = monitor_ids.iter().map(|id| keys::monitor(id)).collect();
        let min = range.start.map_or(Score::NegInf, Score::Incl);
        let max = range.end.map_or(Score::PosInf, Score::Incl);
        let per_monitor = self.backend.zrange_by_score(&monitor_keys, min, max).await?;

        // Collate across monitors: timestamp → (monitor id → payload).
        // The ordered map hands back ascending timestamps for free.
        let mut collated: BTreeMap<i64, BTreeMap<String, Value>> = BTreeMap::new();
        for ((monitor_id, key), entries) in
            monitor_ids.iter().zip(&monitor_keys).zip(per_monitor)
        {
            for (member, score) in entries {
                let stored: StoredSnapshot =
                    serde_json::from_str(&member).map_err(|source| HistoryError::CorruptData {
                        key: key.clone(),
                        score,
                        source,
                    })?;
                collated
                    .entry(score)
                    .or_default()
                    .insert(monitor_id.clone(), stored.payload);
            }
        }

        Ok(collated
            .into_iter()
            .map(|(created_date, monitors)| CollatedReport { created_date, monitors })
            .collect())
    }

    // ─── Retention ───────────────────────────────────────────────

    /// Remove every entry strictly older than `before_date` from every
    /// registered monitor's log, as one atomic transaction. Entries exactly
    /// at `before_date` are retained. Returns the removed count per monitor
    /// in registry enumeration order.
    ///
    /// Registry membership itself is never pruned: a monitor whose log
    /// empties out stays listed. Re-running with the same cutoff is a no-op,
    /// so a failed run is safe to repeat.
    pub async fn trim_history(&self, before_date: i64) -> Result<Vec<i64>> {
        let monitor_ids = self.backend.smembers(&keys::monitor_set()).await?;
        if monitor_ids.is_empty() {
            // steady state before any insert
            return Ok(Vec::new());
        }

        let ops = monitor_ids
            .iter()
            .map(|id| WriteOp::ZRemRangeByScore {
                key: keys::monitor(id),
                min: Score::NegInf,
                max: Score::Excl(before_date),
            })
            .collect();
        let removed = self.backend.exec(ops).await?;
        tracing::debug!(
            before_date,
            monitors = monitor_ids.len(),
            removed = removed.iter().sum::<i64>(),
            "trimmed stats history"
        );
        Ok(removed)
    }

    // ─── Registry ────────────────────────────────────────────────

    /// Current registry contents: every monitor id ever observed by an
    /// insert, in backend enumeration order.
    pub async fn monitor_ids(&self) -> Result<Vec<String>> {
        Ok(self.backend.smembers(&keys::monitor_set()).await?)
    }
}
