//! Domain types: submitted reports, collated query results, time ranges.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ─── Input / output units ────────────────────────────────────────

/// One timestamped bundle of per-monitor snapshots submitted together.
///
/// A report is ephemeral: insert decomposes it into one scored entry per
/// monitor, and nothing stores the report itself. Snapshot payloads are
/// opaque to the store — any serializable JSON structure the caller's
/// domain uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Milliseconds since epoch. Doubles as the member-uniqueness nonce.
    pub created_date: i64,
    /// Snapshot payload per monitor id. May be empty (insert becomes a no-op).
    pub monitors: BTreeMap<String, Value>,
}

/// Query-time reconstruction: every requested monitor's snapshot at one
/// timestamp, merged across the per-monitor logs. Monitors with no entry at
/// this timestamp are absent from the map, never null-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollatedReport {
    pub created_date: i64,
    pub monitors: BTreeMap<String, Value>,
}

// ─── Time range ──────────────────────────────────────────────────

/// Inclusive timestamp range for queries. `None` means unbounded, the
/// equivalent of Redis `-inf` / `+inf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeRange {
    /// The full history, both ends unbounded.
    pub fn all() -> Self {
        Self::default()
    }

    /// Everything at or after `start`.
    pub fn since(start: i64) -> Self {
        Self { start: Some(start), end: None }
    }

    /// Everything at or before `end`.
    pub fn until(end: i64) -> Self {
        Self { start: None, end: Some(end) }
    }

    /// Everything in `[start, end]`, both ends inclusive.
    pub fn between(start: i64, end: i64) -> Self {
        Self { start: Some(start), end: Some(end) }
    }
}

// ─── Wire form ───────────────────────────────────────────────────

/// What actually lands in a sorted set: the caller's payload wrapped with a
/// nonce (the report timestamp). Two reports carrying byte-identical
/// payloads at different timestamps must produce distinct members, otherwise
/// the second ZADD would merely rescore the first.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredSnapshot {
    pub nonce: i64,
    pub payload: Value,
}
