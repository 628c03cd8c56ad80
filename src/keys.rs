//! Key-space naming for the stats store.
//!
//! All keys live under one `stats` prefix so an operator can scan the whole
//! footprint with `stats|*`. Helpers are public because tests and operational
//! tooling inspect the raw sets directly.

/// Namespace shared by every key this crate writes.
const STATS_PREFIX: &str = "stats";

/// Second-level prefix for monitor data.
const MONITOR_PREFIX: &str = "monitor";

/// Key of the ordered log holding one monitor's entries, scored by timestamp.
///
/// Distinct monitor ids always map to distinct keys: the id is the final
/// segment and the separator never appears in the fixed prefixes.
pub fn monitor(monitor_id: &str) -> String {
    format!("{STATS_PREFIX}|{MONITOR_PREFIX}|{monitor_id}")
}

/// Key of the set tracking every monitor id ever observed by an insert.
pub fn monitor_set() -> String {
    format!("{STATS_PREFIX}|{MONITOR_PREFIX}")
}
