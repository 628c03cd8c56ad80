//! Retention configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How much history to keep and how often to trim it.
///
/// The two values are independent: `ttl_ms` controls how far back the cutoff
/// reaches, `trim_interval_ms` controls how often cleanup runs. Keep the
/// interval short relative to the TTL so storage growth between trims stays
/// bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Retention horizon in milliseconds, default 1 hour.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Milliseconds between scheduled trim firings, default 1 minute.
    #[serde(default = "default_trim_interval_ms")]
    pub trim_interval_ms: u64,
}

fn default_ttl_ms() -> u64 {
    60 * 60 * 1000
}

fn default_trim_interval_ms() -> u64 {
    60 * 1000
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            trim_interval_ms: default_trim_interval_ms(),
        }
    }
}

impl HistoryConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn trim_interval(&self) -> Duration {
        Duration::from_millis(self.trim_interval_ms)
    }
}
