//! The key-value backend boundary.
//!
//! The store needs exactly five primitives from its backend: scored-set add,
//! scored range fetch with scores, scored range removal, plain-set add, and
//! plain-set listing — plus the ability to commit a batch of writes as one
//! atomic transaction. [`Backend`] captures that contract; everything above
//! it is backend-agnostic.

pub mod memory;
pub mod redis;

use async_trait::async_trait;

use crate::error::BackendError;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

// ─── Score bounds ────────────────────────────────────────────────

/// One end of a scored-range operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Unbounded low end (`-inf`).
    NegInf,
    /// Unbounded high end (`+inf`).
    PosInf,
    /// Inclusive bound.
    Incl(i64),
    /// Exclusive bound (`(n` in Redis syntax).
    Excl(i64),
}

impl Score {
    /// Render as a ZRANGEBYSCORE / ZREMRANGEBYSCORE limit argument.
    pub(crate) fn to_arg(self) -> String {
        match self {
            Score::NegInf => "-inf".into(),
            Score::PosInf => "+inf".into(),
            Score::Incl(t) => t.to_string(),
            Score::Excl(t) => format!("({t}"),
        }
    }

    /// Whether `score` satisfies this bound when used as a minimum.
    pub(crate) fn admits_from_below(self, score: i64) -> bool {
        match self {
            Score::NegInf => true,
            Score::PosInf => false,
            Score::Incl(t) => score >= t,
            Score::Excl(t) => score > t,
        }
    }

    /// Whether `score` satisfies this bound when used as a maximum.
    pub(crate) fn admits_from_above(self, score: i64) -> bool {
        match self {
            Score::NegInf => false,
            Score::PosInf => true,
            Score::Incl(t) => score <= t,
            Score::Excl(t) => score < t,
        }
    }
}

// ─── Transaction ops ─────────────────────────────────────────────

/// One write inside an atomic transaction. Each op yields one integer reply:
/// members newly added for the add ops, members removed for the range
/// removal.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Add `member` to the scored set at `key` with the given score.
    /// Re-adding an existing member rescores it.
    ZAdd { key: String, score: i64, member: String },
    /// Add members to the plain set at `key`; already-present members are
    /// no-ops.
    SAdd { key: String, members: Vec<String> },
    /// Remove every member of the scored set at `key` whose score lies
    /// within the bounds.
    ZRemRangeByScore { key: String, min: Score, max: Score },
}

// ─── Backend contract ────────────────────────────────────────────

/// Minimal sorted-set backend the store runs against.
///
/// Implementations must make [`exec`](Backend::exec) atomic: from the
/// perspective of any concurrent reader, either all ops in one call are
/// visible or none are.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Execute `ops` as one atomic transaction, returning one integer reply
    /// per op in order. An empty batch commits nothing and returns an empty
    /// reply list.
    async fn exec(&self, ops: Vec<WriteOp>) -> Result<Vec<i64>, BackendError>;

    /// Fetch `(member, score)` pairs within `[min, max]` for each key,
    /// batched into one round-trip. Results are ordered by ascending score
    /// per key, and the outer list matches the order of `keys`. A missing
    /// key yields an empty list.
    async fn zrange_by_score(
        &self,
        keys: &[String],
        min: Score,
        max: Score,
    ) -> Result<Vec<Vec<(String, i64)>>, BackendError>;

    /// List the members of the plain set at `key`. A missing key yields an
    /// empty list. Ordering is backend-defined.
    async fn smembers(&self, key: &str) -> Result<Vec<String>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_args_use_redis_syntax() {
        assert_eq!(Score::NegInf.to_arg(), "-inf");
        assert_eq!(Score::PosInf.to_arg(), "+inf");
        assert_eq!(Score::Incl(42).to_arg(), "42");
        assert_eq!(Score::Excl(42).to_arg(), "(42");
    }

    #[test]
    fn bound_admission() {
        assert!(Score::Incl(10).admits_from_below(10));
        assert!(!Score::Excl(10).admits_from_below(10));
        assert!(Score::Incl(10).admits_from_above(10));
        assert!(!Score::Excl(10).admits_from_above(10));
        assert!(Score::NegInf.admits_from_below(i64::MIN));
        assert!(Score::PosInf.admits_from_above(i64::MAX));
    }
}
