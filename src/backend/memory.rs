//! In-memory implementation of the backend contract.
//!
//! Single-process stand-in for Redis: the test suite runs against it, and
//! embedders can use it for their own unit tests. Atomicity comes from
//! serving every call under one lock.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

use super::{Backend, Score, WriteOp};
use crate::error::BackendError;

/// Lock-guarded in-memory sorted-set store.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// member → score, per scored-set key. Members are unique; re-adding
    /// rescores, matching ZADD.
    zsets: HashMap<String, HashMap<String, i64>>,
    /// Plain sets, kept ordered so `smembers` enumerates deterministically.
    sets: HashMap<String, BTreeSet<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn zadd(&mut self, key: &str, score: i64, member: &str) -> i64 {
        let set = self.zsets.entry(key.to_string()).or_default();
        match set.insert(member.to_string(), score) {
            None => 1,
            Some(_) => 0,
        }
    }

    fn sadd(&mut self, key: &str, members: &[String]) -> i64 {
        let set = self.sets.entry(key.to_string()).or_default();
        members
            .iter()
            .filter(|m| set.insert((*m).clone()))
            .count() as i64
    }

    fn zremrangebyscore(&mut self, key: &str, min: Score, max: Score) -> i64 {
        let Some(set) = self.zsets.get_mut(key) else {
            return 0;
        };
        let before = set.len();
        set.retain(|_, score| !(min.admits_from_below(*score) && max.admits_from_above(*score)));
        (before - set.len()) as i64
    }

    fn zrangebyscore(&self, key: &str, min: Score, max: Score) -> Vec<(String, i64)> {
        let Some(set) = self.zsets.get(key) else {
            return Vec::new();
        };
        let mut rows: Vec<(String, i64)> = set
            .iter()
            .filter(|(_, score)| min.admits_from_below(**score) && max.admits_from_above(**score))
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        // Redis orders by score, then lexically by member within a score.
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        rows
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn exec(&self, ops: Vec<WriteOp>) -> Result<Vec<i64>, BackendError> {
        let mut inner = self.inner.lock();
        let replies = ops
            .iter()
            .map(|op| match op {
                WriteOp::ZAdd { key, score, member } => inner.zadd(key, *score, member),
                WriteOp::SAdd { key, members } => inner.sadd(key, members),
                WriteOp::ZRemRangeByScore { key, min, max } => {
                    inner.zremrangebyscore(key, *min, *max)
                }
            })
            .collect();
        Ok(replies)
    }

    async fn zrange_by_score(
        &self,
        keys: &[String],
        min: Score,
        max: Score,
    ) -> Result<Vec<Vec<(String, i64)>>, BackendError> {
        let inner = self.inner.lock();
        Ok(keys
            .iter()
            .map(|key| inner.zrangebyscore(key, min, max))
            .collect())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, BackendError> {
        let inner = self.inner.lock();
        Ok(inner
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }
}
