//! Redis implementation of the backend contract.

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use super::{Backend, Score, WriteOp};
use crate::error::BackendError;

/// Production backend over a shared async Redis connection.
///
/// `ConnectionManager` is cheaply cloneable and auto-reconnects — every
/// clone shares the same underlying multiplexed TCP connection, so one
/// `RedisBackend` can serve the whole process. Batches map to MULTI/EXEC
/// transactions via `redis::pipe().atomic()`.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Wrap an existing connection, e.g. one shared with the embedding
    /// service.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Open a fresh managed connection to `url`
    /// (e.g. `redis://127.0.0.1:6379/`).
    pub async fn connect(url: &str) -> Result<Self, BackendError> {
        let client = redis::Client::open(url).map_err(BackendError::Redis)?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(BackendError::Redis)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn exec(&self, ops: Vec<WriteOp>) -> Result<Vec<i64>, BackendError> {
        if ops.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for op in &ops {
            match op {
                WriteOp::ZAdd { key, score, member } => {
                    pipe.zadd(key, member, *score);
                }
                WriteOp::SAdd { key, members } => {
                    pipe.sadd(key, members);
                }
                WriteOp::ZRemRangeByScore { key, min, max } => {
                    pipe.zrembyscore(key, min.to_arg(), max.to_arg());
                }
            }
        }

        let mut conn = self.conn.clone();
        let replies: Vec<i64> = pipe.query_async(&mut conn).await?;
        Ok(replies)
    }

    async fn zrange_by_score(
        &self,
        keys: &[String],
        min: Score,
        max: Score,
    ) -> Result<Vec<Vec<(String, i64)>>, BackendError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        // One pipelined round-trip for all monitors; correctness does not
        // depend on the reads being transactional.
        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in keys {
            pipe.zrangebyscore_withscores(key, min.to_arg(), max.to_arg());
        }

        let mut conn = self.conn.clone();
        let rows: Vec<Vec<(String, i64)>> = pipe.query_async(&mut conn).await?;
        Ok(rows)
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, BackendError> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = redis::cmd("SMEMBERS")
            .arg(key)
            .query_async(&mut conn)
            .await?;
        Ok(members)
    }
}
