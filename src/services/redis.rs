//! Redis service backing the time-bounded configuration snapshot cache

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use redis::{AsyncCommands, Client};

use crate::{
    engine::ConfigSnapshot,
    error::{AppError, AppResult},
    repository::ScheduleSource,
};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Get a Redis connection
    pub async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    /// Read a cached snapshot
    pub async fn get_snapshot(&self, key: &str) -> AppResult<Option<ConfigSnapshot>> {
        let mut conn = self.get_connection().await?;
        let cached: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read snapshot from Redis: {}", e)))?;

        cached
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Failed to decode cached snapshot: {}", e))
                })
            })
            .transpose()
    }

    /// Store a snapshot with expiration (in seconds)
    pub async fn store_snapshot(
        &self,
        key: &str,
        snapshot: &ConfigSnapshot,
        expiration_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| AppError::Internal(format!("Failed to encode snapshot: {}", e)))?;

        let mut conn = self.get_connection().await?;
        conn.set_ex::<_, _, ()>(key, json, expiration_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store snapshot in Redis: {}", e)))?;

        Ok(())
    }
}

/// Cache key of the snapshot covering `[from, to]`
pub fn snapshot_key(from: NaiveDate, to: NaiveDate) -> String {
    format!("availability:snapshot:{}:{}", from, to)
}

/// [`ScheduleSource`] that serves snapshots from Redis for a bounded time.
///
/// Cache errors never fail a query: they are logged and the inner source is used.
/// Edits made by administrators become visible once the entry expires.
pub struct CachedScheduleSource {
    inner: Arc<dyn ScheduleSource>,
    redis: RedisService,
    ttl_seconds: u64,
}

impl CachedScheduleSource {
    pub fn new(inner: Arc<dyn ScheduleSource>, redis: RedisService, ttl_seconds: u64) -> Self {
        Self {
            inner,
            redis,
            ttl_seconds,
        }
    }
}

#[async_trait]
impl ScheduleSource for CachedScheduleSource {
    async fn load_snapshot(&self, from: NaiveDate, to: NaiveDate) -> AppResult<ConfigSnapshot> {
        let key = snapshot_key(from, to);

        match self.redis.get_snapshot(&key).await {
            Ok(Some(snapshot)) => {
                tracing::debug!("Snapshot cache hit: {}", key);
                return Ok(snapshot);
            }
            Ok(None) => tracing::debug!("Snapshot cache miss: {}", key),
            Err(e) => tracing::warn!("Snapshot cache unavailable, reading store: {}", e),
        }

        let snapshot = self.inner.load_snapshot(from, to).await?;

        if let Err(e) = self.redis.store_snapshot(&key, &snapshot, self.ttl_seconds).await {
            tracing::warn!("Failed to cache snapshot {}: {}", key, e);
        }

        Ok(snapshot)
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}
