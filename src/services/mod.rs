//! Business logic services

pub mod availability;
pub mod redis;

use std::sync::Arc;

use crate::{
    config::{AvailabilityConfig, CacheConfig},
    error::AppResult,
    repository::{Repository, ScheduleSource},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
}

impl Services {
    /// Create all services with the given repository.
    /// With the cache enabled, snapshots are served from Redis for `ttl_seconds`.
    pub async fn new(
        repository: Repository,
        availability_config: AvailabilityConfig,
        cache_config: &CacheConfig,
    ) -> AppResult<Self> {
        let mut source: Arc<dyn ScheduleSource> = Arc::new(repository);

        if cache_config.enabled {
            let redis_service = redis::RedisService::new(&cache_config.url).await?;
            tracing::info!(
                "Snapshot cache enabled (ttl {}s)",
                cache_config.ttl_seconds
            );
            source = Arc::new(redis::CachedScheduleSource::new(
                source,
                redis_service,
                cache_config.ttl_seconds,
            ));
        }

        Ok(Self::with_source(source, availability_config))
    }

    /// Build services over an arbitrary configuration source
    pub fn with_source(source: Arc<dyn ScheduleSource>, availability_config: AvailabilityConfig) -> Self {
        Self {
            availability: availability::AvailabilityService::new(source, availability_config),
        }
    }
}
