//! Redis cache implementation.
//!
//! Carries the per-user effective-permission cache and the fixed-window
//! rate-limit counters, plus generic typed get/set helpers.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::config::{
    Config, CACHE_PREFIX_PERMISSIONS, CACHE_PREFIX_RATE_LIMIT, DEFAULT_CACHE_TTL_SECONDS,
};
use crate::errors::{AppError, AppResult};

/// Redis cache wrapper with a managed connection.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Create a new cache instance and connect to Redis.
    ///
    /// # Panics
    /// Panics if Redis connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client =
            Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Try to connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| {
                    AppError::internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value in cache with custom TTL (in seconds).
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check if a key exists in cache.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    // =========================================================================
    // Permission Set Cache
    // =========================================================================

    /// Get a user's cached effective permission codes.
    pub async fn get_permissions(&self, user_id: &Uuid) -> AppResult<Option<Vec<String>>> {
        self.get(&permissions_key(user_id)).await
    }

    /// Cache a user's effective permission codes.
    pub async fn set_permissions(&self, user_id: &Uuid, codes: &[String]) -> AppResult<()> {
        self.set(&permissions_key(user_id), &codes.to_vec()).await
    }

    /// Drop a user's cached permission set (on group membership change).
    pub async fn invalidate_permissions(&self, user_id: &Uuid) -> AppResult<()> {
        self.delete(&permissions_key(user_id)).await
    }

    // =========================================================================
    // Rate Limiting
    // =========================================================================

    /// Fixed-window rate limit check.
    ///
    /// Returns the request count inside the current window and whether
    /// the request is allowed.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }
}

/// Permission-set cache seam, so the access service can be tested
/// without a Redis instance.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PermissionCache: Send + Sync {
    /// Cached effective permission codes, if present
    async fn cached_permissions(&self, user_id: Uuid) -> AppResult<Option<Vec<String>>>;

    /// Store a user's effective permission codes
    async fn store_permissions(&self, user_id: Uuid, codes: Vec<String>) -> AppResult<()>;

    /// Drop a user's cached permission set
    async fn invalidate(&self, user_id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl PermissionCache for Cache {
    async fn cached_permissions(&self, user_id: Uuid) -> AppResult<Option<Vec<String>>> {
        self.get_permissions(&user_id).await
    }

    async fn store_permissions(&self, user_id: Uuid, codes: Vec<String>) -> AppResult<()> {
        self.set_permissions(&user_id, &codes).await
    }

    async fn invalidate(&self, user_id: Uuid) -> AppResult<()> {
        self.invalidate_permissions(&user_id).await
    }
}

fn permissions_key(user_id: &Uuid) -> String {
    format!("{}{}", CACHE_PREFIX_PERMISSIONS, user_id)
}

fn cache_error(e: RedisError) -> AppError {
    AppError::internal(format!("Cache error: {}", e))
}
