//! Durable storage for the singleton counter record.
//!
//! Every backend implements [`CounterStore`] and applies mutations as a single
//! atomic read-modify-write at the storage layer, so concurrent increments and
//! decrements from different requests never lose updates.

mod error;
mod file;
mod memory;
mod redis_store;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Key of the one and only counter record.
pub const COUNTER_ID: &str = "main";

/// Persisted shape of the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub value: i64,
    pub updated_at: DateTime<Utc>,
}

impl CounterRecord {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            updated_at: Utc::now(),
        }
    }
}

/// The only mutations a counter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Increment,
    Decrement,
}

impl Delta {
    pub fn amount(self) -> i64 {
        match self {
            Delta::Increment => 1,
            Delta::Decrement => -1,
        }
    }

    /// Apply the delta to `value`, refusing to wrap around.
    pub fn apply_to(self, value: i64) -> Result<i64, StoreError> {
        value
            .checked_add(self.amount())
            .ok_or(StoreError::Overflow {
                value,
                delta: self.amount(),
            })
    }
}

/// Storage seam for the counter record.
///
/// Implementations own their connection or file handle; callers receive an
/// `Arc<dyn CounterStore>` from [`open_store`] and call [`CounterStore::close`]
/// when they are done with it.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Create the record with value 0 unless it already exists.
    ///
    /// Must be idempotent: calling it on a store holding a non-zero value
    /// leaves that value untouched.
    async fn ensure_initialized(&self) -> Result<(), StoreError>;

    /// Read the full record.
    async fn record(&self) -> Result<CounterRecord, StoreError>;

    /// Atomically apply `delta` and return the new value.
    async fn apply(&self, delta: Delta) -> Result<i64, StoreError>;

    async fn get_value(&self) -> Result<i64, StoreError> {
        Ok(self.record().await?.value)
    }

    async fn increment(&self) -> Result<i64, StoreError> {
        self.apply(Delta::Increment).await
    }

    async fn decrement(&self) -> Result<i64, StoreError> {
        self.apply(Delta::Decrement).await
    }

    /// Release the underlying handle. Default does nothing.
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Parsed storage connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageUrl {
    Memory,
    File(PathBuf),
    Redis(String),
}

impl FromStr for StorageUrl {
    type Err = StoreError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StoreError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        if url == "memory://" || url == "memory" {
            return Ok(StorageUrl::Memory);
        }
        if let Some(path) = url.strip_prefix("file://") {
            if path.is_empty() {
                return Err(invalid("file URL has no path"));
            }
            return Ok(StorageUrl::File(PathBuf::from(path)));
        }
        if url.starts_with("redis://") || url.starts_with("rediss://") {
            return Ok(StorageUrl::Redis(url.to_string()));
        }
        Err(invalid("expected memory://, file://<path>, redis:// or rediss://"))
    }
}

/// Open the store named by `url`.
///
/// Redis connections are established here, so an unreachable server fails
/// now rather than on the first request.
pub async fn open_store(url: &str, redis_prefix: &str) -> Result<Arc<dyn CounterStore>, StoreError> {
    let store: Arc<dyn CounterStore> = match url.parse::<StorageUrl>()? {
        StorageUrl::Memory => Arc::new(MemoryStore::new()),
        StorageUrl::File(path) => Arc::new(FileStore::new(path)),
        StorageUrl::Redis(url) => Arc::new(RedisStore::connect(&url, redis_prefix).await?),
    };
    tracing::info!(backend = store.backend(), "Opened counter store");
    Ok(store)
}
