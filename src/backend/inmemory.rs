//! In-memory storage backend (default, thread-safe, async).
//!
//! Uses DashMap for lock-free concurrent access with per-key sharding.
//! Contents are volatile - they live exactly as long as the process.

use super::StorageBackend;
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe async in-memory storage backend.
///
/// Uses DashMap for lock-free concurrent access with fine-grained per-key
/// sharding. No async locks required - operations are non-blocking.
///
/// This is the backend of choice for tests and for embedding the ledger in
/// a host that supplies its own persistence.
///
/// # Example
///
/// ```no_run
/// use garage_kit::backend::{InMemoryBackend, StorageBackend};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = InMemoryBackend::new();
///
///     // Store a collection blob
///     backend.set("appointments", "[]".to_string()).await?;
///
///     // Retrieve it
///     let value = backend.get("appointments").await?;
///     assert_eq!(value.as_deref(), Some("[]"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    store: Arc<DashMap<String, String>>,
}

impl InMemoryBackend {
    /// Create a new in-memory storage backend.
    pub fn new() -> Self {
        InMemoryBackend {
            store: Arc::new(DashMap::new()),
        }
    }

    /// Get the current number of stored collections.
    pub async fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get storage statistics.
    pub async fn stats(&self) -> StoreStats {
        let total_bytes: usize = self.store.iter().map(|entry| entry.value().len()).sum();

        StoreStats {
            total_collections: self.store.len(),
            total_bytes,
        }
    }

    /// Print storage statistics to debug log.
    pub async fn log_stats(&self) {
        let stats = self.stats().await;
        debug!(
            "Store Stats: {} collections, {} bytes",
            stats.total_collections, stats.total_bytes
        );
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.store.get(key) {
            Some(entry) => {
                debug!("✓ InMemory GET {} -> HIT", key);
                Ok(Some(entry.value().clone()))
            }
            None => {
                debug!("✓ InMemory GET {} -> MISS", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.store.insert(key.to_string(), value);
        debug!("✓ InMemory SET {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key);
        debug!("✓ InMemory DELETE {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.store.contains_key(key))
    }

    async fn health_check(&self) -> Result<bool> {
        // In-memory backend is always healthy
        Ok(true)
    }

    async fn clear_all(&self) -> Result<()> {
        self.store.clear();
        warn!("⚠ InMemory CLEAR_ALL executed - all collections cleared!");
        Ok(())
    }
}

/// Storage statistics.
#[derive(Clone, Debug)]
pub struct StoreStats {
    pub total_collections: usize,
    pub total_bytes: usize,
}
