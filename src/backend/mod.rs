//! Storage backend implementations.

use crate::error::Result;

pub mod inmemory;
#[cfg(feature = "jsonfile")]
pub mod jsonfile;

pub use inmemory::InMemoryBackend;
#[cfg(feature = "jsonfile")]
pub use jsonfile::JsonFileBackend;

/// Trait for key-value storage backend implementations.
///
/// Abstracts the durable key-value store the ledger writes its collections
/// into, allowing swappable backends. Implementations: InMemory (default),
/// JsonFile, or anything custom (browser storage bridge, embedded KV, etc.).
///
/// Values are JSON text blobs - one blob per collection. Backends store them
/// opaquely and never inspect the contents.
///
/// **IMPORTANT:** All methods use `&self` instead of `&mut self` to allow
/// shared access. Backend implementations should use interior mutability
/// (DashMap, RwLock, or external storage).
///
/// **ASYNC:** All methods are async and must be awaited.
#[allow(async_fn_in_trait)]
pub trait StorageBackend: Send + Sync + Clone {
    /// Retrieve the stored blob for a collection key.
    ///
    /// # Returns
    /// - `Ok(Some(blob))` - Collection present
    /// - `Ok(None)` - Collection never written (not an error)
    ///
    /// # Errors
    /// Returns `Err` if a backend error occurs (I/O failure, etc.)
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a blob under a collection key, fully replacing prior contents.
    ///
    /// There are no partial or merge semantics.
    ///
    /// # Errors
    /// Returns `Err` if a backend error occurs
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove a collection key.
    ///
    /// Removing an absent key is a no-op, not an error.
    ///
    /// # Errors
    /// Returns `Err` if a backend error occurs
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a collection key exists (optional optimization).
    ///
    /// # Errors
    /// Returns `Err` if a backend error occurs
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Health check - verify the backend is accessible.
    ///
    /// # Errors
    /// Returns `Err` if the backend is not accessible
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    /// Optional: Remove every stored collection (use with caution).
    ///
    /// # Errors
    /// Returns `Err` if the operation fails
    async fn clear_all(&self) -> Result<()>;
}
