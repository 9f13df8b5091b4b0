//! JSON-file storage backend (durable, feature `jsonfile`).
//!
//! Stores one `<collection>.json` file per key under a base directory via
//! `tokio::fs`. This is the durable counterpart of a host's key-value
//! storage: whole-blob reads and writes, no locking, no partial updates.

use super::StorageBackend;
use crate::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Durable file-per-collection storage backend.
///
/// Each collection key maps to `<base_dir>/<key>.json`. Writes replace the
/// whole file; reads return its full contents. The base directory is created
/// on first write if it does not exist.
///
/// # Example
///
/// ```no_run
/// use garage_kit::backend::{JsonFileBackend, StorageBackend};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = JsonFileBackend::new("/var/lib/garage");
///
///     backend.set("appointments", "[]".to_string()).await?;
///     let value = backend.get("appointments").await?;
///     assert_eq!(value.as_deref(), Some("[]"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct JsonFileBackend {
    base_dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at the given directory.
    ///
    /// The directory itself is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        JsonFileBackend {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory this backend stores its collection files in.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(blob) => {
                debug!("✓ JsonFile GET {} -> HIT", key);
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("✓ JsonFile GET {} -> MISS", key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        debug!("✓ JsonFile SET {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => {}
            // Removing an absent collection is a no-op
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        debug!("✓ JsonFile DELETE {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path_for(key)).await?)
    }

    async fn health_check(&self) -> Result<bool> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        Ok(true)
    }

    async fn clear_all(&self) -> Result<()> {
        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                tokio::fs::remove_file(&path).await?;
            }
        }

        warn!("⚠ JsonFile CLEAR_ALL executed - all collection files removed!");
        Ok(())
    }
}
