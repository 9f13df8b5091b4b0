//! Ledger - the persistent collection store all services read and write.
//!
//! A [`Ledger`] wraps a [`StorageBackend`] and exposes get-all/set-all
//! semantics over named collections serialized as JSON. It is the sole
//! persistence mechanism: no transactions, no concurrency control, no
//! schema validation.
//!
//! # Failure behavior
//!
//! [`Ledger::read`] never fails. An absent collection, a malformed blob, or
//! a backend error all yield the caller-supplied default; corruption is
//! logged at `warn!` and never surfaced to the user. Callers that must
//! distinguish corruption use [`Ledger::try_read`].

use crate::backend::StorageBackend;
use crate::entity::LedgerEntity;
use crate::error::Result;
use crate::serialization;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Well-known collection names.
pub mod collections {
    /// Registered user accounts (profile + password).
    pub const USERS: &str = "users";
    /// All appointments, across every user.
    pub const APPOINTMENTS: &str = "appointments";
    /// All finalized bills.
    pub const BILLS: &str = "bills";
    /// The signed-in user's profile; absent when signed out.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Persistent collection store over a pluggable backend.
///
/// Cheap to clone - clones share the same backend. Each service holds its
/// own `Ledger` clone and re-reads collections after every mutation instead
/// of caching state.
///
/// # Example
///
/// ```no_run
/// use garage_kit::{backend::InMemoryBackend, Ledger};
///
/// #[tokio::main]
/// async fn main() -> garage_kit::Result<()> {
///     let ledger = Ledger::new(InMemoryBackend::new());
///
///     // A never-written collection reads as the supplied default
///     let names: Vec<String> = ledger.read("serviceNames", Vec::new()).await;
///     assert!(names.is_empty());
///
///     ledger.write("serviceNames", &vec!["Oil Change".to_string()]).await?;
///     let names: Vec<String> = ledger.read("serviceNames", Vec::new()).await;
///     assert_eq!(names.len(), 1);
///     Ok(())
/// }
/// ```
pub struct Ledger<B: StorageBackend> {
    backend: Arc<B>,
}

impl<B: StorageBackend> Clone for Ledger<B> {
    fn clone(&self) -> Self {
        Ledger {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: StorageBackend> Ledger<B> {
    /// Create a new ledger over the given backend.
    pub fn new(backend: B) -> Self {
        Ledger {
            backend: Arc::new(backend),
        }
    }

    /// Read a collection, yielding `default` when it is absent, malformed,
    /// or the backend fails.
    ///
    /// This is the path application code uses: a corrupted blob must not
    /// crash the reader. Corruption is logged and swallowed.
    pub async fn read<T: DeserializeOwned>(&self, collection: &str, default: T) -> T {
        match self.backend.get(collection).await {
            Ok(Some(blob)) => match serialization::decode(&blob) {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "Collection '{}' is unreadable, substituting default: {}",
                        collection, e
                    );
                    default
                }
            },
            Ok(None) => {
                debug!("Collection '{}' absent, using default", collection);
                default
            }
            Err(e) => {
                warn!(
                    "Backend read of '{}' failed, substituting default: {}",
                    collection, e
                );
                default
            }
        }
    }

    /// Strict read: distinguishes absence (`Ok(None)`) from corruption and
    /// backend failure (`Err`).
    ///
    /// # Errors
    ///
    /// - `Error::DeserializationError`: stored blob is malformed
    /// - `Error::BackendError`: backend access failed
    pub async fn try_read<T: DeserializeOwned>(&self, collection: &str) -> Result<Option<T>> {
        match self.backend.get(collection).await? {
            Some(blob) => Ok(Some(serialization::decode(&blob)?)),
            None => Ok(None),
        }
    }

    /// Write a collection, fully replacing its serialized contents.
    ///
    /// # Errors
    ///
    /// - `Error::SerializationError`: value cannot be encoded
    /// - `Error::BackendError`: backend write failed
    pub async fn write<T: Serialize>(&self, collection: &str, value: &T) -> Result<()> {
        let blob = serialization::encode(value)?;
        self.backend.set(collection, blob).await?;
        debug!("» Ledger wrote collection '{}'", collection);
        Ok(())
    }

    /// Remove a collection entirely.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend delete fails.
    pub async fn remove(&self, collection: &str) -> Result<()> {
        self.backend.delete(collection).await
    }

    /// Read all records of an entity type from its collection.
    ///
    /// Absent or unreadable collections read as empty.
    pub async fn read_all<T: LedgerEntity>(&self) -> Vec<T> {
        self.read(T::COLLECTION, Vec::new()).await
    }

    /// Replace an entity type's collection with the given records.
    ///
    /// # Errors
    ///
    /// Same cases as [`Ledger::write`].
    pub async fn write_all<T: LedgerEntity>(&self, records: &[T]) -> Result<()> {
        self.write(T::COLLECTION, &records).await
    }

    /// Get backend reference (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: String,
        value: String,
    }

    impl LedgerEntity for TestRecord {
        const COLLECTION: &'static str = "testRecords";

        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn record(id: &str, value: &str) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test]
    async fn test_read_absent_yields_default() {
        let ledger = Ledger::new(InMemoryBackend::new());

        let records: Vec<TestRecord> = ledger.read("neverWritten", Vec::new()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_write_read_roundtrip() {
        let ledger = Ledger::new(InMemoryBackend::new());

        let records = vec![record("1", "a"), record("2", "b")];
        ledger
            .write("testRecords", &records)
            .await
            .expect("Failed to write");

        let back: Vec<TestRecord> = ledger.read("testRecords", Vec::new()).await;
        assert_eq!(back, records);
    }

    #[tokio::test]
    async fn test_read_malformed_blob_yields_default() {
        let ledger = Ledger::new(InMemoryBackend::new());

        ledger
            .backend()
            .set("testRecords", "{definitely not json".to_string())
            .await
            .expect("Failed to seed corruption");

        let back: Vec<TestRecord> = ledger.read("testRecords", Vec::new()).await;
        assert!(back.is_empty());
    }

    #[tokio::test]
    async fn test_try_read_surfaces_corruption() {
        let ledger = Ledger::new(InMemoryBackend::new());

        ledger
            .backend()
            .set("testRecords", "{broken".to_string())
            .await
            .expect("Failed to seed corruption");

        let result: Result<Option<Vec<TestRecord>>> = ledger.try_read("testRecords").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_try_read_absent_is_none() {
        let ledger = Ledger::new(InMemoryBackend::new());

        let result: Option<Vec<TestRecord>> = ledger
            .try_read("neverWritten")
            .await
            .expect("try_read failed");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_whole_collection() {
        let ledger = Ledger::new(InMemoryBackend::new());

        ledger
            .write("testRecords", &vec![record("1", "a"), record("2", "b")])
            .await
            .expect("Failed to write");
        ledger
            .write("testRecords", &vec![record("3", "c")])
            .await
            .expect("Failed to write");

        let back: Vec<TestRecord> = ledger.read("testRecords", Vec::new()).await;
        assert_eq!(back, vec![record("3", "c")]);
    }

    #[tokio::test]
    async fn test_remove_collection() {
        let ledger = Ledger::new(InMemoryBackend::new());

        ledger
            .write("testRecords", &vec![record("1", "a")])
            .await
            .expect("Failed to write");
        ledger.remove("testRecords").await.expect("Failed to remove");

        let back: Option<Vec<TestRecord>> = ledger
            .try_read("testRecords")
            .await
            .expect("try_read failed");
        assert!(back.is_none());
    }

    #[tokio::test]
    async fn test_entity_read_all_write_all() {
        let ledger = Ledger::new(InMemoryBackend::new());

        assert!(ledger.read_all::<TestRecord>().await.is_empty());

        ledger
            .write_all(&[record("1", "a")])
            .await
            .expect("Failed to write_all");

        let back = ledger.read_all::<TestRecord>().await;
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].record_id(), "1");
    }

    #[tokio::test]
    async fn test_ledger_clone_shares_backend() {
        let ledger1 = Ledger::new(InMemoryBackend::new());
        let ledger2 = ledger1.clone();

        ledger1
            .write("testRecords", &vec![record("1", "a")])
            .await
            .expect("Failed to write");

        let back: Vec<TestRecord> = ledger2.read("testRecords", Vec::new()).await;
        assert_eq!(back.len(), 1);
    }

    #[tokio::test]
    async fn test_single_object_collection() {
        let ledger = Ledger::new(InMemoryBackend::new());

        let user = record("u1", "profile");
        ledger
            .write(collections::CURRENT_USER, &user)
            .await
            .expect("Failed to write");

        let back: Option<TestRecord> = ledger.read(collections::CURRENT_USER, None).await;
        assert_eq!(back, Some(user));

        ledger
            .remove(collections::CURRENT_USER)
            .await
            .expect("Failed to remove");
        let back: Option<TestRecord> = ledger.read(collections::CURRENT_USER, None).await;
        assert!(back.is_none());
    }
}
