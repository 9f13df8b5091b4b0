//! Core entity trait that all ledger-stored records must implement.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Trait for records persisted in a ledger collection.
///
/// Each implementing type names the collection it lives in and exposes its
/// record id. Collections are always read and written whole - there is no
/// per-record storage primitive - so the collection name is an associated
/// constant rather than a per-instance key.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use garage_kit::LedgerEntity;
///
/// #[derive(Clone, Serialize, Deserialize)]
/// pub struct ServiceNote {
///     pub id: String,
///     pub text: String,
/// }
///
/// impl LedgerEntity for ServiceNote {
///     const COLLECTION: &'static str = "serviceNotes";
///
///     fn record_id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait LedgerEntity: Send + Sync + Serialize + for<'de> Deserialize<'de> + Clone {
    /// Name of the ledger collection holding this record type.
    ///
    /// Example: `"appointments"`, `"bills"`.
    const COLLECTION: &'static str;

    /// Return the record's unique id.
    ///
    /// Uniqueness is caller-enforced; the store does not check it.
    fn record_id(&self) -> &str;

    /// Serialize the record as ledger-storage JSON.
    ///
    /// This method is NOT overridable to ensure the stored layout stays
    /// consistent across all record types.
    ///
    /// See `crate::serialization` for implementation details.
    fn encode_record(&self) -> Result<String> {
        crate::serialization::encode(self)
    }

    /// Deserialize a record from ledger-storage JSON.
    ///
    /// This method is NOT overridable to ensure the stored layout stays
    /// consistent across all record types.
    ///
    /// # Errors
    ///
    /// - `Error::DeserializationError`: malformed or shape-mismatched blob
    fn decode_record(blob: &str) -> Result<Self> {
        crate::serialization::decode(blob)
    }

    /// Optional: Validate the record after loading.
    ///
    /// Called by services that need consistency guarantees beyond shape.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
