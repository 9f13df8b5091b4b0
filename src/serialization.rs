//! Canonical JSON serialization for ledger storage.
//!
//! Every collection in the ledger is stored as a single JSON text blob, the
//! layout the rest of the ecosystem around this data already expects:
//! `users`, `appointments`, and `bills` are JSON arrays, `currentUser` is a
//! single JSON object. This module owns the encode/decode pair so the format
//! cannot drift between backends.
//!
//! # Failure behavior
//!
//! Decoding is strict here - corruption is reported as
//! [`Error::DeserializationError`]. The lenient absent-or-corrupt-yields-
//! default behavior lives one level up in [`crate::Ledger::read`], which is
//! the path application code uses.
//!
//! # Example
//!
//! ```
//! use garage_kit::serialization::{decode, encode};
//!
//! # fn main() -> garage_kit::Result<()> {
//! let names = vec!["Oil Change".to_string(), "Brake Service".to_string()];
//! let blob = encode(&names)?;
//! let back: Vec<String> = decode(&blob)?;
//! assert_eq!(names, back);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value as the JSON text stored in a ledger collection.
///
/// # Errors
///
/// Returns `Error::SerializationError` if JSON serialization fails.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| {
        error!("Ledger serialization failed: {}", e);
        Error::SerializationError(e.to_string())
    })
}

/// Decode a value from the JSON text stored in a ledger collection.
///
/// # Errors
///
/// Returns `Error::DeserializationError` if the blob is not valid JSON or
/// does not match the expected shape.
pub fn decode<T: DeserializeOwned>(blob: &str) -> Result<T> {
    serde_json::from_str(blob).map_err(|e| {
        error!("Ledger deserialization failed: {}", e);
        Error::DeserializationError(e.to_string())
    })
}
