//! Error types for the workshop management core.

use crate::model::AppointmentStatus;
use std::fmt;

/// Result type for ledger and service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for garage-kit.
///
/// All fallible operations return `Result<T>` where `Result` is defined as
/// `std::result::Result<T, Error>`. Different variants represent different
/// failure modes:
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Serialization failed when encoding a collection for storage.
    ///
    /// This occurs when a record's `Serde` implementation fails.
    SerializationError(String),

    /// Deserialization failed when decoding a stored collection.
    ///
    /// This indicates corrupted or malformed data in the store. Callers
    /// going through [`crate::Ledger::read`] never see this variant - the
    /// ledger substitutes the caller's default instead. It is surfaced only
    /// by the strict `try_read` path.
    DeserializationError(String),

    /// Validation failed on caller-supplied input.
    ///
    /// Raised when:
    /// - A booking request has missing/invalid fields (past date, unknown
    ///   time slot, empty services)
    /// - A record's `validate()` hook rejects it after loading
    ValidationError(String),

    /// Backend storage error (filesystem, custom backend, etc).
    ///
    /// This indicates the storage backend is unavailable or returned an
    /// error. The in-memory backend never produces it.
    BackendError(String),

    /// A record with the given id does not exist in its collection.
    NotFound(String),

    /// An appointment status change violates the state machine.
    ///
    /// `pending` may move to `confirmed` or `cancelled`; `confirmed` may
    /// move to `completed` (via billing) or `cancelled`; `completed` and
    /// `cancelled` are terminal. Everything else is rejected with this
    /// variant and the stored data is left untouched.
    InvalidTransition {
        /// Status the appointment currently has
        from: AppointmentStatus,
        /// Status the caller asked for
        to: AppointmentStatus,
    },

    /// Generic error with custom message.
    ///
    /// Used for errors that don't fit into other variants.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Error::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {} -> {}", from, to)
            }
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::BackendError(e.to_string())
        } else if e.is_syntax() || e.is_eof() {
            Error::DeserializationError(e.to_string())
        } else {
            Error::SerializationError(e.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::BackendError(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}
