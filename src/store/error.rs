use thiserror::Error;

/// Errors raised by counter storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable store could not be reached or the query failed.
    #[error("Storage unavailable ({backend}): {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
    },

    /// The singleton record is missing after initialization.
    #[error("Counter record '{id}' missing after initialization")]
    InvariantViolation { id: &'static str },

    /// Stored data exists but cannot be interpreted.
    #[error("Corrupt counter data ({backend}): {message}")]
    Corrupt {
        backend: &'static str,
        message: String,
    },

    /// Applying the delta would leave the i64 range.
    #[error("Counter value {value} cannot be moved by {delta} without overflow")]
    Overflow { value: i64, delta: i64 },

    /// The storage connection string is not understood.
    #[error("Invalid storage URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl StoreError {
    pub(crate) fn unavailable(backend: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Unavailable {
            backend,
            message: err.to_string(),
        }
    }

    pub(crate) fn corrupt(backend: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Corrupt {
            backend,
            message: err.to_string(),
        }
    }
}
