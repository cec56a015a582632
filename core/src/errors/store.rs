use thiserror::Error;

/// Failures reported by a `TtlStore` implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or rejected the command
    #[error("Store backend error: {message}")]
    Backend { message: String },

    /// A stored value does not have the expected encoding
    #[error("Corrupt value at {key}: {message}")]
    CorruptValue { key: String, message: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend { message: message.into() }
    }
}
