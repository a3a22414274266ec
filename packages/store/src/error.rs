use thiserror::Error;

/// Failures of the browser-side key/value storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage rejected write of `{key}`")]
    WriteRejected { key: String },
}
