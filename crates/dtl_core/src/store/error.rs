use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("Deserialization error in {path}: {source}")]
    Deserialization { path: String, source: serde_json::Error },

    #[error("Store version mismatch in {path}: found {found}, expected {expected}")]
    VersionMismatch { path: String, found: u32, expected: u32 },
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Io(_) => true,
            StoreError::VersionMismatch { .. } => true, // Can try migration
            StoreError::Serialization(_) => false,
            StoreError::Deserialization { .. } => false,
        }
    }
}
