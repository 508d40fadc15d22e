use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Inconsistent tournament data: {0}")]
    Inconsistent(String),
}

impl StoreError {
    /// Whether wiping the data directory with a reset would clear the fault.
    pub fn is_recoverable_by_reset(&self) -> bool {
        match self {
            StoreError::Io(_) => false,
            StoreError::Json { .. } => true,
            StoreError::FileNotFound { .. } => true,
            StoreError::Inconsistent(_) => true,
        }
    }
}
