use thiserror::Error;

/// Error type that captures the failure modes of the bookkeeping core.
///
/// Per-row interchange anomalies never surface here: bad rows are skipped
/// during decode and only whole-document failures abort an import.
#[derive(Debug, Error)]
pub enum BooksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Raised by the form layer before a draft ever reaches the store.
    #[error("Registro incompleto: {0}")]
    Validation(String),
    /// The interchange text is missing a header plus at least one data line.
    #[error("Formato inválido: muy pocas líneas")]
    InvalidFormat,
    /// Every data row was rejected by the per-row tolerance rules.
    #[error("No se pudieron leer registros válidos")]
    EmptyImport,
    #[error("Storage error: {0}")]
    Storage(String),
}
