use thiserror::Error;

/// Unified error type for the entire group-finance-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The forecast computation itself is infallible — errors only arise
/// from ledger mutations and JSON export/import.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Transaction validation failed: {0}")]
    ValidationError(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
