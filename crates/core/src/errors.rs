use thiserror::Error;

/// Unified error type for the entire cashflow-ledger-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Ledger Operations ───────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Insufficient cash: need {required}, have {available}")]
    InsufficientCash { required: f64, available: f64 },

    // ── Bank Credit ─────────────────────────────────────────────────
    #[error("Loan amount {0} must be a positive multiple of 1000")]
    InvalidLoanAmount(f64),

    #[error("Loan amount {amount} exceeds limit {limit}")]
    LoanLimitExceeded { amount: f64, limit: f64 },

    #[error("Repayment of {amount} does not match outstanding {liability} principal of {principal}")]
    LiabilityClosureMismatch {
        liability: String,
        amount: f64,
        principal: f64,
    },

    // ── Phase ───────────────────────────────────────────────────────
    #[error("Already on the fast track")]
    AlreadyOnFastTrack,

    #[error("Not on the fast track")]
    NotOnFastTrack,

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
