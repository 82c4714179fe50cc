//! # Error Types
//!
//! The error kinds every ledger operation returns. All of them are values;
//! only `IntegrityViolation` is fatal to the ledger as a whole.

use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Why a signature could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFailure {
    /// The verification method does not resolve to a usable key.
    #[error("Key for {reference} unresolvable: {reason}")]
    KeyUnresolvable { reference: String, reason: String },

    /// The token header names an algorithm other than the expected one.
    #[error("Algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch { expected: String, found: String },

    /// The token is not a well-formed compact JWS.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The signature does not verify under the resolved key.
    #[error("Cryptographic verification failed")]
    Cryptographic,
}

/// Errors returned by admission, query and sealing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Document, block or key absent.
    #[error("Not found: {entity} {id}")]
    NotFound { entity: &'static str, id: String },

    /// Document already exists, is already revoked or already expired.
    #[error("Conflict on {id}: {reason}")]
    Conflict { id: String, reason: String },

    /// Document exists only in the pending pool.
    #[error("Pending sealing: {id}, retry later")]
    PendingRetry { id: String },

    /// Malformed id, URN or payload.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Key resolution, algorithm mismatch or cryptographic failure.
    #[error("Signature invalid: {0}")]
    SignatureInvalid(#[from] SignatureFailure),

    /// Signed claims differ from the submitted document.
    #[error("Signed payload does not match submitted document {id}")]
    PayloadMismatch { id: String },

    /// Trust-hierarchy or cross-field consistency rule broken.
    #[error("Semantic violation on {id}: {rule}")]
    SemanticViolation { id: String, rule: String },

    /// Chain hash, index or link check failed.
    #[error("Integrity violation at block {index}: {reason}")]
    IntegrityViolation { index: u64, reason: String },
}

/// Discriminant of [`LedgerError`], for callers mapping errors to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    PendingRetry,
    InvalidFormat,
    SignatureInvalid,
    PayloadMismatch,
    SemanticViolation,
    IntegrityViolation,
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conflict {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn pending(id: impl Into<String>) -> Self {
        Self::PendingRetry { id: id.into() }
    }

    pub fn semantic(id: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::SemanticViolation {
            id: id.into(),
            rule: rule.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::PendingRetry { .. } => ErrorKind::PendingRetry,
            Self::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Self::SignatureInvalid(_) => ErrorKind::SignatureInvalid,
            Self::PayloadMismatch { .. } => ErrorKind::PayloadMismatch,
            Self::SemanticViolation { .. } => ErrorKind::SemanticViolation,
            Self::IntegrityViolation { .. } => ErrorKind::IntegrityViolation,
        }
    }

    /// Check if the caller should simply retry later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PendingRetry { .. })
    }

    /// Check if the error invalidates the whole ledger (halts writes).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IntegrityViolation { .. })
    }
}
