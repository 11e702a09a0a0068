//! Shared error type across admitgate crates.

use thiserror::Error;

use crate::request::Operation;

/// Machine-readable reason attached to error denials (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// Malformed envelope or resource payload.
    BadRequest,
    /// No decision function registered for the operation.
    NotRegistered,
    /// Invalid startup configuration.
    Invalid,
    /// Decision function fault or encoding failure.
    InternalError,
}

impl ReasonCode {
    /// String representation used in `status.reason`.
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::BadRequest => "BadRequest",
            ReasonCode::NotRegistered => "NotRegistered",
            ReasonCode::Invalid => "Invalid",
            ReasonCode::InternalError => "InternalError",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AdmitError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AdmitError {
    /// Display is the bare parse error so it can be surfaced verbatim.
    #[error("{0}")]
    Decode(String),
    #[error("operation {0} is not registered")]
    UnsupportedOperation(Operation),
    #[error("{0}")]
    Policy(String),
    #[error("encode patch failed: {0}")]
    Encode(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AdmitError {
    /// Map internal error to a stable reason code.
    pub fn reason(&self) -> ReasonCode {
        match self {
            AdmitError::Decode(_) => ReasonCode::BadRequest,
            AdmitError::UnsupportedOperation(_) => ReasonCode::NotRegistered,
            AdmitError::Config(_) | AdmitError::UnsupportedVersion => ReasonCode::Invalid,
            AdmitError::Policy(_) | AdmitError::Encode(_) | AdmitError::Internal(_) => {
                ReasonCode::InternalError
            }
        }
    }
}

impl From<serde_json::Error> for AdmitError {
    fn from(e: serde_json::Error) -> Self {
        AdmitError::Decode(e.to_string())
    }
}
