//! Errors raised while decoding inbound wire text.
//!
//! None of these are fatal: the session logs the error, drops the message and
//! keeps the connection alive.

use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Unparsable text, a non-object envelope, or an unrecognized `typ`.
    #[error("Malformed message: {detail}")]
    MalformedMessage { detail: String },
    /// Recognized `typ` whose `par` is absent or of the wrong shape.
    #[error("Invalid payload for '{kind}': {detail}")]
    InvalidPayload { kind: &'static str, detail: String },
    /// The envelope uses a parameters key from an older protocol revision.
    #[error("Protocol version mismatch: legacy key '{key}' is not accepted")]
    VersionMismatch { key: &'static str },
}

impl DecodeError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedMessage {
            detail: detail.into(),
        }
    }

    pub fn invalid_payload(kind: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidPayload {
            kind,
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedMessage { .. } => ErrorCode::MalformedMessage,
            Self::InvalidPayload { .. } => ErrorCode::InvalidPayload,
            Self::VersionMismatch { .. } => ErrorCode::VersionMismatch,
        }
    }
}
