use thiserror::Error;

use crate::errors::domain::{ActionError, StateError};
use crate::errors::protocol::DecodeError;
use crate::errors::ErrorCode;

/// Top-level error for the client library and binary.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Transport error: {detail}")]
    Transport { detail: String },
}

impl ClientError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Decode(e) => e.code(),
            ClientError::State(e) => e.code(),
            ClientError::Action(e) => e.code(),
            ClientError::Config { .. } => ErrorCode::ConfigError,
            ClientError::Transport { .. } => ErrorCode::TransportError,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        ClientError::transport(format!("websocket error: {e}"))
    }
}
