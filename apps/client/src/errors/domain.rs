//! Domain-level errors raised by the state stores and the phase controller.
//!
//! These are transport-agnostic. The session converts them into
//! `crate::error::ClientError` via the provided `From` implementations.

use thiserror::Error;

use crate::domain::action::ActionKind;
use crate::domain::phase::Phase;
use crate::errors::ErrorCode;

/// Reconciliation failure: the inbound state cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Illegal transition: {detail}")]
    IllegalTransition { detail: String },
}

impl StateError {
    pub fn illegal(detail: impl Into<String>) -> Self {
        Self::IllegalTransition {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::IllegalTransition { .. } => ErrorCode::IllegalTransition,
        }
    }
}

/// Local rejection of a player action. Nothing is sent when one of these is raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{kind} is not accepted while in phase {phase}")]
    PhaseMismatch { phase: Phase, kind: ActionKind },
    #[error("Invalid action input: {detail}")]
    InvalidActionInput { detail: String },
    #[error("An action was already sent for this directive")]
    ActionInFlight,
    #[error("Session is closed")]
    SessionFrozen,
}

impl ActionError {
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::InvalidActionInput {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PhaseMismatch { .. } => ErrorCode::PhaseMismatch,
            Self::InvalidActionInput { .. } => ErrorCode::InvalidActionInput,
            Self::ActionInFlight => ErrorCode::ActionInFlight,
            Self::SessionFrozen => ErrorCode::SessionFrozen,
        }
    }
}
