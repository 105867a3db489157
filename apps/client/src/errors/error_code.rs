//! Error codes for the Sackson client.
//!
//! Every error surfaced to logs or to the renderer carries one of these codes.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Inbound decoding
    /// Text is not a recognizable envelope, or its tag is unknown
    MalformedMessage,
    /// Recognized tag whose parameters are missing or mis-shaped
    InvalidPayload,
    /// Envelope uses the legacy `det` parameters key
    VersionMismatch,

    // State reconciliation
    /// Board patch regresses a cell, or a directive names an unknown phase
    IllegalTransition,

    // Local action validation
    /// Action kind is not accepted in the current phase
    PhaseMismatch,
    /// Raw user input could not be turned into a valid action
    InvalidActionInput,
    /// An action was already sent for the current directive
    ActionInFlight,
    /// The connection closed; no more actions may be built
    SessionFrozen,

    // System Errors
    /// Connection could not carry the message
    TransportError,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedMessage => "MALFORMED_MESSAGE",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::VersionMismatch => "VERSION_MISMATCH",

            Self::IllegalTransition => "ILLEGAL_TRANSITION",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidActionInput => "INVALID_ACTION_INPUT",
            Self::ActionInFlight => "ACTION_IN_FLIGHT",
            Self::SessionFrozen => "SESSION_FROZEN",

            Self::TransportError => "TRANSPORT_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
