//! Error handling for the Sackson client.

pub mod domain;
pub mod error_code;
pub mod protocol;

pub use domain::{ActionError, StateError};
pub use error_code::ErrorCode;
pub use protocol::DecodeError;
