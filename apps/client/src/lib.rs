#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Client-side synchronization engine for a Sackson (Acquire) game session.

pub mod bin_support;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod protocol;
pub mod services;
pub mod session;
pub mod ws;

// Re-exports for public API
pub use config::client::ClientConfig;
pub use domain::{ClientAction, Phase, PlayerIntent};
pub use error::ClientError;
pub use errors::ErrorCode;
pub use protocol::{decode, encode, OutReason, ServerMessage};
pub use services::phase_controller::{
    Applied, ControllerRules, PhaseController, PhaseData, RenderFrame,
};
pub use session::{Connection, Renderer, SessionClient};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}
