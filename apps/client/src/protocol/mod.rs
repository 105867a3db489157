//! Wire protocol: the unified `{typ, par}` envelope in both directions.

pub mod codec;
pub mod messages;
mod wire;

#[cfg(test)]
mod tests_codec;

pub use codec::{decode, decode_action, encode};
pub use messages::{OutReason, Role, ServerMessage, StateUpdate};

/// Key carrying message parameters in the unified protocol.
pub const PARAMS_KEY: &str = "par";
/// Parameters key used by older server revisions; always rejected.
pub const LEGACY_PARAMS_KEY: &str = "det";
