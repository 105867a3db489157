//! WebSocket transport for the session client.

pub mod transport;

pub use transport::{run_session, ChannelConnection};
