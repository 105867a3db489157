use crate::error::ClientError;

/// Outbound half of a connection to the game server.
///
/// Inbound text and close events are pushed into
/// [`SessionClient`](crate::session::SessionClient) by whoever owns the transport.
pub trait Connection {
    fn send(&mut self, text: String) -> Result<(), ClientError>;
}
