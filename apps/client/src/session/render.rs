use crate::errors::domain::ActionError;
use crate::protocol::messages::OutReason;
use crate::services::phase_controller::RenderFrame;

/// Presentation collaborator. Receives phase/data tuples, never protocol text.
pub trait Renderer {
    /// Called once per completed transition.
    fn render(&mut self, frame: &RenderFrame<'_>);

    /// A player action was rejected locally; nothing was sent.
    fn action_rejected(&mut self, error: &ActionError);

    /// Error reported by the server, shown verbatim.
    fn server_error(&mut self, code: Option<&str>, text: &str);

    /// The server took this client out of the room. Follows the final frame.
    fn session_ended(&mut self, reason: &OutReason);
}
