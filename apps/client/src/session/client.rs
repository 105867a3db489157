use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::action::PlayerIntent;
use crate::error::ClientError;
use crate::protocol::codec;
use crate::services::phase_controller::{Applied, ControllerRules, PhaseController};
use crate::session::connection::Connection;
use crate::session::render::Renderer;

/// One game session over one connection.
///
/// All entry points run to completion; the caller serialises inbound text,
/// close events and user intents onto a single queue.
pub struct SessionClient<C: Connection, R: Renderer> {
    session_id: Uuid,
    controller: PhaseController,
    connection: C,
    renderer: R,
    closed: bool,
}

impl<C: Connection, R: Renderer> SessionClient<C, R> {
    pub fn new(connection: C, renderer: R, rules: ControllerRules) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session_id = %session_id, ?rules, "Session created");
        Self {
            session_id,
            controller: PhaseController::new(rules),
            connection,
            renderer,
            closed: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn controller(&self) -> &PhaseController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Render the current frame without any transition, e.g. right after connecting.
    pub fn render_current(&mut self) {
        self.renderer.render(&self.controller.frame());
    }

    /// Handle one inbound text frame. Failures are logged and the message dropped.
    pub fn on_message(&mut self, text: &str) {
        if self.closed {
            debug!(session_id = %self.session_id, "Message after close ignored");
            return;
        }

        let msg = match codec::decode(text) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(
                    session_id = %self.session_id,
                    code = %err.code(),
                    error = %err,
                    "[SESSION] Dropping undecodable message"
                );
                return;
            }
        };

        let label = msg.label();
        match self.controller.apply(msg) {
            Ok(Applied::Changed) => {
                debug!(
                    session_id = %self.session_id,
                    kind = label,
                    phase = %self.controller.phase(),
                    "Message applied"
                );
                self.renderer.render(&self.controller.frame());
            }
            Ok(Applied::ServerError { code, text }) => {
                info!(
                    session_id = %self.session_id,
                    server_code = code.as_deref().unwrap_or("-"),
                    "Server reported an error"
                );
                self.renderer.server_error(code.as_deref(), &text);
            }
            Ok(Applied::Removed { reason }) => {
                info!(
                    session_id = %self.session_id,
                    reason = reason.as_str(),
                    "Removed from the room; session frozen"
                );
                self.renderer.render(&self.controller.frame());
                self.renderer.session_ended(&reason);
            }
            Ok(Applied::Ignored) => {}
            Err(err) => {
                warn!(
                    session_id = %self.session_id,
                    code = %err.code(),
                    error = %err,
                    phase = %self.controller.phase(),
                    "[SESSION] Dropping message that cannot be applied"
                );
            }
        }
    }

    /// Handle transport close. Only the first call has any effect.
    pub fn on_close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.controller.freeze() {
            info!(
                session_id = %self.session_id,
                phase = %self.controller.phase(),
                "Connection closed; session frozen"
            );
            self.renderer.render(&self.controller.frame());
        }
    }

    /// Validate a user intent and, only if it is accepted, encode and send it.
    pub fn submit(&mut self, intent: PlayerIntent) -> Result<(), ClientError> {
        let action = match self.controller.build_action(intent) {
            Ok(action) => action,
            Err(err) => {
                debug!(
                    session_id = %self.session_id,
                    code = %err.code(),
                    error = %err,
                    "Action rejected locally"
                );
                self.renderer.action_rejected(&err);
                return Err(err.into());
            }
        };

        let kind = action.kind();
        let text = codec::encode(&action);
        if let Err(err) = self.connection.send(text) {
            warn!(
                session_id = %self.session_id,
                %kind,
                error = %err,
                "[SESSION] Failed to send action"
            );
            return Err(err);
        }
        info!(session_id = %self.session_id, %kind, "Action sent");
        Ok(())
    }
}
