//! Phase controller: the client state machine.
//!
//! Consumes decoded server messages, moves between session phases, and
//! validates player intents into outbound actions. It owns the board and
//! player stores; nothing outside this type mutates them.

mod actions;
mod transitions;


use tracing::{debug, info};

use crate::domain::board::Board;
use crate::domain::corporations::{CorporationId, Corporations};
use crate::domain::phase::{Directive, Phase};
use crate::domain::player::PlayerState;
use crate::errors::domain::StateError;
use crate::protocol::messages::{OutReason, Role, ServerMessage, StateUpdate};

/// Tunables the controller validates actions against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerRules {
    /// Most shares a player may buy in one turn, across all corporations.
    pub max_buy_per_turn: u32,
    /// Sent with StartGame when set.
    pub player_timeout: Option<u32>,
}

impl Default for ControllerRules {
    fn default() -> Self {
        Self {
            max_buy_per_turn: 3,
            player_timeout: None,
        }
    }
}

/// Phase-specific choices handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseData {
    Lobby {
        is_manager: bool,
        players: Vec<String>,
    },
    Waiting,
    PlayTile {
        playable: Vec<String>,
    },
    FoundCorp {
        eligible: Vec<CorporationId>,
    },
    BuyStock {
        biddable: Vec<CorporationId>,
        max: u32,
    },
    SellTrade {
        tradeable: Vec<CorporationId>,
    },
    UntieMerge {
        tied: Vec<CorporationId>,
    },
    EndGame,
    Spectating {
        /// The phase another player is acting in, when known.
        observed: Option<Phase>,
    },
}

/// What applying one server message produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// State or phase changed; the frame should be rendered.
    Changed,
    /// Server-reported error to surface verbatim. Phase is untouched.
    ServerError { code: Option<String>, text: String },
    /// The server took this client out of the room; the session is now frozen.
    Removed { reason: OutReason },
    /// The session is frozen; the message was ignored.
    Ignored,
}

/// Everything a renderer needs for one completed transition.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub phase: Phase,
    pub data: PhaseData,
    pub enabled: bool,
    pub board: &'a Board,
    pub corporations: &'a Corporations,
    pub player: &'a PlayerState,
    pub last_round: bool,
}

#[derive(Debug)]
pub struct PhaseController {
    rules: ControllerRules,
    phase: Phase,
    board: Board,
    corporations: Corporations,
    player: PlayerState,
    role: Role,
    players: Vec<String>,
    /// Last directive received; drives the phase data.
    directive: Option<Directive>,
    /// Phase another player is acting in, from directives received while disabled.
    observed: Option<Phase>,
    in_flight: bool,
    frozen: bool,
}

impl PhaseController {
    pub fn new(rules: ControllerRules) -> Self {
        Self {
            rules,
            phase: Phase::Lobby,
            board: Board::new(),
            corporations: Corporations::new(),
            player: PlayerState::new(),
            role: Role::Player,
            players: Vec::new(),
            directive: None,
            observed: None,
            in_flight: false,
            frozen: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn corporations(&self) -> &Corporations {
        &self.corporations
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn rules(&self) -> ControllerRules {
        self.rules
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn action_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Apply one decoded server message.
    ///
    /// On `Err` the message was dropped whole: phase and stores are unchanged.
    pub fn apply(&mut self, msg: ServerMessage) -> Result<Applied, StateError> {
        if self.frozen {
            return Ok(Applied::Ignored);
        }
        // Any server message acknowledges the action in flight.
        self.in_flight = false;

        match msg {
            ServerMessage::Error { code, text } => Ok(Applied::ServerError { code, text }),
            ServerMessage::Control { role } => {
                debug!(?role, "Control role received");
                self.role = role;
                Ok(Applied::Changed)
            }
            ServerMessage::Roster { players } => {
                debug!(count = players.len(), "Roster updated");
                self.players = players;
                Ok(Applied::Changed)
            }
            ServerMessage::Update(update) => self.apply_update(update),
            ServerMessage::Directive(directive) => self.apply_update(StateUpdate {
                directive: Some(directive),
                ..StateUpdate::default()
            }),
            ServerMessage::ClientOut { reason } => {
                info!(phase = %self.phase, reason = reason.as_str(), "Removed from the room");
                self.freeze();
                Ok(Applied::Removed { reason })
            }
        }
    }

    /// Freeze the session after the connection closed.
    ///
    /// Returns `true` only the first time.
    pub fn freeze(&mut self) -> bool {
        if self.frozen {
            return false;
        }
        self.frozen = true;
        self.in_flight = false;
        self.player.set_enabled(false);
        true
    }

    /// Whether the player may act. A spectator stays disabled until a
    /// directive brings them back into the game.
    pub fn input_enabled(&self) -> bool {
        self.player.enabled() && !self.frozen && self.phase != Phase::Spectating
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            phase: self.phase,
            data: self.phase_data(),
            enabled: self.input_enabled(),
            board: &self.board,
            corporations: &self.corporations,
            player: &self.player,
            last_round: self.player.last_round(),
        }
    }
}
