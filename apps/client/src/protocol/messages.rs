use std::fmt;

use crate::domain::board::CellPatch;
use crate::domain::corporations::CorporationPatch;
use crate::domain::phase::Directive;
use crate::domain::player::{HandTile, RivalUpdate, WalletUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Room creator; may start the game and manage the room.
    Manager,
    Player,
}

/// Partial state update. `None` means the field was absent: leave it unchanged.
///
/// Board owners and shareholdings may refer to corporations by roster index;
/// the phase controller resolves them against the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub board: Option<CellPatch>,
    pub corporations: Option<Vec<CorporationPatch>>,
    pub hand: Option<Vec<HandTile>>,
    pub wallet: Option<WalletUpdate>,
    pub rivals: Option<Vec<RivalUpdate>>,
    pub enabled: Option<bool>,
    pub last_round: Option<bool>,
    pub directive: Option<Directive>,
}

/// Why the server took this client out of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutReason {
    Kicked,
    PlayerTimedOut,
    RoomTimedOut,
    RoomTerminated,
    NoClients,
    Quit,
    Other(String),
}

impl OutReason {
    pub fn from_wire(code: &str) -> Self {
        match code {
            "kck" => OutReason::Kicked,
            "ptm" => OutReason::PlayerTimedOut,
            "tim" => OutReason::RoomTimedOut,
            "ter" => OutReason::RoomTerminated,
            "ncl" => OutReason::NoClients,
            "qui" => OutReason::Quit,
            other => OutReason::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OutReason::Kicked => "kck",
            OutReason::PlayerTimedOut => "ptm",
            OutReason::RoomTimedOut => "tim",
            OutReason::RoomTerminated => "ter",
            OutReason::NoClients => "ncl",
            OutReason::Quit => "qui",
            OutReason::Other(code) => code,
        }
    }
}

impl fmt::Display for OutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutReason::Kicked => f.write_str("kicked by the room manager"),
            OutReason::PlayerTimedOut => f.write_str("turn timed out"),
            OutReason::RoomTimedOut => f.write_str("room closed after inactivity"),
            OutReason::RoomTerminated => f.write_str("room terminated by its manager"),
            OutReason::NoClients => f.write_str("room closed with no players left"),
            OutReason::Quit => f.write_str("left the room"),
            OutReason::Other(code) => write!(f, "removed from the room ({code})"),
        }
    }
}

/// Every message the server may send, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Server-reported error, shown verbatim. Never changes phase.
    Error { code: Option<String>, text: String },
    Control { role: Role },
    Roster { players: Vec<String> },
    Update(StateUpdate),
    /// A directive with no accompanying state.
    Directive(Directive),
    /// This client is no longer in the room; the session ends.
    ClientOut { reason: OutReason },
}

impl ServerMessage {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ServerMessage::Error { .. } => "err",
            ServerMessage::Control { .. } => "ctl",
            ServerMessage::Roster { .. } => "add",
            ServerMessage::Update(_) => "upd",
            ServerMessage::Directive(_) => "upd(sta)",
            ServerMessage::ClientOut { .. } => "out",
        }
    }
}
