use std::fmt;

use crate::domain::corporations::CorporationId;

/// Session phases of the client state machine. Exactly one is active.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Connected, game not started yet.
    Lobby,
    /// Game started; waiting for this player's first directive.
    WaitingForOpponents,
    PlayTile,
    FoundCorp,
    BuyStock,
    SellTrade,
    UntieMerge,
    /// Terminal. Final standings may still be rendered.
    EndGame,
    /// Player disabled while the game continues.
    Spectating,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Lobby => "Lobby",
            Phase::WaitingForOpponents => "WaitingForOpponents",
            Phase::PlayTile => "PlayTile",
            Phase::FoundCorp => "FoundCorp",
            Phase::BuyStock => "BuyStock",
            Phase::SellTrade => "SellTrade",
            Phase::UntieMerge => "UntieMerge",
            Phase::EndGame => "EndGame",
            Phase::Spectating => "Spectating",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server instruction naming the phase to act in, with its choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Play one of the playable tiles of the hand.
    PlayTile,
    /// Found one of the listed inactive corporations.
    FoundCorp { inactive: Vec<CorporationId> },
    /// Buy stock in the listed active corporations.
    BuyStock { active: Vec<CorporationId> },
    /// Sell or trade stock of the listed merged corporations.
    SellTrade { tradeable: Vec<CorporationId> },
    /// Choose the surviving corporation among the tied ones.
    UntieMerge { tied: Vec<CorporationId> },
    EndGame,
    /// A phase name this client does not know.
    Unknown { name: String },
}

impl Directive {
    /// The phase this directive names, `None` when unknown.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Directive::PlayTile => Some(Phase::PlayTile),
            Directive::FoundCorp { .. } => Some(Phase::FoundCorp),
            Directive::BuyStock { .. } => Some(Phase::BuyStock),
            Directive::SellTrade { .. } => Some(Phase::SellTrade),
            Directive::UntieMerge { .. } => Some(Phase::UntieMerge),
            Directive::EndGame => Some(Phase::EndGame),
            Directive::Unknown { .. } => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Directive::Unknown { name } => name,
            other => other.phase().map(|p| p.as_str()).unwrap_or_default(),
        }
    }
}
