//! Player intents (raw UI input) and the validated actions built from them.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::corporations::CorporationId;
use crate::errors::domain::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    StartGame,
    PlayTile,
    FoundCorporation,
    BuyStock,
    SellTrade,
    UntieMerge,
    ClaimEnd,
    AddBot,
    KickPlayer,
    Quit,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::StartGame => "StartGame",
            ActionKind::PlayTile => "PlayTile",
            ActionKind::FoundCorporation => "FoundCorporation",
            ActionKind::BuyStock => "BuyStock",
            ActionKind::SellTrade => "SellTrade",
            ActionKind::UntieMerge => "UntieMerge",
            ActionKind::ClaimEnd => "ClaimEnd",
            ActionKind::AddBot => "AddBot",
            ActionKind::KickPlayer => "KickPlayer",
            ActionKind::Quit => "Quit",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SellTradeOrder {
    pub sell: u32,
    /// Shares handed in for the surviving corporation's stock.
    pub trade: u32,
}

/// A validated action, ready to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    StartGame { player_timeout: Option<u32> },
    PlayTile { tile: String },
    FoundCorporation { corporation: CorporationId },
    BuyStock { orders: BTreeMap<CorporationId, u32> },
    SellTrade { orders: BTreeMap<CorporationId, SellTradeOrder> },
    UntieMerge { corporation: CorporationId },
    ClaimEnd,
    AddBot { level: String },
    /// `player` is the position in the room's player list.
    KickPlayer { player: u32 },
    Quit,
}

impl ClientAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ClientAction::StartGame { .. } => ActionKind::StartGame,
            ClientAction::PlayTile { .. } => ActionKind::PlayTile,
            ClientAction::FoundCorporation { .. } => ActionKind::FoundCorporation,
            ClientAction::BuyStock { .. } => ActionKind::BuyStock,
            ClientAction::SellTrade { .. } => ActionKind::SellTrade,
            ClientAction::UntieMerge { .. } => ActionKind::UntieMerge,
            ClientAction::ClaimEnd => ActionKind::ClaimEnd,
            ClientAction::AddBot { .. } => ActionKind::AddBot,
            ClientAction::KickPlayer { .. } => ActionKind::KickPlayer,
            ClientAction::Quit => ActionKind::Quit,
        }
    }
}

/// Raw user input. Counts are kept as typed text until validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIntent {
    StartGame,
    PlayTile {
        tile: String,
    },
    FoundCorporation {
        corporation: String,
    },
    /// `(corporation, count)` pairs.
    BuyStock {
        orders: Vec<(String, String)>,
    },
    /// `(corporation, sell, trade)` triples.
    SellTrade {
        orders: Vec<(String, String, String)>,
    },
    UntieMerge {
        corporation: String,
    },
    ClaimEnd,
    AddBot {
        level: String,
    },
    /// A player name from the room, or its position in the player list.
    KickPlayer {
        player: String,
    },
    Quit,
}

impl PlayerIntent {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerIntent::StartGame => ActionKind::StartGame,
            PlayerIntent::PlayTile { .. } => ActionKind::PlayTile,
            PlayerIntent::FoundCorporation { .. } => ActionKind::FoundCorporation,
            PlayerIntent::BuyStock { .. } => ActionKind::BuyStock,
            PlayerIntent::SellTrade { .. } => ActionKind::SellTrade,
            PlayerIntent::UntieMerge { .. } => ActionKind::UntieMerge,
            PlayerIntent::ClaimEnd => ActionKind::ClaimEnd,
            PlayerIntent::AddBot { .. } => ActionKind::AddBot,
            PlayerIntent::KickPlayer { .. } => ActionKind::KickPlayer,
            PlayerIntent::Quit => ActionKind::Quit,
        }
    }
}

/// Coerce a typed share count to a non-negative integer.
///
/// Blank input counts as 0 and decimals are truncated toward zero. Anything
/// non-numeric, non-finite or negative is rejected.
pub fn coerce_count(raw: &str) -> Result<u32, ActionError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = text.parse::<i64>() {
        return u32::try_from(n)
            .map_err(|_| ActionError::invalid_input(format!("count '{text}' is out of range")));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n < f64::from(u32::MAX) => Ok(n.trunc() as u32),
        Ok(_) => Err(ActionError::invalid_input(format!(
            "count '{text}' is out of range"
        ))),
        Err(_) => Err(ActionError::invalid_input(format!(
            "count '{text}' is not a number"
        ))),
    }
}
