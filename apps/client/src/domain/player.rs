//! Player state store: the local hand, wallet, rivals and enabled flag.
//!
//! Every field is replaced wholesale. Callers pass `None` upstream to mean
//! "unchanged"; an empty collection here really is empty.

use std::collections::BTreeMap;

use crate::domain::corporations::CorporationId;
use crate::errors::domain::StateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandTile {
    pub coords: String,
    /// Whether the server allows this tile to be played right now.
    pub playable: bool,
}

impl HandTile {
    pub fn new(coords: impl Into<String>, playable: bool) -> Self {
        Self {
            coords: coords.into(),
            playable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    pub cash: u32,
    pub shares: BTreeMap<CorporationId, u32>,
}

impl Wallet {
    pub fn shares_in(&self, id: &CorporationId) -> u32 {
        self.shares.get(id).copied().unwrap_or(0)
    }
}

/// Public standing of another player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rival {
    pub name: String,
    pub wallet: Wallet,
}

/// Shareholdings as received: keyed by corporation, or counts in roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Holdings {
    Named(BTreeMap<CorporationId, u32>),
    Positional(Vec<u32>),
}

impl Default for Holdings {
    fn default() -> Self {
        Holdings::Named(BTreeMap::new())
    }
}

impl Holdings {
    /// Key the counts by corporation. A positional list may run past the
    /// known roster only with zero counts.
    pub fn resolve(
        &self,
        order: &[CorporationId],
    ) -> Result<BTreeMap<CorporationId, u32>, StateError> {
        match self {
            Holdings::Named(shares) => Ok(shares.clone()),
            Holdings::Positional(counts) => {
                if let Some(idx) = counts.iter().skip(order.len()).position(|n| *n > 0) {
                    return Err(StateError::illegal(format!(
                        "shares held at roster index {} but only {} corporations known",
                        order.len() + idx,
                        order.len()
                    )));
                }
                Ok(order.iter().cloned().zip(counts.iter().copied()).collect())
            }
        }
    }
}

/// Wallet as received, before holdings are keyed by corporation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletUpdate {
    pub cash: u32,
    pub holdings: Holdings,
}

impl WalletUpdate {
    pub fn resolve(&self, order: &[CorporationId]) -> Result<Wallet, StateError> {
        Ok(Wallet {
            cash: self.cash,
            shares: self.holdings.resolve(order)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RivalUpdate {
    pub name: String,
    pub wallet: WalletUpdate,
}

impl RivalUpdate {
    pub fn resolve(&self, order: &[CorporationId]) -> Result<Rival, StateError> {
        Ok(Rival {
            name: self.name.clone(),
            wallet: self.wallet.resolve(order)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    hand: Vec<HandTile>,
    wallet: Wallet,
    rivals: Vec<Rival>,
    enabled: bool,
    last_round: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            hand: Vec::new(),
            wallet: Wallet::default(),
            rivals: Vec::new(),
            enabled: true,
            last_round: false,
        }
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_hand(&mut self, tiles: Vec<HandTile>) {
        self.hand = tiles;
    }

    pub fn replace_wallet(&mut self, wallet: Wallet) {
        self.wallet = wallet;
    }

    pub fn replace_rivals(&mut self, rivals: Vec<Rival>) {
        self.rivals = rivals;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_last_round(&mut self, last_round: bool) {
        self.last_round = last_round;
    }

    pub fn hand(&self) -> &[HandTile] {
        &self.hand
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn rivals(&self) -> &[Rival] {
        &self.rivals
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_round(&self) -> bool {
        self.last_round
    }

    /// Coordinates of the tiles the server marked playable, in hand order.
    pub fn playable_tiles(&self) -> Vec<String> {
        self.hand
            .iter()
            .filter(|t| t.playable)
            .map(|t| t.coords.clone())
            .collect()
    }
}
