use std::collections::BTreeMap;

use tracing::debug;

use super::{PhaseController, PhaseData};
use crate::domain::action::{coerce_count, ActionKind, ClientAction, PlayerIntent, SellTradeOrder};
use crate::domain::corporations::CorporationId;
use crate::domain::phase::Phase;
use crate::errors::domain::ActionError;
use crate::protocol::messages::Role;

/// Action kinds accepted while in `phase`. Leaving the room is accepted in
/// every phase.
pub fn accepted_kinds(phase: Phase) -> &'static [ActionKind] {
    match phase {
        Phase::Lobby => &[
            ActionKind::StartGame,
            ActionKind::AddBot,
            ActionKind::KickPlayer,
            ActionKind::Quit,
        ],
        Phase::PlayTile => &[ActionKind::PlayTile, ActionKind::ClaimEnd, ActionKind::Quit],
        Phase::FoundCorp => &[ActionKind::FoundCorporation, ActionKind::Quit],
        Phase::BuyStock => &[ActionKind::BuyStock, ActionKind::ClaimEnd, ActionKind::Quit],
        Phase::SellTrade => &[ActionKind::SellTrade, ActionKind::Quit],
        Phase::UntieMerge => &[ActionKind::UntieMerge, ActionKind::Quit],
        Phase::WaitingForOpponents | Phase::EndGame | Phase::Spectating => &[ActionKind::Quit],
    }
}

fn pick(raw: &str, choices: &[CorporationId]) -> Result<CorporationId, ActionError> {
    let id = CorporationId::new(raw);
    if choices.contains(&id) {
        Ok(id)
    } else {
        Err(ActionError::invalid_input(format!(
            "corporation '{}' is not among the available choices",
            raw.trim()
        )))
    }
}

fn kick_target(raw: &str, players: &[String]) -> Result<u32, ActionError> {
    let raw = raw.trim();
    let idx = match raw.parse::<usize>() {
        Ok(idx) if idx < players.len() => idx,
        Ok(idx) => {
            return Err(ActionError::invalid_input(format!(
                "no player at position {idx}; {} in the room",
                players.len()
            )))
        }
        Err(_) => players.iter().position(|p| p == raw).ok_or_else(|| {
            ActionError::invalid_input(format!("no player named '{raw}' in the room"))
        })?,
    };
    u32::try_from(idx)
        .map_err(|_| ActionError::invalid_input(format!("player position {idx} is out of range")))
}

impl PhaseController {
    fn require_manager(&self, what: &str) -> Result<(), ActionError> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(ActionError::invalid_input(format!(
                "only the room manager can {what}"
            )))
        }
    }

    /// Validate `intent` against the current phase and build the action to send.
    ///
    /// On success the action is marked in flight until the next server message.
    pub fn build_action(&mut self, intent: PlayerIntent) -> Result<ClientAction, ActionError> {
        if self.frozen {
            return Err(ActionError::SessionFrozen);
        }
        let kind = intent.kind();
        if !accepted_kinds(self.phase).contains(&kind) {
            return Err(ActionError::PhaseMismatch {
                phase: self.phase,
                kind,
            });
        }
        if self.in_flight {
            return Err(ActionError::ActionInFlight);
        }

        let action = self.validate(intent)?;
        self.in_flight = true;
        debug!(phase = %self.phase, %kind, "Action built");
        Ok(action)
    }

    fn validate(&self, intent: PlayerIntent) -> Result<ClientAction, ActionError> {
        let data = self.phase_data();
        match (intent, data) {
            (PlayerIntent::StartGame, PhaseData::Lobby { .. }) => {
                self.require_manager("start the game")?;
                Ok(ClientAction::StartGame {
                    player_timeout: self.rules.player_timeout,
                })
            }
            (PlayerIntent::AddBot { level }, PhaseData::Lobby { .. }) => {
                self.require_manager("add bots")?;
                let level = level.trim();
                if level.is_empty() {
                    return Err(ActionError::invalid_input("bot level is required"));
                }
                Ok(ClientAction::AddBot {
                    level: level.to_string(),
                })
            }
            (PlayerIntent::KickPlayer { player }, PhaseData::Lobby { players, .. }) => {
                self.require_manager("kick players")?;
                Ok(ClientAction::KickPlayer {
                    player: kick_target(&player, &players)?,
                })
            }
            // The server never lets the manager leave a room it still owns.
            (PlayerIntent::Quit, _) => {
                if self.role == Role::Manager {
                    return Err(ActionError::invalid_input(
                        "the room manager cannot leave the room",
                    ));
                }
                Ok(ClientAction::Quit)
            }
            (PlayerIntent::PlayTile { tile }, PhaseData::PlayTile { playable }) => {
                let tile = tile.trim().to_uppercase();
                if playable.contains(&tile) {
                    Ok(ClientAction::PlayTile { tile })
                } else {
                    Err(ActionError::invalid_input(format!(
                        "tile '{tile}' is not a playable tile in hand"
                    )))
                }
            }
            (PlayerIntent::FoundCorporation { corporation }, PhaseData::FoundCorp { eligible }) => {
                Ok(ClientAction::FoundCorporation {
                    corporation: pick(&corporation, &eligible)?,
                })
            }
            (PlayerIntent::BuyStock { orders }, PhaseData::BuyStock { biddable, max }) => {
                let mut built: BTreeMap<CorporationId, u32> = BTreeMap::new();
                for (corporation, count) in orders {
                    let id = pick(&corporation, &biddable)?;
                    let count = coerce_count(&count)?;
                    if count > 0 {
                        let slot = built.entry(id).or_default();
                        *slot = slot.saturating_add(count);
                    }
                }
                let total = built.values().fold(0u32, |acc, n| acc.saturating_add(*n));
                if total > max {
                    return Err(ActionError::invalid_input(format!(
                        "cannot buy {total} shares; at most {max} per turn"
                    )));
                }
                Ok(ClientAction::BuyStock { orders: built })
            }
            (PlayerIntent::SellTrade { orders }, PhaseData::SellTrade { tradeable }) => {
                let mut built: BTreeMap<CorporationId, SellTradeOrder> = BTreeMap::new();
                for (corporation, sell, trade) in orders {
                    let id = pick(&corporation, &tradeable)?;
                    let order = built.entry(id).or_default();
                    order.sell = order.sell.saturating_add(coerce_count(&sell)?);
                    order.trade = order.trade.saturating_add(coerce_count(&trade)?);
                }
                for (id, order) in &built {
                    let held = self.player.wallet().shares_in(id);
                    let disposed = order.sell.saturating_add(order.trade);
                    if disposed > held {
                        return Err(ActionError::invalid_input(format!(
                            "cannot dispose of {disposed} {id} shares; holding {held}"
                        )));
                    }
                }
                built.retain(|_, o| o.sell > 0 || o.trade > 0);
                Ok(ClientAction::SellTrade { orders: built })
            }
            (PlayerIntent::UntieMerge { corporation }, PhaseData::UntieMerge { tied }) => {
                Ok(ClientAction::UntieMerge {
                    corporation: pick(&corporation, &tied)?,
                })
            }
            (PlayerIntent::ClaimEnd, _) => Ok(ClientAction::ClaimEnd),
            (intent, _) => Err(ActionError::PhaseMismatch {
                phase: self.phase,
                kind: intent.kind(),
            }),
        }
    }
}
