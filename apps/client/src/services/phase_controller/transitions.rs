use tracing::{debug, info};

use super::{Applied, PhaseController, PhaseData};
use crate::domain::board::resolve_cells;
use crate::domain::corporations::CorporationId;
use crate::domain::phase::{Directive, Phase};
use crate::errors::domain::StateError;
use crate::protocol::messages::{Role, StateUpdate};

impl PhaseController {
    /// Apply an update atomically, in the fixed order
    /// board -> corporations -> wallet/hand/rivals -> enabled -> directive.
    pub(super) fn apply_update(&mut self, update: StateUpdate) -> Result<Applied, StateError> {
        // Resolve and validate everything that can fail before mutating anything.
        // Roster indices refer to the order once this update's `cor` is applied.
        let order = self
            .corporations
            .order_with(update.corporations.as_deref().unwrap_or_default());
        let board = update
            .board
            .as_ref()
            .map(|cells| resolve_cells(cells, &order))
            .transpose()?;
        if let Some(patch) = &board {
            self.board.validate_patch(patch)?;
        }
        let wallet = update
            .wallet
            .as_ref()
            .map(|w| w.resolve(&order))
            .transpose()?;
        let rivals = update
            .rivals
            .as_ref()
            .map(|list| {
                list.iter()
                    .map(|r| r.resolve(&order))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        if let Some(directive) = &update.directive {
            if directive.phase().is_none() {
                return Err(StateError::illegal(format!(
                    "directive names unknown phase '{}'",
                    directive.name()
                )));
            }
        }

        if let Some(patch) = &board {
            self.board.apply_patch(patch)?;
        }
        if let Some(patches) = &update.corporations {
            self.corporations.apply(patches);
        }
        if let Some(hand) = update.hand {
            self.player.replace_hand(hand);
        }
        if let Some(wallet) = wallet {
            self.player.replace_wallet(wallet);
        }
        if let Some(rivals) = rivals {
            self.player.replace_rivals(rivals);
        }
        if let Some(last_round) = update.last_round {
            self.player.set_last_round(last_round);
        }

        // A directive without an explicit flag enables by implication.
        let enabled = update
            .enabled
            .unwrap_or(update.directive.is_some() || self.player.enabled());
        self.player.set_enabled(enabled);

        let next = self.next_phase(update.directive.as_ref(), enabled);
        match update.directive.as_ref().and_then(Directive::phase) {
            Some(phase) if !enabled => self.observed = Some(phase),
            Some(_) => self.observed = None,
            // Disabled without a directive: nobody is known to be acting yet.
            None if next == Phase::Spectating && self.phase != Phase::Spectating => {
                self.observed = None;
            }
            None => {}
        }
        if let Some(directive) = update.directive {
            self.directive = Some(directive);
        }
        if next != self.phase {
            info!(from = %self.phase, to = %next, enabled, "Phase transition");
            self.phase = next;
        } else {
            debug!(phase = %self.phase, enabled, "State refreshed");
        }
        Ok(Applied::Changed)
    }

    fn next_phase(&self, directive: Option<&Directive>, enabled: bool) -> Phase {
        if self.phase == Phase::EndGame {
            return Phase::EndGame;
        }
        let not_started = matches!(self.phase, Phase::Lobby | Phase::WaitingForOpponents);

        match directive.and_then(Directive::phase) {
            Some(Phase::EndGame) => Phase::EndGame,
            Some(target) if enabled => target,
            _ if !enabled && not_started => Phase::WaitingForOpponents,
            _ if !enabled => Phase::Spectating,
            _ if self.phase == Phase::Lobby => Phase::WaitingForOpponents,
            _ => self.phase,
        }
    }

    /// The corporation choices offered by the current directive.
    fn directive_choices(&self) -> &[CorporationId] {
        match &self.directive {
            Some(Directive::FoundCorp { inactive }) => inactive,
            Some(Directive::BuyStock { active }) => active,
            Some(Directive::SellTrade { tradeable }) => tradeable,
            Some(Directive::UntieMerge { tied }) => tied,
            _ => &[],
        }
    }

    pub(super) fn phase_data(&self) -> PhaseData {
        let choices = self.directive_choices();
        match self.phase {
            Phase::Lobby => PhaseData::Lobby {
                is_manager: self.role == Role::Manager,
                players: self.players.clone(),
            },
            Phase::WaitingForOpponents => PhaseData::Waiting,
            Phase::PlayTile => PhaseData::PlayTile {
                playable: self.player.playable_tiles(),
            },
            // Only corporations not on the board can be founded.
            Phase::FoundCorp => PhaseData::FoundCorp {
                eligible: choices
                    .iter()
                    .filter(|id| self.corporations.get(id).map_or(true, |c| !c.founded()))
                    .cloned()
                    .collect(),
            },
            Phase::BuyStock => PhaseData::BuyStock {
                biddable: choices.to_vec(),
                max: self.rules.max_buy_per_turn,
            },
            // Only corporations the player holds shares in can be sold or traded.
            Phase::SellTrade => PhaseData::SellTrade {
                tradeable: choices
                    .iter()
                    .filter(|id| self.player.wallet().shares_in(id) > 0)
                    .cloned()
                    .collect(),
            },
            Phase::UntieMerge => PhaseData::UntieMerge {
                tied: choices.to_vec(),
            },
            Phase::EndGame => PhaseData::EndGame,
            Phase::Spectating => PhaseData::Spectating {
                observed: self.observed,
            },
        }
    }
}
