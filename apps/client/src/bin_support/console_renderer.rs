use std::io::Write;

use tracing::warn;

use crate::domain::board::Occupancy;
use crate::domain::corporations::CorporationId;
use crate::errors::domain::ActionError;
use crate::protocol::messages::OutReason;
use crate::services::phase_controller::{PhaseData, RenderFrame};
use crate::session::Renderer;

/// Plain-text renderer for the console binary.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            warn!(error = %err, "Console write failed");
        }
    }
}

fn names(ids: &[CorporationId]) -> String {
    if ids.is_empty() {
        return "(none)".to_string();
    }
    ids.iter()
        .map(CorporationId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn prompt(data: &PhaseData) -> String {
    match data {
        PhaseData::Lobby {
            is_manager,
            players,
        } => {
            let mut text = format!("{} player(s) in the room", players.len());
            if *is_manager {
                text.push_str("; 'start' to begin, 'bot <level>' or 'kick <player>'");
            }
            text
        }
        PhaseData::Waiting => "waiting for the other players".to_string(),
        PhaseData::PlayTile { playable } => {
            format!("play a tile: {} (or 'end')", playable.join(", "))
        }
        PhaseData::FoundCorp { eligible } => format!("found one of: {}", names(eligible)),
        PhaseData::BuyStock { biddable, max } => {
            format!("buy up to {max} shares of: {} (or 'end')", names(biddable))
        }
        PhaseData::SellTrade { tradeable } => {
            format!("sell or trade shares of: {}", names(tradeable))
        }
        PhaseData::UntieMerge { tied } => format!("choose the survivor among: {}", names(tied)),
        PhaseData::EndGame => "game over".to_string(),
        PhaseData::Spectating { observed } => match observed {
            Some(phase) => format!("watching: another player is in {phase}"),
            None => "watching".to_string(),
        },
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        let placed = frame
            .board
            .cells()
            .filter(|(_, occ)| **occ != Occupancy::Empty)
            .count();
        let wallet = frame.player.wallet();
        self.line(&format!(
            "== {} == cash {} | {} tile(s) placed{}",
            frame.phase,
            wallet.cash,
            placed,
            if frame.last_round { " | last round" } else { "" }
        ));
        for corp in frame.corporations.iter().filter(|c| c.founded()) {
            self.line(&format!(
                "   {:<12} size {:>2}  price {:>5}  held {}",
                corp.id.as_str(),
                corp.size,
                corp.price,
                wallet.shares_in(&corp.id)
            ));
        }
        if frame.enabled {
            let text = prompt(&frame.data);
            self.line(&text);
        } else {
            self.line("(input disabled)");
        }
    }

    fn action_rejected(&mut self, error: &ActionError) {
        self.line(&format!("rejected [{}]: {error}", error.code()));
    }

    fn server_error(&mut self, code: Option<&str>, text: &str) {
        match code {
            Some(code) => self.line(&format!("server error [{code}]: {text}")),
            None => self.line(&format!("server error: {text}")),
        }
    }

    fn session_ended(&mut self, reason: &OutReason) {
        self.line(&format!("session over: {reason}"));
    }
}
