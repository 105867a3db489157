//! Console command parsing.
//!
//! ```text
//! start                      start the game (room manager only)
//! play 5A                    play a tile
//! found tower                found a corporation
//! buy tower=2 luxor=1        buy shares (no orders buys nothing)
//! sell tower=1/2 luxor=3     sell 1 and trade 2 tower shares, sell 3 luxor
//! untie tower                choose the surviving corporation
//! end                        claim the end of the game
//! bot chaotic                add a bot (room manager only)
//! kick bob | kick 2          kick a player by name or position (room manager only)
//! leave                      leave the room
//! help | quit
//! ```
//!
//! Counts stay raw text; the phase controller coerces and validates them.

use thiserror::Error;

use crate::domain::action::PlayerIntent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(PlayerIntent),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'; type 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Order '{0}' must look like corporation=count")]
    BadOrder(String),
}

pub const HELP: &str = "commands: start | play <tile> | found <corp> | buy <corp>=<n>... | \
sell <corp>=<sell>[/<trade>]... | untie <corp> | end | bot <level> | kick <player> | leave | \
help | quit";

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "start" => Command::Intent(PlayerIntent::StartGame),
        "play" => Command::Intent(PlayerIntent::PlayTile {
            tile: single(&rest, "play")?,
        }),
        "found" => Command::Intent(PlayerIntent::FoundCorporation {
            corporation: single(&rest, "found")?,
        }),
        "untie" => Command::Intent(PlayerIntent::UntieMerge {
            corporation: single(&rest, "untie")?,
        }),
        "buy" => Command::Intent(PlayerIntent::BuyStock {
            orders: rest
                .iter()
                .map(|order| split_order(order))
                .collect::<Result<_, _>>()?,
        }),
        "sell" => {
            let mut orders = Vec::with_capacity(rest.len());
            for order in &rest {
                let (corporation, counts) = split_order(order)?;
                let (sell, trade) = counts.split_once('/').unwrap_or((counts.as_str(), ""));
                orders.push((corporation, sell.to_string(), trade.to_string()));
            }
            Command::Intent(PlayerIntent::SellTrade { orders })
        }
        "end" => Command::Intent(PlayerIntent::ClaimEnd),
        "bot" => Command::Intent(PlayerIntent::AddBot {
            level: single(&rest, "bot")?,
        }),
        "kick" => Command::Intent(PlayerIntent::KickPlayer {
            player: single(&rest, "kick")?,
        }),
        "leave" => Command::Intent(PlayerIntent::Quit),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn single(rest: &[&str], command: &'static str) -> Result<String, CommandError> {
    rest.first()
        .map(|s| s.to_string())
        .ok_or(CommandError::MissingArgument(command))
}

fn split_order(order: &str) -> Result<(String, String), CommandError> {
    match order.split_once('=') {
        Some((corporation, count)) if !corporation.is_empty() => {
            Ok((corporation.to_string(), count.to_string()))
        }
        _ => Err(CommandError::BadOrder(order.to_string())),
    }
}
