//! Domain layer: board and player stores, phases, directives and actions.

pub mod action;
pub mod board;
pub mod corporations;
pub mod phase;
pub mod player;

#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
mod tests_board;

// Re-exports for ergonomics
pub use action::{coerce_count, ActionKind, ClientAction, PlayerIntent, SellTradeOrder};
pub use board::{Board, BoardPatch, CellPatch, CellUpdate, Occupancy};
pub use corporations::{
    CorporationId, CorporationPatch, CorporationRef, CorporationStatus, Corporations,
};
pub use phase::{Directive, Phase};
pub use player::{HandTile, Holdings, PlayerState, Rival, RivalUpdate, Wallet, WalletUpdate};
