// Builders for server wire messages.

use serde_json::{json, Value};

pub fn upd(par: Value) -> String {
    json!({"typ": "upd", "par": par}).to_string()
}

pub fn err(text: &str) -> String {
    json!({"typ": "err", "par": {"cnt": text}}).to_string()
}

pub fn ctl(role: &str) -> String {
    json!({"typ": "ctl", "par": {"rol": role}}).to_string()
}

pub fn out(reason: &str) -> String {
    json!({"typ": "out", "par": {"rea": reason}}).to_string()
}

pub fn roster(players: &[&str]) -> String {
    json!({"typ": "add", "par": {"val": players}}).to_string()
}

/// An enabled PlayTile directive with the given `(coords, playable)` hand.
pub fn play_tile_turn(hand: &[(&str, bool)]) -> String {
    let hnd: Vec<Value> = hand
        .iter()
        .map(|(coo, pyb)| json!({"coo": coo, "pyb": pyb}))
        .collect();
    upd(json!({"hnd": hnd, "ebl": true, "sta": "PlayTile"}))
}
