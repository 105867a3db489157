//! Message codec: `decode(text) -> ServerMessage`, `encode(ClientAction) -> text`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::domain::action::{ClientAction, SellTradeOrder};
use crate::domain::board::{CellPatch, CellUpdate};
use crate::domain::corporations::{CorporationId, CorporationPatch, CorporationRef};
use crate::domain::phase::Directive;
use crate::domain::player::{HandTile, Holdings, RivalUpdate, WalletUpdate};
use crate::errors::protocol::DecodeError;
use crate::protocol::messages::{OutReason, Role, ServerMessage, StateUpdate};
use crate::protocol::wire::{
    AddPar, BotPar, BuyPar, CellWire, CorNamePar, CtlPar, ErrPar, IniPar, KckPar, OutPar,
    OwnWire, PlyPar, SelPar, UpdPar,
};
use crate::protocol::{LEGACY_PARAMS_KEY, PARAMS_KEY};

/// Split raw text into its `typ` tag and `par` object.
fn envelope(text: &str) -> Result<(String, Option<Value>), DecodeError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DecodeError::malformed(format!("not JSON: {e}")))?;
    let Value::Object(mut obj) = value else {
        return Err(DecodeError::malformed("envelope is not an object"));
    };
    if obj.contains_key(LEGACY_PARAMS_KEY) {
        return Err(DecodeError::VersionMismatch {
            key: LEGACY_PARAMS_KEY,
        });
    }
    let typ = match obj.remove("typ") {
        Some(Value::String(typ)) => typ,
        Some(_) => return Err(DecodeError::malformed("'typ' is not a string")),
        None => return Err(DecodeError::malformed("missing 'typ'")),
    };
    Ok((typ, obj.remove(PARAMS_KEY)))
}

fn params<T: DeserializeOwned>(kind: &'static str, par: Option<Value>) -> Result<T, DecodeError> {
    match par {
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|e| DecodeError::invalid_payload(kind, e.to_string())),
        Some(_) => Err(DecodeError::invalid_payload(kind, "'par' is not an object")),
        None => Err(DecodeError::invalid_payload(kind, "missing 'par'")),
    }
}

/// Decode one inbound server message.
pub fn decode(text: &str) -> Result<ServerMessage, DecodeError> {
    let (typ, par) = envelope(text)?;
    match typ.as_str() {
        "err" => {
            let p: ErrPar = params("err", par)?;
            Ok(ServerMessage::Error {
                code: p.cod,
                text: p.cnt,
            })
        }
        "ctl" => {
            let p: CtlPar = params("ctl", par)?;
            let role = match p.rol.as_str() {
                "mng" => Role::Manager,
                "ply" => Role::Player,
                other => {
                    return Err(DecodeError::invalid_payload(
                        "ctl",
                        format!("unknown role '{other}'"),
                    ))
                }
            };
            Ok(ServerMessage::Control { role })
        }
        "add" => {
            let p: AddPar = params("add", par)?;
            Ok(ServerMessage::Roster { players: p.val })
        }
        "upd" => {
            let p: UpdPar = params("upd", par)?;
            decode_update(p)
        }
        "out" => {
            let p: OutPar = params("out", par)?;
            Ok(ServerMessage::ClientOut {
                reason: OutReason::from_wire(p.rea.trim()),
            })
        }
        other => Err(DecodeError::malformed(format!(
            "unknown message type '{other}'"
        ))),
    }
}

fn decode_update(p: UpdPar) -> Result<ServerMessage, DecodeError> {
    let directive_only = p.is_directive_only();
    let directive = match p.sta.as_deref() {
        Some(sta) => Some(decode_directive(sta, &p)?),
        None => None,
    };
    if directive_only {
        if let Some(directive) = directive {
            return Ok(ServerMessage::Directive(directive));
        }
    }

    let board = p.brd.map(decode_board).transpose()?;
    let corporations = p.cor.map(|list| {
        list.into_iter()
            .map(|c| CorporationPatch {
                id: CorporationId::new(&c.nam),
                size: c.siz,
                price: c.prc,
                majority_bonus: c.maj,
                minority_bonus: c.min,
                remaining_shares: c.rem,
                defunct: c.def,
            })
            .collect()
    });
    let hand = p.hnd.map(|tiles| {
        tiles
            .into_iter()
            .map(|t| HandTile::new(t.coo, t.pyb))
            .collect()
    });
    let wallet = p.ply.map(|w| WalletUpdate {
        cash: w.csh,
        holdings: holdings(w.own),
    });
    let rivals = p.riv.map(|list| {
        list.into_iter()
            .map(|r| RivalUpdate {
                name: r.nam,
                wallet: WalletUpdate {
                    cash: r.csh,
                    holdings: holdings(r.own),
                },
            })
            .collect()
    });

    Ok(ServerMessage::Update(StateUpdate {
        board,
        corporations,
        hand,
        wallet,
        rivals,
        enabled: p.ebl,
        last_round: p.lst,
        directive,
    }))
}

fn shares(own: BTreeMap<String, u32>) -> BTreeMap<CorporationId, u32> {
    own.into_iter()
        .map(|(name, count)| (CorporationId::new(&name), count))
        .collect()
}

fn holdings(own: OwnWire) -> Holdings {
    match own {
        OwnWire::ByName(map) => Holdings::Named(shares(map)),
        OwnWire::InOrder(counts) => Holdings::Positional(counts),
    }
}

fn decode_board(raw: BTreeMap<String, CellWire>) -> Result<CellPatch, DecodeError> {
    raw.into_iter()
        .map(|(cell, value)| {
            let text = match value {
                CellWire::Index(idx) => {
                    return Ok((cell, CellUpdate::Owner(CorporationRef::Index(idx))))
                }
                CellWire::Text(text) => text,
            };
            let update = match text.trim().to_lowercase().as_str() {
                "" => {
                    return Err(DecodeError::invalid_payload(
                        "upd",
                        format!("cell {cell} has no occupancy"),
                    ))
                }
                "empty" => CellUpdate::Empty,
                "unincorporated" => CellUpdate::Unincorporated,
                value => match value.parse::<usize>() {
                    Ok(idx) => CellUpdate::Owner(CorporationRef::Index(idx)),
                    Err(_) => CellUpdate::Owner(CorporationRef::Named(CorporationId::new(&text))),
                },
            };
            Ok((cell, update))
        })
        .collect()
}

fn corporation_list(
    field: &'static str,
    list: Option<&Vec<String>>,
    sta: &str,
) -> Result<Vec<CorporationId>, DecodeError> {
    list.map(|names| names.iter().map(|n| CorporationId::new(n)).collect())
        .ok_or_else(|| {
            DecodeError::invalid_payload("upd", format!("directive {sta} requires '{field}'"))
        })
}

fn decode_directive(sta: &str, p: &UpdPar) -> Result<Directive, DecodeError> {
    Ok(match sta {
        "PlayTile" => Directive::PlayTile,
        "FoundCorp" => Directive::FoundCorp {
            inactive: corporation_list("ina", p.ina.as_ref(), sta)?,
        },
        "BuyStock" => Directive::BuyStock {
            active: corporation_list("act", p.act.as_ref(), sta)?,
        },
        "SellTrade" => Directive::SellTrade {
            tradeable: corporation_list("trd", p.trd.as_ref(), sta)?,
        },
        "UntieMerge" => Directive::UntieMerge {
            tied: corporation_list("tie", p.tie.as_ref(), sta)?,
        },
        // The server ends the game early when too few players remain.
        "EndGame" | "InsufficientPlayers" => Directive::EndGame,
        other => Directive::Unknown {
            name: other.to_string(),
        },
    })
}

fn counts<V>(orders: &BTreeMap<CorporationId, V>, f: impl Fn(&V) -> Value) -> Value {
    let map: Map<String, Value> = orders
        .iter()
        .map(|(id, v)| (id.as_str().to_string(), f(v)))
        .collect();
    Value::Object(map)
}

/// Encode a validated action into its wire text. Never fails.
pub fn encode(action: &ClientAction) -> String {
    let value = match action {
        ClientAction::StartGame { player_timeout } => match player_timeout {
            Some(secs) => json!({"typ": "ini", "par": {"pto": secs}}),
            None => json!({"typ": "ini", "par": {}}),
        },
        ClientAction::PlayTile { tile } => json!({"typ": "ply", "par": {"til": tile}}),
        ClientAction::FoundCorporation { corporation } => {
            json!({"typ": "ncp", "par": {"cor": corporation.as_str()}})
        }
        ClientAction::BuyStock { orders } => {
            json!({"typ": "buy", "par": {"cor": counts(orders, |n| json!(n))}})
        }
        ClientAction::SellTrade { orders } => json!({
            "typ": "sel",
            "par": {"cor": counts(orders, |o| json!({"sel": o.sell, "tra": o.trade}))}
        }),
        ClientAction::UntieMerge { corporation } => {
            json!({"typ": "unt", "par": {"cor": corporation.as_str()}})
        }
        ClientAction::ClaimEnd => json!({"typ": "end", "par": {}}),
        ClientAction::AddBot { level } => json!({"typ": "bot", "par": {"lvl": level}}),
        ClientAction::KickPlayer { player } => json!({"typ": "kck", "par": {"ply": player}}),
        ClientAction::Quit => json!({"typ": "qui", "par": {}}),
    };
    value.to_string()
}

/// Decode a client action from its wire text.
pub fn decode_action(text: &str) -> Result<ClientAction, DecodeError> {
    let (typ, par) = envelope(text)?;
    match typ.as_str() {
        "ini" => {
            let p: IniPar = params("ini", par)?;
            Ok(ClientAction::StartGame {
                player_timeout: p.pto,
            })
        }
        "ply" => {
            let p: PlyPar = params("ply", par)?;
            Ok(ClientAction::PlayTile { tile: p.til })
        }
        "ncp" => {
            let p: CorNamePar = params("ncp", par)?;
            Ok(ClientAction::FoundCorporation {
                corporation: CorporationId::new(&p.cor),
            })
        }
        "buy" => {
            let p: BuyPar = params("buy", par)?;
            Ok(ClientAction::BuyStock {
                orders: shares(p.cor),
            })
        }
        "sel" => {
            let p: SelPar = params("sel", par)?;
            Ok(ClientAction::SellTrade {
                orders: p
                    .cor
                    .into_iter()
                    .map(|(name, o)| {
                        (
                            CorporationId::new(&name),
                            SellTradeOrder {
                                sell: o.sel,
                                trade: o.tra,
                            },
                        )
                    })
                    .collect(),
            })
        }
        "unt" => {
            let p: CorNamePar = params("unt", par)?;
            Ok(ClientAction::UntieMerge {
                corporation: CorporationId::new(&p.cor),
            })
        }
        "end" => {
            // Parameters carry nothing; only their shape is checked.
            let _: Map<String, Value> = params("end", par)?;
            Ok(ClientAction::ClaimEnd)
        }
        "bot" => {
            let p: BotPar = params("bot", par)?;
            Ok(ClientAction::AddBot { level: p.lvl })
        }
        "kck" => {
            let p: KckPar = params("kck", par)?;
            Ok(ClientAction::KickPlayer { player: p.ply })
        }
        "qui" => {
            let _: Map<String, Value> = params("qui", par)?;
            Ok(ClientAction::Quit)
        }
        other => Err(DecodeError::malformed(format!(
            "unknown action type '{other}'"
        ))),
    }
}
