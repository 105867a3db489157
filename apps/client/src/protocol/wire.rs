//! Serde shapes of the `par` object for each message kind.
//!
//! Field names follow the wire abbreviations. Unknown fields are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ErrPar {
    pub cnt: String,
    pub cod: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CtlPar {
    pub rol: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddPar {
    pub val: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutPar {
    pub rea: String,
}

/// Board cell value: `"empty"`, `"unincorporated"`, a corporation name, or the
/// corporation's roster index (as a number or a numeric string).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CellWire {
    Index(usize),
    Text(String),
}

/// Shareholdings: a map keyed by corporation name, or counts in roster order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OwnWire {
    ByName(BTreeMap<String, u32>),
    InOrder(Vec<u32>),
}

impl Default for OwnWire {
    fn default() -> Self {
        OwnWire::ByName(BTreeMap::new())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CorWire {
    pub nam: String,
    pub prc: Option<u32>,
    pub maj: Option<u32>,
    pub min: Option<u32>,
    pub rem: Option<u32>,
    pub siz: Option<u32>,
    pub def: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HandWire {
    pub coo: String,
    #[serde(default)]
    pub pyb: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WalletWire {
    pub csh: u32,
    #[serde(default)]
    pub own: OwnWire,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RivalWire {
    pub nam: String,
    pub csh: u32,
    #[serde(default)]
    pub own: OwnWire,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdPar {
    pub brd: Option<BTreeMap<String, CellWire>>,
    pub cor: Option<Vec<CorWire>>,
    pub hnd: Option<Vec<HandWire>>,
    pub ply: Option<WalletWire>,
    pub riv: Option<Vec<RivalWire>>,
    pub ebl: Option<bool>,
    pub lst: Option<bool>,
    pub sta: Option<String>,
    pub ina: Option<Vec<String>>,
    pub act: Option<Vec<String>>,
    pub trd: Option<Vec<String>>,
    pub tie: Option<Vec<String>>,
}

impl UpdPar {
    /// True when nothing but the directive (and its payload) is present.
    pub fn is_directive_only(&self) -> bool {
        self.sta.is_some()
            && self.brd.is_none()
            && self.cor.is_none()
            && self.hnd.is_none()
            && self.ply.is_none()
            && self.riv.is_none()
            && self.ebl.is_none()
            && self.lst.is_none()
    }
}

// Client action parameters.

#[derive(Debug, Deserialize)]
pub(crate) struct IniPar {
    pub pto: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlyPar {
    pub til: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CorNamePar {
    pub cor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuyPar {
    pub cor: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BotPar {
    pub lvl: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KckPar {
    pub ply: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SellTradeWire {
    #[serde(default)]
    pub sel: u32,
    #[serde(default)]
    pub tra: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SelPar {
    pub cor: BTreeMap<String, SellTradeWire>,
}
