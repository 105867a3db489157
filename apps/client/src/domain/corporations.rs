use std::fmt;

use crate::errors::domain::StateError;

/// Stable corporation identity: the lower-cased, trimmed corporation name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorporationId(String);

impl CorporationId {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorporationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CorporationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A corporation as the server names it: by name, or by its position in the
/// roster (the order of the `cor` list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorporationRef {
    Named(CorporationId),
    Index(usize),
}

impl CorporationRef {
    pub fn resolve(&self, order: &[CorporationId]) -> Result<CorporationId, StateError> {
        match self {
            CorporationRef::Named(id) => Ok(id.clone()),
            CorporationRef::Index(idx) => order.get(*idx).cloned().ok_or_else(|| {
                StateError::illegal(format!(
                    "no corporation at roster index {idx} ({} known)",
                    order.len()
                ))
            }),
        }
    }
}

/// Last-known status of one corporation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorporationStatus {
    pub id: CorporationId,
    /// Number of tiles in the chain; 0 when not (or no longer) on the board.
    pub size: u32,
    pub price: u32,
    pub majority_bonus: u32,
    pub minority_bonus: u32,
    pub remaining_shares: u32,
    /// Absorbed in a merge; shares may be sold or traded while this holds.
    pub defunct: bool,
}

impl CorporationStatus {
    fn unknown(id: CorporationId) -> Self {
        Self {
            id,
            size: 0,
            price: 0,
            majority_bonus: 0,
            minority_bonus: 0,
            remaining_shares: 0,
            defunct: false,
        }
    }

    pub fn founded(&self) -> bool {
        self.size > 0
    }
}

/// Partial corporation update. `None` fields leave the held value unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorporationPatch {
    pub id: CorporationId,
    pub size: Option<u32>,
    pub price: Option<u32>,
    pub majority_bonus: Option<u32>,
    pub minority_bonus: Option<u32>,
    pub remaining_shares: Option<u32>,
    pub defunct: Option<bool>,
}

impl CorporationPatch {
    pub fn named(name: &str) -> Self {
        Self {
            id: CorporationId::new(name),
            size: None,
            price: None,
            majority_bonus: None,
            minority_bonus: None,
            remaining_shares: None,
            defunct: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }
}

/// Ordered corporation roster.
///
/// Corporations are created the first time the server names them and are never
/// removed; the order of first appearance is preserved.
#[derive(Debug, Clone, Default)]
pub struct Corporations {
    roster: Vec<CorporationStatus>,
}

impl Corporations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, patches: &[CorporationPatch]) {
        for patch in patches {
            let id = &patch.id;
            let idx = match self.roster.iter().position(|c| &c.id == id) {
                Some(idx) => idx,
                None => {
                    self.roster.push(CorporationStatus::unknown(id.clone()));
                    self.roster.len() - 1
                }
            };
            let status = &mut self.roster[idx];
            if let Some(size) = patch.size {
                status.size = size;
            }
            if let Some(price) = patch.price {
                status.price = price;
            }
            if let Some(bonus) = patch.majority_bonus {
                status.majority_bonus = bonus;
            }
            if let Some(bonus) = patch.minority_bonus {
                status.minority_bonus = bonus;
            }
            if let Some(remaining) = patch.remaining_shares {
                status.remaining_shares = remaining;
            }
            if let Some(defunct) = patch.defunct {
                status.defunct = defunct;
            }
        }
    }

    /// Roster order once `patches` are applied. Nothing is mutated.
    pub fn order_with(&self, patches: &[CorporationPatch]) -> Vec<CorporationId> {
        let mut order: Vec<CorporationId> = self.roster.iter().map(|c| c.id.clone()).collect();
        for patch in patches {
            if !order.contains(&patch.id) {
                order.push(patch.id.clone());
            }
        }
        order
    }

    pub fn get(&self, id: &CorporationId) -> Option<&CorporationStatus> {
        self.roster.iter().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CorporationStatus> {
        self.roster.iter()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}
