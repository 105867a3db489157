//! Board state store: last-known ownership of every cell the server has named.

use std::collections::BTreeMap;

use crate::domain::corporations::{CorporationId, CorporationRef};
use crate::errors::domain::StateError;

/// Occupancy of a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    /// A tile is placed but belongs to no corporation.
    Unincorporated,
    OwnedBy(CorporationId),
}

impl Occupancy {
    /// Position along Empty -> Unincorporated -> OwnedBy. Cells never move backwards.
    fn rank(&self) -> u8 {
        match self {
            Occupancy::Empty => 0,
            Occupancy::Unincorporated => 1,
            Occupancy::OwnedBy(_) => 2,
        }
    }

    pub fn owner(&self) -> Option<&CorporationId> {
        match self {
            Occupancy::OwnedBy(id) => Some(id),
            _ => None,
        }
    }
}

/// Partial board update keyed by cell coordinate, e.g. `"5A"`.
pub type BoardPatch = BTreeMap<String, Occupancy>;

/// Cell value as received; the owner may still be a roster index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellUpdate {
    Empty,
    Unincorporated,
    Owner(CorporationRef),
}

pub type CellPatch = BTreeMap<String, CellUpdate>;

/// Resolve every owner in `cells` against the roster order.
pub fn resolve_cells(
    cells: &CellPatch,
    order: &[CorporationId],
) -> Result<BoardPatch, StateError> {
    cells
        .iter()
        .map(|(cell, update)| {
            let occupancy = match update {
                CellUpdate::Empty => Occupancy::Empty,
                CellUpdate::Unincorporated => Occupancy::Unincorporated,
                CellUpdate::Owner(owner) => Occupancy::OwnedBy(owner.resolve(order)?),
            };
            Ok((cell.clone(), occupancy))
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: BTreeMap<String, Occupancy>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every entry of `patch` keeps its cell monotonic.
    ///
    /// Cells not yet known accept any occupancy. Merges (`OwnedBy(x)` to
    /// `OwnedBy(y)`) are legal.
    pub fn validate_patch(&self, patch: &BoardPatch) -> Result<(), StateError> {
        for (cell, next) in patch {
            if let Some(current) = self.cells.get(cell) {
                if next.rank() < current.rank() {
                    return Err(StateError::illegal(format!(
                        "cell {cell} cannot move from {current:?} to {next:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Merge `patch` onto the held cells. Either the whole patch applies or
    /// nothing changes.
    pub fn apply_patch(&mut self, patch: &BoardPatch) -> Result<(), StateError> {
        self.validate_patch(patch)?;
        for (cell, next) in patch {
            self.cells.insert(cell.clone(), next.clone());
        }
        Ok(())
    }

    pub fn get(&self, cell: &str) -> Option<&Occupancy> {
        self.cells.get(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Occupancy)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
