use proptest::prelude::*;

use crate::domain::board::{resolve_cells, Board, BoardPatch, CellPatch, CellUpdate, Occupancy};
use crate::domain::corporations::{CorporationId, CorporationRef};
use crate::domain::test_gens::board_patch;
use crate::domain::test_prelude;
use crate::errors::domain::StateError;

fn owned(name: &str) -> Occupancy {
    Occupancy::OwnedBy(CorporationId::new(name))
}

fn patch(entries: &[(&str, Occupancy)]) -> BoardPatch {
    entries
        .iter()
        .map(|(cell, occ)| (cell.to_string(), occ.clone()))
        .collect()
}

#[test]
fn unmentioned_cells_are_retained() {
    let mut board = Board::new();
    board
        .apply_patch(&patch(&[
            ("1A", Occupancy::Empty),
            ("2A", Occupancy::Unincorporated),
        ]))
        .unwrap();
    board.apply_patch(&patch(&[("3A", owned("tower"))])).unwrap();

    assert_eq!(board.len(), 3);
    assert_eq!(board.get("1A"), Some(&Occupancy::Empty));
    assert_eq!(board.get("2A"), Some(&Occupancy::Unincorporated));
    assert_eq!(board.get("3A"), Some(&owned("tower")));
}

#[test]
fn merge_between_owners_is_legal() {
    let mut board = Board::new();
    board.apply_patch(&patch(&[("5B", owned("luxor"))])).unwrap();
    board.apply_patch(&patch(&[("5B", owned("tower"))])).unwrap();
    assert_eq!(board.get("5B").and_then(Occupancy::owner).map(|c| c.as_str()), Some("tower"));
}

#[test]
fn regression_is_rejected_and_nothing_applies() {
    let mut board = Board::new();
    board
        .apply_patch(&patch(&[("1A", owned("tower")), ("2A", Occupancy::Empty)]))
        .unwrap();

    let err = board
        .apply_patch(&patch(&[
            ("2A", Occupancy::Unincorporated),
            ("1A", Occupancy::Empty),
        ]))
        .unwrap_err();

    assert!(matches!(err, StateError::IllegalTransition { .. }));
    // 2A sorts first; it must not have been applied either
    assert_eq!(board.get("2A"), Some(&Occupancy::Empty));
    assert_eq!(board.get("1A"), Some(&owned("tower")));
}

#[test]
fn owned_cell_cannot_become_unincorporated() {
    let mut board = Board::new();
    board.apply_patch(&patch(&[("9I", owned("imperial"))])).unwrap();
    assert!(board
        .apply_patch(&patch(&[("9I", Occupancy::Unincorporated)]))
        .is_err());
}

#[test]
fn cell_owners_resolve_by_roster_index() {
    let order = vec![CorporationId::new("tower"), CorporationId::new("luxor")];
    let cells: CellPatch = [
        ("1A".to_string(), CellUpdate::Empty),
        ("2A".to_string(), CellUpdate::Unincorporated),
        ("3A".to_string(), CellUpdate::Owner(CorporationRef::Index(1))),
        (
            "4A".to_string(),
            CellUpdate::Owner(CorporationRef::Named(CorporationId::new("tower"))),
        ),
    ]
    .into_iter()
    .collect();

    let resolved = resolve_cells(&cells, &order).unwrap();
    assert_eq!(
        resolved,
        patch(&[
            ("1A", Occupancy::Empty),
            ("2A", Occupancy::Unincorporated),
            ("3A", owned("luxor")),
            ("4A", owned("tower")),
        ])
    );
}

#[test]
fn unknown_roster_index_fails_resolution() {
    let cells: CellPatch = [("3A".to_string(), CellUpdate::Owner(CorporationRef::Index(7)))]
        .into_iter()
        .collect();
    let err = resolve_cells(&cells, &[CorporationId::new("tower")]).unwrap_err();
    assert!(matches!(err, StateError::IllegalTransition { .. }));
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_occupancy_never_regresses(patches in prop::collection::vec(board_patch(), 1..12)) {
        let mut board = Board::new();
        for p in &patches {
            let before = board.clone();
            if board.apply_patch(p).is_ok() {
                for (cell, occ) in before.cells() {
                    let now = board.get(cell).expect("known cells persist");
                    prop_assert!(rank(now) >= rank(occ));
                }
            } else {
                prop_assert_eq!(board.len(), before.len());
                for (cell, occ) in before.cells() {
                    prop_assert_eq!(board.get(cell), Some(occ));
                }
            }
        }
    }

    #[test]
    fn prop_same_patch_twice_is_idempotent(p in board_patch()) {
        let mut board = Board::new();
        board.apply_patch(&p).unwrap();
        let once: Vec<(String, Occupancy)> =
            board.cells().map(|(c, o)| (c.to_string(), o.clone())).collect();
        board.apply_patch(&p).unwrap();
        let twice: Vec<(String, Occupancy)> =
            board.cells().map(|(c, o)| (c.to_string(), o.clone())).collect();
        prop_assert_eq!(once, twice);
    }
}

fn rank(occ: &Occupancy) -> u8 {
    match occ {
        Occupancy::Empty => 0,
        Occupancy::Unincorporated => 1,
        Occupancy::OwnedBy(_) => 2,
    }
}
