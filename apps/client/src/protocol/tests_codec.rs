use proptest::prelude::*;

use crate::domain::board::CellUpdate;
use crate::domain::corporations::{CorporationId, CorporationRef};
use crate::domain::phase::Directive;
use crate::domain::player::Holdings;
use crate::domain::test_gens::client_action;
use crate::domain::test_prelude;
use crate::domain::{ClientAction, SellTradeOrder};
use crate::errors::protocol::DecodeError;
use crate::errors::ErrorCode;
use crate::protocol::{decode, decode_action, encode, OutReason, Role, ServerMessage};

fn corp(name: &str) -> CorporationId {
    CorporationId::new(name)
}

fn owner(name: &str) -> CellUpdate {
    CellUpdate::Owner(CorporationRef::Named(corp(name)))
}

#[test]
fn unparsable_text_is_malformed() {
    for text in ["", "not json", "[1,2]", "\"upd\"", "{\"par\":{}}", "{\"typ\":5,\"par\":{}}"] {
        let err = decode(text).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedMessage, "{text}");
    }
}

#[test]
fn unknown_tag_is_malformed() {
    let err = decode(r#"{"typ":"zzz","par":{}}"#).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedMessage { .. }));
}

#[test]
fn legacy_details_key_is_a_version_mismatch() {
    let err = decode(r#"{"typ":"err","det":{"cnt":"nope"}}"#).unwrap_err();
    assert_eq!(err, DecodeError::VersionMismatch { key: "det" });

    // Even alongside the unified key
    let err = decode(r#"{"typ":"err","par":{"cnt":"a"},"det":{"cnt":"b"}}"#).unwrap_err();
    assert_eq!(err.code(), ErrorCode::VersionMismatch);
}

#[test]
fn missing_or_misshaped_params_are_invalid_payload() {
    for text in [
        r#"{"typ":"err"}"#,
        r#"{"typ":"err","par":[]}"#,
        r#"{"typ":"err","par":{}}"#,
        r#"{"typ":"ctl","par":{"rol":"boss"}}"#,
        r#"{"typ":"add","par":{"val":3}}"#,
        r#"{"typ":"upd","par":{"cor":[{"nam":"tower","siz":-1}]}}"#,
        r#"{"typ":"upd","par":{"brd":{"1A":""}}}"#,
    ] {
        let err = decode(text).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPayload, "{text}");
    }
}

#[test]
fn directive_without_its_payload_is_invalid() {
    for text in [
        r#"{"typ":"upd","par":{"sta":"BuyStock"}}"#,
        r#"{"typ":"upd","par":{"sta":"FoundCorp","ebl":true}}"#,
        r#"{"typ":"upd","par":{"sta":"SellTrade","act":["tower"]}}"#,
        r#"{"typ":"upd","par":{"sta":"UntieMerge"}}"#,
    ] {
        let err = decode(text).unwrap_err();
        assert!(
            matches!(err, DecodeError::InvalidPayload { kind: "upd", .. }),
            "{text}"
        );
    }
}

#[test]
fn error_control_and_roster_decode() {
    assert_eq!(
        decode(r#"{"typ":"err","par":{"cnt":"Not your turn","cod":"turn"}}"#).unwrap(),
        ServerMessage::Error {
            code: Some("turn".into()),
            text: "Not your turn".into()
        }
    );
    assert_eq!(
        decode(r#"{"typ":"ctl","par":{"rol":"mng"}}"#).unwrap(),
        ServerMessage::Control {
            role: Role::Manager
        }
    );
    assert_eq!(
        decode(r#"{"typ":"add","par":{"val":["ana","bob"]}}"#).unwrap(),
        ServerMessage::Roster {
            players: vec!["ana".into(), "bob".into()]
        }
    );
}

#[test]
fn full_update_decodes_every_field() {
    let text = r#"{
        "typ": "upd",
        "par": {
            "brd": {"1A": "empty", "2A": "unincorporated", "3A": "Tower"},
            "cor": [{"nam": "Tower", "prc": 300, "maj": 3000, "min": 1500, "rem": 22, "siz": 3, "def": false}],
            "hnd": [{"coo": "5B", "pyb": true}, {"coo": "9I", "pyb": false}],
            "ply": {"csh": 5400, "own": {"Tower": 2}},
            "riv": [{"nam": "bob", "csh": 6000, "own": {}}],
            "ebl": true,
            "lst": false,
            "trn": 4,
            "his": ["something happened"],
            "sta": "PlayTile"
        }
    }"#;
    let ServerMessage::Update(update) = decode(text).unwrap() else {
        panic!("expected an update");
    };

    let board = update.board.unwrap();
    assert_eq!(board.get("1A"), Some(&CellUpdate::Empty));
    assert_eq!(board.get("2A"), Some(&CellUpdate::Unincorporated));
    assert_eq!(board.get("3A"), Some(&owner("tower")));

    let corporations = update.corporations.unwrap();
    assert_eq!(corporations[0].id, corp("tower"));
    assert_eq!(corporations[0].size, Some(3));
    assert_eq!(corporations[0].remaining_shares, Some(22));

    let hand = update.hand.unwrap();
    assert_eq!(hand.len(), 2);
    assert!(hand[0].playable);
    assert!(!hand[1].playable);

    let wallet = update.wallet.unwrap();
    assert_eq!(wallet.cash, 5400);
    assert_eq!(
        wallet.holdings,
        Holdings::Named([(corp("tower"), 2)].into_iter().collect())
    );

    assert_eq!(update.rivals.unwrap()[0].name, "bob");
    assert_eq!(update.enabled, Some(true));
    assert_eq!(update.last_round, Some(false));
    assert_eq!(update.directive, Some(Directive::PlayTile));
}

#[test]
fn game_server_shapes_decode() {
    // Owners as roster indices and holdings as counts in roster order
    let text = r#"{
        "typ": "upd",
        "par": {
            "brd": {"1A": "0", "2A": 3, "3A": "empty"},
            "ply": {"csh": 6000, "own": [0, 2, 0, 0, 0, 0, 0]},
            "riv": [{"nam": "bob", "csh": 5800, "own": [1, 0, 0, 0, 0, 0, 0]}],
            "ebl": true,
            "sta": "PlayTile"
        }
    }"#;
    let ServerMessage::Update(update) = decode(text).unwrap() else {
        panic!("expected an update");
    };

    let board = update.board.unwrap();
    assert_eq!(board.get("1A"), Some(&CellUpdate::Owner(CorporationRef::Index(0))));
    assert_eq!(board.get("2A"), Some(&CellUpdate::Owner(CorporationRef::Index(3))));
    assert_eq!(board.get("3A"), Some(&CellUpdate::Empty));

    let wallet = update.wallet.unwrap();
    assert_eq!(wallet.cash, 6000);
    assert_eq!(wallet.holdings, Holdings::Positional(vec![0, 2, 0, 0, 0, 0, 0]));
    let rivals = update.rivals.unwrap();
    assert_eq!(rivals[0].wallet.holdings, Holdings::Positional(vec![1, 0, 0, 0, 0, 0, 0]));
}

#[test]
fn misshaped_holdings_and_cells_are_invalid() {
    for text in [
        r#"{"typ":"upd","par":{"ply":{"csh":1,"own":[-1]}}}"#,
        r#"{"typ":"upd","par":{"ply":{"csh":1,"own":"tower"}}}"#,
        r#"{"typ":"upd","par":{"brd":{"1A":-2}}}"#,
        r#"{"typ":"upd","par":{"brd":{"1A":true}}}"#,
    ] {
        let err = decode(text).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidPayload, "{text}");
    }
}

#[test]
fn client_out_decodes_every_reason() {
    for (code, reason) in [
        ("kck", OutReason::Kicked),
        ("ptm", OutReason::PlayerTimedOut),
        ("tim", OutReason::RoomTimedOut),
        ("ter", OutReason::RoomTerminated),
        ("ncl", OutReason::NoClients),
        ("qui", OutReason::Quit),
        ("zzz", OutReason::Other("zzz".into())),
    ] {
        let text = format!(r#"{{"typ":"out","par":{{"rea":"{code}"}}}}"#);
        assert_eq!(
            decode(&text).unwrap(),
            ServerMessage::ClientOut {
                reason: reason.clone()
            }
        );
        assert_eq!(reason.as_str(), code);
    }

    let err = decode(r#"{"typ":"out","par":{}}"#).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidPayload { kind: "out", .. }));
}

#[test]
fn absent_fields_stay_absent() {
    let ServerMessage::Update(update) = decode(r#"{"typ":"upd","par":{"ebl":false}}"#).unwrap()
    else {
        panic!("expected an update");
    };
    assert_eq!(update.enabled, Some(false));
    assert!(update.board.is_none());
    assert!(update.hand.is_none());
    assert!(update.wallet.is_none());
    assert!(update.directive.is_none());
}

#[test]
fn bare_directive_decodes_as_directive() {
    assert_eq!(
        decode(r#"{"typ":"upd","par":{"sta":"BuyStock","act":["Tower","Luxor"]}}"#).unwrap(),
        ServerMessage::Directive(Directive::BuyStock {
            active: vec![corp("tower"), corp("luxor")]
        })
    );
    assert_eq!(
        decode(r#"{"typ":"upd","par":{"sta":"InsufficientPlayers"}}"#).unwrap(),
        ServerMessage::Directive(Directive::EndGame)
    );
    assert_eq!(
        decode(r#"{"typ":"upd","par":{"sta":"Bankruptcy"}}"#).unwrap(),
        ServerMessage::Directive(Directive::Unknown {
            name: "Bankruptcy".into()
        })
    );
}

#[test]
fn encode_uses_unified_envelope() {
    let mut orders = std::collections::BTreeMap::new();
    orders.insert(corp("tower"), 2);
    let text = encode(&ClientAction::BuyStock { orders });
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"typ": "buy", "par": {"cor": {"tower": 2}}})
    );

    let value: serde_json::Value = serde_json::from_str(&encode(&ClientAction::ClaimEnd)).unwrap();
    assert_eq!(value, serde_json::json!({"typ": "end", "par": {}}));
}

#[test]
fn encode_sell_trade_and_start() {
    let mut orders = std::collections::BTreeMap::new();
    orders.insert(corp("luxor"), SellTradeOrder { sell: 1, trade: 2 });
    let value: serde_json::Value =
        serde_json::from_str(&encode(&ClientAction::SellTrade { orders })).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"typ": "sel", "par": {"cor": {"luxor": {"sel": 1, "tra": 2}}}})
    );

    let value: serde_json::Value = serde_json::from_str(&encode(&ClientAction::StartGame {
        player_timeout: Some(60),
    }))
    .unwrap();
    assert_eq!(value, serde_json::json!({"typ": "ini", "par": {"pto": 60}}));
}

#[test]
fn encode_room_actions() {
    let value = |action: ClientAction| -> serde_json::Value {
        serde_json::from_str(&encode(&action)).unwrap()
    };
    assert_eq!(
        value(ClientAction::AddBot {
            level: "chaotic".into()
        }),
        serde_json::json!({"typ": "bot", "par": {"lvl": "chaotic"}})
    );
    assert_eq!(
        value(ClientAction::KickPlayer { player: 2 }),
        serde_json::json!({"typ": "kck", "par": {"ply": 2}})
    );
    assert_eq!(
        value(ClientAction::Quit),
        serde_json::json!({"typ": "qui", "par": {}})
    );
}

#[test]
fn decode_action_rejects_legacy_key() {
    let err = decode_action(r#"{"typ":"ply","det":{"til":"5A"}}"#).unwrap_err();
    assert_eq!(err.code(), ErrorCode::VersionMismatch);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_action_round_trip(action in client_action()) {
        let decoded = decode_action(&encode(&action)).unwrap();
        prop_assert_eq!(decoded, action);
    }
}
