use std::fs;

use shogiban_core::{Board, Color, Piece, PieceType, Square};
use shogiban_record::RecordStore;
use shogiban_session::AnaliseSession;
use tempfile::tempdir;

#[test]
fn test_replay_of_loaded_record() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("TOP 1.json");
    fs::write(
        &path,
        r#"{"date": "2024-05-01 10:00:00", "time": 42,
            "moves": [{"from": 1, "to": 2, "promo": false, "dropped_type": null}]}"#,
    )
    .unwrap();

    let game = RecordStore::load_file(&path).unwrap();
    assert_eq!(game.elapsed_seconds, 42);

    let mut replay = AnaliseSession::new(game);
    assert_eq!(replay.clock_label(), "00:42");
    assert_eq!(replay.step_forward(), Ok(true));
    assert_eq!(replay.board().piece_at("8a".parse::<Square>().unwrap()), None);
    assert_eq!(
        replay.board().piece_at("7a".parse::<Square>().unwrap()),
        Some(Piece::new(PieceType::Knight, Color::White))
    );
    assert_eq!(replay.ply(), 1);

    assert!(replay.step_back());
    assert_eq!(replay.board(), &Board::startpos());
    assert_eq!(replay.ply(), 0);
    assert_eq!(replay.total_plies(), 1);
}
