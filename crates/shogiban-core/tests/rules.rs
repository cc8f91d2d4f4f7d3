use shogiban_core::{Board, BoardError, Color, GameOutcome, Move, PieceType, Square};

fn mv(usi: &str) -> Move {
    usi.parse().unwrap()
}

#[test]
fn test_gold_drop_delivers_checkmate() {
    let mut pos = Board::from_sfen("8k/9/6NG1/9/9/9/9/9/4K4 b G 1").unwrap();
    assert!(pos.outcome().is_none());

    pos.push(mv("G*1b")).unwrap();
    assert_eq!(pos.checked_king(), Some("1a".parse::<Square>().unwrap()));
    assert!(pos.is_checkmate());
    assert_eq!(pos.outcome(), Some(GameOutcome::Checkmate { winner: Color::Black }));
    assert_eq!(pos.hand_count(Color::Black, PieceType::Gold), 0);

    pos.pop().unwrap();
    assert!(!pos.is_game_over());
    assert_eq!(pos.hand_count(Color::Black, PieceType::Gold), 1);
}

#[test]
fn test_opening_sequence_and_sfen() {
    let mut pos = Board::startpos();
    for usi in ["7g7f", "3c3d", "8h2b+", "3a2b"] {
        pos.push(mv(usi)).unwrap();
    }
    assert_eq!(
        pos.to_sfen(),
        "lnsgkg1nl/1r5s1/pppppp1pp/6p2/9/2P6/PP1PPPPPP/7R1/LNSGKGSNL b Bb 5"
    );
    assert_eq!(pos.move_stack(), &[mv("7g7f"), mv("3c3d"), mv("8h2b+"), mv("3a2b")]);
}

#[test]
fn test_legal_destinations_follow_side_to_move() {
    let pos = Board::startpos();
    let pawn = "7g".parse::<Square>().unwrap();
    let dests: Vec<Square> = pos.legal_destinations(pawn).into_iter().collect();
    assert_eq!(dests, vec!["7f".parse::<Square>().unwrap()]);

    let white_pawn = "3c".parse::<Square>().unwrap();
    assert!(pos.legal_destinations(white_pawn).is_empty());
    assert!(pos.legal_drop_destinations(PieceType::Pawn).is_empty());
}

#[test]
fn test_errors_render_move_text() {
    let mut pos = Board::startpos();
    let err = pos.push(mv("5i5g")).unwrap_err();
    assert_eq!(err, BoardError::IllegalMove(mv("5i5g")));
    assert_eq!(err.to_string(), "illegal move: 5i5g");
}
