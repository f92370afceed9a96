use gambit_core::{Board, Color, PieceKind, Position};

fn play(board: &mut Board, line: &str) -> Vec<gambit_core::Move> {
    line.split_whitespace()
        .map(|text| {
            let mv = board.parse_move(text).unwrap();
            board.make_move(mv);
            mv
        })
        .collect()
}

#[test]
fn long_line_undoes_to_identical_board() {
    let mut board = Board::starting_position();
    let before = board.clone();
    let moves = play(
        &mut board,
        "e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 a7a6 c1e3 e7e5 d4b3 c8e6 f2f3 f8e7 \
         d1d2 e8g8 e1c1 b8d7 g2g4 b7b5 g4g5 b5b4 g5f6 b4c3 d2c3 e7f6",
    );
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.hash(), board.compute_hash());

    for &mv in moves.iter().rev() {
        board.undo_move(mv);
    }
    assert_eq!(board, before);
}

#[test]
fn trait_queries_match_board() {
    let mut board: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
        .parse()
        .unwrap();
    let position: &mut dyn Position = &mut board;
    assert_eq!(position.ply_count(), 6);
    assert_eq!(position.pieces(PieceKind::Queen, Color::White).count(), 1);
    assert!(!position.is_in_check());

    let mate = position
        .legal_moves(false)
        .iter()
        .copied()
        .find(|mv| mv.to_string() == "h5f7")
        .unwrap();
    position.make_move(mate);
    assert!(position.is_in_check());
    assert!(position.is_checkmate());
    assert!(!position.is_draw());
    position.undo_move(mate);
    assert!(!position.is_checkmate());
}
