use std::collections::HashSet;

use chess_core::board::{Board, Square};
use chess_core::game::GameState;
use chess_core::moves::{Move, MoveKind};
use chess_core::piece::{Color, PieceType};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn play(game: &mut GameState, from: Square, to: Square) -> Move {
    game.try_move(from, to)
        .unwrap_or_else(|e| panic!("{from:?}->{to:?} rejected: {e}"))
}

fn move_set(game: &GameState) -> HashSet<(Square, Square)> {
    game.get_valid_moves().iter().map(|m| (m.from, m.to)).collect()
}

/// Every candidate lands on the board and never on a friendly piece.
fn check_candidates(game: &GameState) {
    for m in game.get_valid_moves() {
        assert!(m.to.0 < 8 && m.to.1 < 8, "{m:?} leaves the board");
        let mover = game.board().get(m.from).expect("move from empty square");
        assert_eq!(mover.color, game.side_to_move());
        if let Some(target) = game.board().get(m.to) {
            assert_ne!(target.color, mover.color, "{m:?} lands on a friend");
        }
        if let Some(captured) = m.piece_captured {
            assert_ne!(captured.piece_type, PieceType::King, "{m:?} captures a king");
        }
    }
}

#[test]
fn e4_d5_takes_is_a_plain_capture_not_en_passant() {
    let mut game = GameState::new();
    play(&mut game, (6, 4), (4, 4));
    play(&mut game, (1, 3), (3, 3));

    // The e4 pawn is not beside the d5 pawn, so no en passant is offered.
    let from_e4: Vec<Move> = game
        .get_valid_moves()
        .into_iter()
        .filter(|m| m.from == (4, 4))
        .collect();
    assert!(from_e4.iter().all(|m| m.kind != MoveKind::EnPassant));
    assert!(!from_e4.iter().any(|m| m.to == (2, 3)));

    let mut dests: Vec<Square> = from_e4.iter().map(|m| m.to).collect();
    dests.sort();
    assert_eq!(dests, vec![(3, 3), (3, 4)]);
    let capture = from_e4.iter().find(|m| m.to == (3, 3)).unwrap();
    assert_eq!(capture.kind, MoveKind::Normal);
    assert_eq!(capture.captured_square(), (3, 3));
}

#[test]
fn black_captures_en_passant_after_white_double_push() {
    let mut game = GameState::new();
    play(&mut game, (6, 7), (5, 7));
    play(&mut game, (1, 3), (3, 3));
    play(&mut game, (5, 7), (4, 7));
    play(&mut game, (3, 3), (4, 3));
    play(&mut game, (6, 4), (4, 4));

    assert_eq!(game.en_passant_target(), Some((5, 4)));
    let ep = play(&mut game, (4, 3), (5, 4));
    assert_eq!(ep.kind, MoveKind::EnPassant);
    assert_eq!(ep.piece_captured.map(|p| p.code()), Some("wP".to_string()));
    assert!(game.board().is_empty((4, 4)));
    assert_eq!(game.board().get((5, 4)).map(|p| p.code()), Some("bP".to_string()));
}

#[test]
fn en_passant_expires_when_declined() {
    let mut game = GameState::new();
    play(&mut game, (6, 4), (4, 4));
    play(&mut game, (1, 7), (2, 7));
    play(&mut game, (4, 4), (3, 4));
    play(&mut game, (1, 5), (3, 5));
    assert!(game.valid_destinations((3, 4)).contains(&(2, 5)));

    play(&mut game, (6, 0), (5, 0));
    play(&mut game, (2, 7), (3, 7));
    assert!(!game.valid_destinations((3, 4)).contains(&(2, 5)));
}

#[test]
fn bishop_has_seven_moves_on_open_diagonal() {
    let board = Board::from_rows(&[
        "-- -- -- -- bK -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- -- -- -- -- -- --",
        "-- -- wB -- wK -- -- --",
    ])
    .unwrap();
    let game = GameState::from_board(board, Color::White);
    assert_eq!(game.valid_destinations((7, 2)).len(), 7);
}

#[test]
fn castling_needs_clear_path_and_intact_rights() {
    let mut game = GameState::new();
    let castles = |g: &GameState| {
        g.get_valid_moves()
            .into_iter()
            .filter(|m| m.kind == MoveKind::Castle)
            .count()
    };
    assert_eq!(castles(&game), 0);

    // Clear f1 and g1: knight out, pawn up, bishop out.
    play(&mut game, (7, 6), (5, 5));
    play(&mut game, (1, 0), (2, 0));
    play(&mut game, (6, 4), (5, 4));
    play(&mut game, (2, 0), (3, 0));
    play(&mut game, (7, 5), (4, 2));
    play(&mut game, (3, 0), (4, 0));

    let castle: Vec<Move> = game
        .get_valid_moves()
        .into_iter()
        .filter(|m| m.kind == MoveKind::Castle)
        .collect();
    assert_eq!(castle.len(), 1);
    assert_eq!((castle[0].from, castle[0].to), ((7, 4), (7, 6)));

    play(&mut game, (7, 4), (7, 6));
    assert_eq!(game.board().get((7, 5)).map(|p| p.code()), Some("wR".to_string()));
    play(&mut game, (1, 1), (2, 1));
    assert_eq!(castles(&game), 0);
    assert!(!game.castling_rights().has(Color::White, (7, 0)));
    assert!(!game.castling_rights().has(Color::White, (7, 7)));
}

#[test]
fn generation_is_idempotent() {
    let mut game = GameState::new();
    play(&mut game, (6, 3), (4, 3));
    play(&mut game, (0, 1), (2, 2));
    assert_eq!(move_set(&game), move_set(&game));
}

#[test]
fn random_playouts_round_trip_through_undo() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let mut game = GameState::new();
        for _ in 0..80 {
            if game.pending_promotion().is_some() {
                let choice = *PieceType::PROMOTIONS.choose(&mut rng).unwrap();
                game.promote(choice).unwrap();
            }
            check_candidates(&game);

            let moves = game.get_valid_moves();
            let Some(mv) = moves.choose(&mut rng).copied() else {
                break;
            };

            let board = game.board().clone();
            let side = game.side_to_move();
            let rights = game.castling_rights();
            let ep = game.en_passant_target();
            let log_len = game.move_log().len();
            let before = move_set(&game);

            game.apply(&mv).unwrap();
            assert_eq!(game.undo(), Some(mv));

            assert_eq!(game.board(), &board);
            assert_eq!(game.side_to_move(), side);
            assert_eq!(game.castling_rights(), rights);
            assert_eq!(game.en_passant_target(), ep);
            assert_eq!(game.move_log().len(), log_len);
            assert_eq!(move_set(&game), before);

            game.apply(&mv).unwrap();
        }
    }
}

#[test]
fn moves_given_in_notation_are_played() {
    let mut game = GameState::new();
    for text in ["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"] {
        let (from, to) = chess_core::moves::parse_notation(text).unwrap();
        play(&mut game, from, to);
    }
    assert_eq!(game.last_move().map(|m| m.kind), Some(MoveKind::EnPassant));
    assert!(game.board().is_empty((3, 3)));
    assert_eq!(game.board().get((2, 3)).map(|p| p.code()), Some("wP".to_string()));
}
