// =============================================================================
// Pseudo-legal move generation
//
// One rule per piece kind, selected by a match on PieceType. Rules only look
// at the board plus the two pieces of history they need: the live en passant
// window (pawns) and the castling rights (rooks). Kings have no ordinary
// moves; they only move by castling, which the rook on the far corner emits.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::castling::CastlingRights;
use crate::moves::{Move, MoveKind};
use crate::piece::{Color, Piece, PieceType};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const STRAIGHTS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// En passant eligibility granted by a two-square pawn push. Only honoured
/// while the move log still has length `granted_at`, i.e. on the very next
/// move.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct EnPassant {
    /// Square the pushed pawn skipped; the capturing pawn lands here.
    pub target: Square,
    /// Square the pushed pawn landed on; it is removed by the capture.
    pub victim: Square,
    pub granted_at: usize,
}

pub struct MoveGen<'a> {
    board: &'a Board,
    castling: Option<&'a CastlingRights>,
    en_passant: Option<EnPassant>,
}

impl<'a> MoveGen<'a> {
    /// Generator with plain piece movement only.
    pub fn new(board: &'a Board) -> Self {
        MoveGen {
            board,
            castling: None,
            en_passant: None,
        }
    }

    pub fn with_castling(mut self, rights: &'a CastlingRights) -> Self {
        self.castling = Some(rights);
        self
    }

    /// The window must already be checked against the move log.
    pub fn with_en_passant(mut self, window: Option<EnPassant>) -> Self {
        self.en_passant = window;
        self
    }

    /// All candidate moves for the piece on `square`; empty if the square is.
    pub fn piece_moves(&self, square: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.board.get(square) {
            self.push_piece_moves(square, piece, &mut moves);
        }
        moves
    }

    pub fn moves_for(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (square, piece) in self.board.pieces(color) {
            self.push_piece_moves(square, piece, &mut moves);
        }
        moves
    }

    fn push_piece_moves(&self, square: Square, piece: Piece, moves: &mut Vec<Move>) {
        let color = piece.color;
        match piece.piece_type {
            PieceType::Pawn => self.pawn_moves(square, color, moves),
            PieceType::Knight => self.knight_moves(square, color, moves),
            PieceType::Bishop => self.sliding_moves(square, color, &DIAGONALS, moves),
            PieceType::Rook => {
                self.sliding_moves(square, color, &STRAIGHTS, moves);
                self.castling_moves(square, color, moves);
            }
            PieceType::Queen => {
                self.sliding_moves(square, color, &STRAIGHTS, moves);
                self.sliding_moves(square, color, &DIAGONALS, moves);
            }
            PieceType::King => {}
        }
    }

    fn pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        // A pawn on its last rank is waiting for a promotion choice.
        if from.0 == color.promotion_rank() {
            return;
        }
        let dir = color.forward();

        // Single and double push
        if let Some(one) = Board::offset(from, dir, 0) {
            if self.board.is_empty(one) {
                moves.push(Move::new(from, one, self.board));

                if from.0 == color.pawn_home_rank() {
                    if let Some(two) = Board::offset(from, 2 * dir, 0) {
                        if self.board.is_empty(two) {
                            moves.push(Move::with_kind(from, two, self.board, MoveKind::DoublePush));
                        }
                    }
                }
            }
        }

        // Captures, including en passant
        for dc in [-1i32, 1] {
            let Some(target) = Board::offset(from, dir, dc) else {
                continue;
            };
            match self.board.get(target) {
                Some(p) if p.color != color => moves.push(Move::new(from, target, self.board)),
                Some(_) => {}
                None => {
                    if let Some(ep) = self.en_passant {
                        let beside = (from.0, target.1);
                        if ep.target == target
                            && ep.victim == beside
                            && self.board.get(beside).map(|p| p.color != color).unwrap_or(false)
                        {
                            moves.push(Move::with_kind(from, target, self.board, MoveKind::EnPassant));
                        }
                    }
                }
            }
        }
    }

    fn knight_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        for (dr, dc) in KNIGHT_OFFSETS {
            let Some(to) = Board::offset(from, dr, dc) else {
                continue;
            };
            if self.board.get(to).map(|p| p.color == color).unwrap_or(false) {
                continue;
            }
            moves.push(Move::new(from, to, self.board));
        }
    }

    fn sliding_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[(i32, i32)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, dc) in directions {
            let mut cur = from;
            while let Some(to) = Board::offset(cur, dr, dc) {
                if let Some(p) = self.board.get(to) {
                    if p.color != color {
                        moves.push(Move::new(from, to, self.board));
                    }
                    break;
                }
                moves.push(Move::new(from, to, self.board));
                cur = to;
            }
        }
    }

    /// Scan from a rook on its corner toward the king. With a clear path and
    /// the corner's right intact, emit the king's two-square move.
    fn castling_moves(&self, rook: Square, color: Color, moves: &mut Vec<Move>) {
        let Some(rights) = self.castling else {
            return;
        };
        if !rights.has(color, rook) {
            return;
        }
        let step = if rook.1 == 0 { 1 } else { -1 };
        let mut cur = rook;
        while let Some(next) = Board::offset(cur, 0, step) {
            match self.board.get(next) {
                None => cur = next,
                Some(p) if p == Piece::new(PieceType::King, color) => {
                    if let Some(to) = Board::offset(next, 0, -2 * step) {
                        moves.push(Move::with_kind(next, to, self.board, MoveKind::Castle));
                    }
                    return;
                }
                Some(_) => return,
            }
        }
    }
}
