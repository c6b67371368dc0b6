use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::piece::{Piece, PieceType};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum MoveKind {
    Normal,
    /// Two-square pawn advance from its home rank; opens an en passant window.
    DoublePush,
    /// Pawn capture onto the square an opponent pawn just skipped.
    EnPassant,
    /// King move of two squares; the rook jumps to the square crossed.
    Castle,
}

/// A move with the board contents it was built from. `piece_moved` and
/// `piece_captured` are taken when the move is constructed and never
/// recomputed, so undo can put back exactly what was there.
///
/// Equality only looks at `from` and `to`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece_moved: Option<Piece>,
    pub piece_captured: Option<Piece>,
    pub kind: MoveKind,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
    }
}

impl Move {
    /// Build a move from two squares, reading its kind off the board: a king
    /// stepping two columns castles, a pawn stepping two rows double-pushes,
    /// and a pawn stepping diagonally onto an empty square captures en passant.
    pub fn new(from: Square, to: Square, board: &Board) -> Move {
        Move::with_kind(from, to, board, classify(from, to, board))
    }

    pub fn with_kind(from: Square, to: Square, board: &Board, kind: MoveKind) -> Move {
        let captured_square = match kind {
            MoveKind::EnPassant => (from.0, to.1),
            _ => to,
        };
        Move {
            from,
            to,
            piece_moved: board.get(from),
            piece_captured: board.get(captured_square),
            kind,
        }
    }

    /// Square the captured piece stood on. Differs from `to` only for
    /// en passant, where the victim sits beside the capturing pawn.
    pub fn captured_square(&self) -> Square {
        match self.kind {
            MoveKind::EnPassant => (self.from.0, self.to.1),
            _ => self.to,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Rook relocation `(from, to)` for a castling move.
    pub fn castling_rook(&self) -> Option<(Square, Square)> {
        if self.kind != MoveKind::Castle {
            return None;
        }
        let row = self.from.0;
        if self.to.1 > self.from.1 {
            Some(((row, 7), (row, self.to.1 - 1)))
        } else {
            Some(((row, 0), (row, self.to.1 + 1)))
        }
    }

    /// Identity key derived from the squares, e.g. 6444 for (6,4)->(4,4).
    pub fn move_id(&self) -> u16 {
        (self.from.0 * 1000 + self.from.1 * 100 + self.to.0 * 10 + self.to.1) as u16
    }

    /// Coordinate notation, e.g. "e2e4". Row 7 is rank 1.
    pub fn notation(&self) -> String {
        format!("{}{}", square_name(self.from), square_name(self.to))
    }
}

fn classify(from: Square, to: Square, board: &Board) -> MoveKind {
    let Some(piece) = board.get(from) else {
        return MoveKind::Normal;
    };
    let rows = from.0.abs_diff(to.0);
    let cols = from.1.abs_diff(to.1);
    match piece.piece_type {
        PieceType::King if rows == 0 && cols == 2 => MoveKind::Castle,
        PieceType::Pawn if rows == 2 && cols == 0 => MoveKind::DoublePush,
        PieceType::Pawn if rows == 1 && cols == 1 && board.is_empty(to) => MoveKind::EnPassant,
        _ => MoveKind::Normal,
    }
}

pub fn square_name((row, col): Square) -> String {
    let file = (b'a' + col as u8) as char;
    let rank = (b'8' - row as u8) as char;
    format!("{file}{rank}")
}

/// Parse coordinate notation such as "e2e4" into its two squares.
pub fn parse_notation(text: &str) -> Option<(Square, Square)> {
    if text.len() != 4 || !text.is_ascii() {
        return None;
    }
    Some((parse_square(&text[..2])?, parse_square(&text[2..])?))
}

/// Parse a square name such as "e2".
pub fn parse_square(name: &str) -> Option<Square> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(((b'8' - rank) as usize, (file - b'a') as usize))
}
