use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::piece::{Color, Piece, PieceType};

/// Zero-indexed `(row, col)`. Row 0 is black's back rank, row 7 is white's.
pub type Square = (usize, usize);

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn new() -> Self {
        let mut board = Board::empty();

        // Black pieces (rows 0-1)
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(pt, Color::Black));
        }
        for sq in &mut board.squares[1] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::Black));
        }

        // White pieces (rows 6-7)
        for sq in &mut board.squares[6] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::White));
        }
        for (col, &pt) in BACK_RANK.iter().enumerate() {
            board.squares[7][col] = Some(Piece::new(pt, Color::White));
        }

        board
    }

    /// Parse eight rows of space-separated piece codes, `--` for an empty
    /// square, top row first:
    ///
    /// ```
    /// use chess_core::board::Board;
    /// let board = Board::from_rows(&[
    ///     "bR bN bB bQ bK bB bN bR",
    ///     "bP bP bP bP bP bP bP bP",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "wP wP wP wP wP wP wP wP",
    ///     "wR wN wB wQ wK wB wN wR",
    /// ]).unwrap();
    /// assert_eq!(board, Board::new());
    /// ```
    pub fn from_rows(rows: &[&str; 8]) -> GameResult<Board> {
        let mut board = Board::empty();
        for (r, row) in rows.iter().enumerate() {
            let codes: Vec<&str> = row.split_whitespace().collect();
            if codes.len() != 8 {
                return Err(GameError::InvalidRow {
                    row: row.to_string(),
                });
            }
            for (c, code) in codes.into_iter().enumerate() {
                if code == "--" {
                    continue;
                }
                let piece = Piece::from_code(code).ok_or_else(|| GameError::InvalidPieceCode {
                    code: code.to_string(),
                })?;
                board.squares[r][c] = Some(piece);
            }
        }
        Ok(board)
    }

    pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    /// Offset a square, or `None` if the result falls off the board.
    pub fn offset(square: Square, dr: i32, dc: i32) -> Option<Square> {
        let r = square.0 as i32 + dr;
        let c = square.1 as i32 + dc;
        if Self::in_bounds(r, c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    pub fn contains((row, col): Square) -> bool {
        row < 8 && col < 8
    }

    /// Contents of `square`; off-board squares read as empty.
    pub fn get(&self, (row, col): Square) -> Option<Piece> {
        self.squares.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Off-board squares are ignored.
    pub fn set(&mut self, (row, col): Square, piece: Option<Piece>) {
        if let Some(sq) = self.squares.get_mut(row).and_then(|r| r.get_mut(col)) {
            *sq = piece;
        }
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Every occupied square holding a piece of `color`, row by row.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8usize)
            .flat_map(|r| (0..8usize).map(move |c| (r, c)))
            .filter_map(move |sq| match self.get(sq) {
                Some(p) if p.color == color => Some((sq, p)),
                _ => None,
            })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            let codes: Vec<String> = row
                .iter()
                .map(|sq| sq.map(|p| p.code()).unwrap_or_else(|| "--".to_string()))
                .collect();
            writeln!(f, "{}", codes.join(" "))?;
        }
        Ok(())
    }
}
