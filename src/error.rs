//! Error types for game state operations.

use crate::board::Square;
use crate::piece::PieceType;

/// Caller contract violations. A failed operation leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("a promotion is pending on {square:?}; choose a piece first")]
    PromotionPending { square: Square },

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("cannot promote to {piece_type:?}")]
    InvalidPromotion { piece_type: PieceType },

    #[error("square {square:?} is off the board")]
    OffBoard { square: Square },

    #[error("no piece on {square:?}")]
    EmptySquare { square: Square },

    #[error("piece on {square:?} does not belong to the side to move")]
    WrongSide { square: Square },

    #[error("illegal move from {from:?} to {to:?}")]
    IllegalMove { from: Square, to: Square },

    #[error("invalid piece code {code:?}")]
    InvalidPieceCode { code: String },

    #[error("invalid board row {row:?}: expected 8 squares")]
    InvalidRow { row: String },
}

pub type GameResult<T> = Result<T, GameError>;
