use serde::{Deserialize, Serialize};

use crate::board::Square;
use crate::piece::Color;

/// Castling rights, one per rook origin square. Once revoked a right is
/// never granted again; only undo puts a saved copy back.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastlingRights {
    pub fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    fn slot(&mut self, square: Square) -> Option<&mut bool> {
        match square {
            (7, 7) => Some(&mut self.white_kingside),
            (7, 0) => Some(&mut self.white_queenside),
            (0, 7) => Some(&mut self.black_kingside),
            (0, 0) => Some(&mut self.black_queenside),
            _ => None,
        }
    }

    /// Whether a rook of `color` standing on `square` may still castle.
    pub fn has(&self, color: Color, square: Square) -> bool {
        match (color, square) {
            (Color::White, (7, 7)) => self.white_kingside,
            (Color::White, (7, 0)) => self.white_queenside,
            (Color::Black, (0, 7)) => self.black_kingside,
            (Color::Black, (0, 0)) => self.black_queenside,
            _ => false,
        }
    }

    /// Drop the right tied to a rook origin square. Other squares are ignored.
    pub fn revoke_square(&mut self, square: Square) {
        if let Some(right) = self.slot(square) {
            *right = false;
        }
    }

    /// Drop both rights of a side, after its king moved.
    pub fn revoke_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Rook origin squares that still hold a right.
    pub fn squares(&self) -> Vec<Square> {
        let mut out = Vec::new();
        for (held, sq) in [
            (self.white_kingside, (7, 7)),
            (self.white_queenside, (7, 0)),
            (self.black_kingside, (0, 7)),
            (self.black_queenside, (0, 0)),
        ] {
            if held {
                out.push(sq);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rights_are_tied_to_rook_corners() {
        let mut rights = CastlingRights::all();
        assert!(rights.has(Color::White, (7, 0)));
        assert!(!rights.has(Color::Black, (7, 0)));
        assert!(!rights.has(Color::White, (7, 4)));

        rights.revoke_square((7, 0));
        assert!(!rights.has(Color::White, (7, 0)));
        assert!(rights.has(Color::White, (7, 7)));

        rights.revoke_square((4, 4));
        assert_eq!(rights.squares(), vec![(7, 7), (0, 7), (0, 0)]);
    }

    #[test]
    fn king_move_revokes_both_sides() {
        let mut rights = CastlingRights::all();
        rights.revoke_color(Color::Black);
        assert_eq!(rights.squares(), vec![(7, 7), (7, 0)]);
    }
}
