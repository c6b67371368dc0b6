use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this side's rooks and king at the start of the game.
    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row a pawn of this color promotes on.
    pub fn promotion_rank(self) -> usize {
        self.opposite().back_rank()
    }

    /// Row direction a pawn of this color advances in.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_home_rank(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Piece kinds a pawn may turn into.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceType> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece { piece_type, color }
    }

    /// Two-letter code such as `wP` or `bK`. The UI names its piece images
    /// after these codes.
    pub fn code(&self) -> String {
        format!("{}{}", self.color.code(), self.piece_type.letter())
    }

    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.chars();
        let color = match chars.next()? {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return None,
        };
        let piece_type = PieceType::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece::new(piece_type, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_asset_names() {
        assert_eq!(Piece::new(PieceType::Pawn, Color::White).code(), "wP");
        assert_eq!(Piece::new(PieceType::Knight, Color::Black).code(), "bN");
        assert_eq!(
            Piece::from_code("bQ"),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
        assert_eq!(Piece::from_code("--"), None);
        assert_eq!(Piece::from_code("wPx"), None);
        assert_eq!(Piece::from_code("xP"), None);
    }

    #[test]
    fn pawn_geometry_is_mirrored() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::White.pawn_home_rank(), 6);
        assert_eq!(Color::White.promotion_rank(), 0);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::Black.pawn_home_rank(), 1);
        assert_eq!(Color::Black.promotion_rank(), 7);
    }

    #[test]
    fn only_minor_and_major_pieces_are_promotion_choices() {
        assert!(PieceType::Queen.is_promotion_choice());
        assert!(PieceType::Knight.is_promotion_choice());
        assert!(!PieceType::Pawn.is_promotion_choice());
        assert!(!PieceType::King.is_promotion_choice());
    }
}
