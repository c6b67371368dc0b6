//! Serializable snapshot of a game for a UI layer.

use serde::Serialize;

use crate::board::Square;
use crate::game::GameState;
use crate::moves::{square_name, Move};
use crate::piece::Color;

#[derive(Serialize, Debug)]
pub struct MoveView {
    pub from: [usize; 2],
    pub to: [usize; 2],
    pub notation: String,
}

impl From<&Move> for MoveView {
    fn from(m: &Move) -> Self {
        MoveView {
            from: [m.from.0, m.from.1],
            to: [m.to.0, m.to.1],
            notation: m.notation(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct BoardView {
    /// Piece codes such as "wP", `None` for empty squares.
    pub squares: Vec<Vec<Option<String>>>,
    pub side_to_move: Color,
    pub pending_promotion: Option<[usize; 2]>,
    pub en_passant_target: Option<String>,
    pub legal_moves: Vec<MoveView>,
    pub last_move: Option<MoveView>,
    pub move_count: usize,
}

fn pair((r, c): Square) -> [usize; 2] {
    [r, c]
}

impl BoardView {
    pub fn from_game(game: &GameState) -> Self {
        let squares = game
            .board()
            .squares
            .iter()
            .map(|row| row.iter().map(|sq| sq.map(|p| p.code())).collect())
            .collect();

        BoardView {
            squares,
            side_to_move: game.side_to_move(),
            pending_promotion: game.pending_promotion().map(pair),
            en_passant_target: game.en_passant_target().map(square_name),
            legal_moves: game.get_valid_moves().iter().map(MoveView::from).collect(),
            last_move: game.last_move().map(MoveView::from),
            move_count: game.move_log().len(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
