use crate::game::GameState;
use crate::piece::PieceType;
use crate::rules::Rules;
use crate::view::BoardView;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardView>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SquareMoveJson {
    to: [usize; 2],
}

fn string_to_piece_type(s: &str) -> Option<PieceType> {
    match s {
        "Queen" => Some(PieceType::Queen),
        "Rook" => Some(PieceType::Rook),
        "Bishop" => Some(PieceType::Bishop),
        "Knight" => Some(PieceType::Knight),
        _ => None,
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Game {
    state: GameState,
}

impl Game {
    fn result(&self, outcome: Result<(), String>) -> JsValue {
        let result = match outcome {
            Ok(()) => MoveResult {
                board_state: Some(BoardView::from_game(&self.state)),
                error: None,
            },
            Err(error) => MoveResult {
                board_state: None,
                error: Some(error),
            },
        };
        to_js(&result)
    }
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            state: GameState::new(),
        }
    }

    /// Start a game with rule toggles given as JSON, e.g. `{"castling": false}`.
    pub fn with_rules(json: &str) -> Result<Game, JsValue> {
        let rules = Rules::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Game {
            state: GameState::with_rules(rules),
        })
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&BoardView::from_game(&self.state))
    }

    pub fn make_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    ) -> JsValue {
        let outcome = self
            .state
            .try_move((from_row, from_col), (to_row, to_col))
            .map(|_| ())
            .map_err(|e| e.to_string());
        self.result(outcome)
    }

    pub fn promote(&mut self, piece: &str) -> JsValue {
        let outcome = match string_to_piece_type(piece) {
            Some(pt) => self.state.promote(pt).map_err(|e| e.to_string()),
            None => Err(format!("Unknown promotion piece: {piece}")),
        };
        self.result(outcome)
    }

    pub fn undo(&mut self) -> JsValue {
        self.state.undo();
        self.get_board_state()
    }

    pub fn get_legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        let square_moves: Vec<SquareMoveJson> = self
            .state
            .valid_destinations((row, col))
            .into_iter()
            .map(|(r, c)| SquareMoveJson { to: [r, c] })
            .collect();

        to_js(&square_moves)
    }
}
