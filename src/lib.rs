pub mod board;
pub mod castling;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::{Board, Square};
pub use error::{GameError, GameResult};
pub use game::GameState;
pub use moves::{Move, MoveKind};
pub use piece::{Color, Piece, PieceType};
pub use rules::Rules;
