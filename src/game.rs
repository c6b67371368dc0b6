use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::board::{Board, Square};
use crate::castling::CastlingRights;
use crate::error::{GameError, GameResult};
use crate::movegen::{EnPassant, MoveGen};
use crate::moves::{Move, MoveKind};
use crate::piece::{Color, Piece, PieceType};
use crate::rules::Rules;

/// One applied move plus the state it overwrote, so undo can restore
/// castling rights and the en passant window as well as the pieces.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct LogEntry {
    pub mv: Move,
    /// Piece chosen when this move triggered a promotion.
    pub promoted_to: Option<PieceType>,
    castling_before: CastlingRights,
    en_passant_before: Option<EnPassant>,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    move_log: Vec<LogEntry>,
    en_passant: Option<EnPassant>,
    pending_promotion: Option<Square>,
    castling_rights: CastlingRights,
    rules: Rules,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, white to move, all castling rights.
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        GameState {
            board: Board::new(),
            side_to_move: Color::White,
            move_log: Vec::new(),
            en_passant: None,
            pending_promotion: None,
            castling_rights: CastlingRights::all(),
            rules,
        }
    }

    /// Start from an arbitrary position. Castling rights are kept only for
    /// corners that still hold a rook with its king on the same rank.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let mut rights = CastlingRights::all();
        for color in [Color::White, Color::Black] {
            let back = color.back_rank();
            if board.get((back, 4)) != Some(Piece::new(PieceType::King, color)) {
                rights.revoke_color(color);
            }
            for col in [0, 7] {
                if board.get((back, col)) != Some(Piece::new(PieceType::Rook, color)) {
                    rights.revoke_square((back, col));
                }
            }
        }
        GameState {
            board,
            side_to_move,
            castling_rights: rights,
            ..Self::new()
        }
    }

    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn move_log(&self) -> &[LogEntry] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_log.last().map(|e| &e.mv)
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// En passant window, if it was granted by the last move in the log.
    fn live_en_passant(&self) -> Option<EnPassant> {
        if !self.rules.en_passant {
            return None;
        }
        self.en_passant.filter(|ep| ep.granted_at == self.move_log.len())
    }

    /// Square a pawn could capture onto en passant right now.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.live_en_passant().map(|ep| ep.target)
    }

    fn move_gen(&self) -> MoveGen<'_> {
        let gen = MoveGen::new(&self.board).with_en_passant(self.live_en_passant());
        if self.rules.castling {
            gen.with_castling(&self.castling_rights)
        } else {
            gen
        }
    }

    /// Every pseudo-legal move for the side to move. Empty while a
    /// promotion is pending.
    pub fn get_valid_moves(&self) -> Vec<Move> {
        if self.pending_promotion.is_some() {
            return Vec::new();
        }
        let mut moves = self.move_gen().moves_for(self.side_to_move);
        if self.rules.filter_king_captures {
            moves.retain(|m| m.piece_captured.map(|p| p.piece_type) != Some(PieceType::King));
        }
        trace!(side = ?self.side_to_move, count = moves.len(), "generated moves");
        moves
    }

    /// Destinations reachable from `from`, for move highlighting.
    pub fn valid_destinations(&self, from: Square) -> Vec<Square> {
        self.get_valid_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.to)
            .collect()
    }

    /// Look up the generated move between two squares and apply it.
    pub fn try_move(&mut self, from: Square, to: Square) -> GameResult<Move> {
        if let Some(square) = self.pending_promotion {
            return Err(GameError::PromotionPending { square });
        }
        let mv = self
            .get_valid_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .ok_or(GameError::IllegalMove { from, to })?;
        self.apply(&mv)?;
        Ok(mv)
    }

    /// Apply a move without checking it against the generator. The move's
    /// kind decides the side effects; `Move::new` reads it off the board.
    pub fn apply(&mut self, mv: &Move) -> GameResult<()> {
        if let Some(square) = self.pending_promotion {
            warn!(?square, "move attempted while promotion pending");
            return Err(GameError::PromotionPending { square });
        }
        if let Some(square) = [mv.from, mv.to].into_iter().find(|&sq| !Board::contains(sq)) {
            warn!(?square, "move leaves the board");
            return Err(GameError::OffBoard { square });
        }
        let piece = self
            .board
            .get(mv.from)
            .ok_or(GameError::EmptySquare { square: mv.from })?;
        if piece.color != self.side_to_move {
            return Err(GameError::WrongSide { square: mv.from });
        }

        self.move_log.push(LogEntry {
            mv: *mv,
            promoted_to: None,
            castling_before: self.castling_rights,
            en_passant_before: self.en_passant,
        });

        if mv.kind == MoveKind::EnPassant {
            self.board.set(mv.captured_square(), None);
        }
        self.board.set(mv.to, Some(piece));
        self.board.set(mv.from, None);

        if let Some((rook_from, rook_to)) = mv.castling_rook() {
            let rook = self.board.get(rook_from);
            self.board.set(rook_to, rook);
            self.board.set(rook_from, None);
        }

        // Castling rights
        match piece.piece_type {
            PieceType::King => self.castling_rights.revoke_color(piece.color),
            PieceType::Rook => self.castling_rights.revoke_square(mv.from),
            _ => {}
        }
        // A capture on a rook corner removes that rook.
        self.castling_rights.revoke_square(mv.to);

        // En passant window
        self.en_passant = if mv.kind == MoveKind::DoublePush {
            let skipped = ((mv.from.0 + mv.to.0) / 2, mv.from.1);
            Some(EnPassant {
                target: skipped,
                victim: mv.to,
                granted_at: self.move_log.len(),
            })
        } else {
            None
        };

        if piece.piece_type == PieceType::Pawn && mv.to.0 == piece.color.promotion_rank() {
            self.pending_promotion = Some(mv.to);
        }

        self.side_to_move = self.side_to_move.opposite();
        debug!(
            mv = %mv.notation(),
            kind = ?mv.kind,
            captured = ?mv.piece_captured.map(|p| p.code()),
            ply = self.move_log.len(),
            "applied move"
        );
        Ok(())
    }

    /// Replace the pawn awaiting promotion with `piece_type`.
    pub fn promote(&mut self, piece_type: PieceType) -> GameResult<()> {
        let square = self.pending_promotion.ok_or(GameError::NoPromotionPending)?;
        if !piece_type.is_promotion_choice() {
            warn!(?piece_type, "rejected promotion choice");
            return Err(GameError::InvalidPromotion { piece_type });
        }
        let pawn = self
            .board
            .get(square)
            .ok_or(GameError::EmptySquare { square })?;
        self.board.set(square, Some(Piece::new(piece_type, pawn.color)));
        if let Some(entry) = self.move_log.last_mut() {
            entry.promoted_to = Some(piece_type);
        }
        self.pending_promotion = None;
        debug!(?square, ?piece_type, "promoted pawn");
        Ok(())
    }

    /// Take back the last move. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let entry = self.move_log.pop()?;
        let mv = entry.mv;

        self.board.set(mv.to, None);
        self.board.set(mv.captured_square(), mv.piece_captured);
        self.board.set(mv.from, mv.piece_moved);

        if let Some((rook_from, rook_to)) = mv.castling_rook() {
            let rook = self.board.get(rook_to);
            self.board.set(rook_from, rook);
            self.board.set(rook_to, None);
        }

        self.castling_rights = entry.castling_before;
        self.en_passant = entry.en_passant_before;
        self.pending_promotion = None;
        self.side_to_move = self.side_to_move.opposite();
        debug!(mv = %mv.notation(), ply = self.move_log.len(), "undid move");
        Some(mv)
    }
}
