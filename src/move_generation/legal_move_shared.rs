//! Pieces of move generation shared by every per-piece generator.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{Move, MoveContext};

/// Which destination squares a generation pass may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenTarget {
    /// Every square not holding an own piece.
    All,
    /// Opponent-occupied squares, plus push promotions and en passant.
    Captures,
    /// Empty squares, excluding push promotions, including castling.
    Quiet,
}

impl GenTarget {
    #[inline]
    pub fn includes_captures(self) -> bool {
        matches!(self, GenTarget::All | GenTarget::Captures)
    }

    #[inline]
    pub fn includes_quiets(self) -> bool {
        matches!(self, GenTarget::All | GenTarget::Quiet)
    }

    /// Destination mask for non-pawn pieces.
    #[inline]
    pub fn mask(self, game_state: &GameState) -> Bitboard {
        let us = game_state.side_to_move;
        match self {
            GenTarget::All => !game_state.pieces_of(us),
            GenTarget::Captures => game_state.pieces_of(us.opposite()),
            GenTarget::Quiet => !game_state.occupancy(),
        }
    }
}

/// Build a move for the piece on `from`, reading any capture off `to`.
#[inline]
pub fn build_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Option<Move> {
    let moved = game_state.piece_at(from)?;
    Some(Move::new(
        from,
        to,
        moved,
        game_state.piece_at(to),
        promotion,
        MoveContext::of(game_state),
    ))
}

/// Push one move per destination in `targets` for the piece on `from`.
#[inline]
pub fn push_moves_to(game_state: &GameState, from: Square, targets: Bitboard, out: &mut Vec<Move>) {
    for to in targets {
        if let Some(mv) = build_move(game_state, from, to, None) {
            out.push(mv);
        }
    }
}
