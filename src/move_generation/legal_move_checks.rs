//! Attack queries against the live board.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

/// Whether `color`'s king is attacked. A side without a king is never in check.
#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let king_sq = game_state.king_square_of(color);
    if king_sq == NO_SQUARE {
        return false;
    }
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let occupancy = game_state.occupancy();

    // A pawn of `attacker_color` attacks `square` exactly when a pawn of the
    // other color on `square` would attack it back.
    if (pawn_attacks(attacker_color.opposite(), square)
        & game_state.pieces(attacker_color, PieceKind::Pawn))
    .is_not_empty()
    {
        return true;
    }

    if (knight_attacks(square) & game_state.pieces(attacker_color, PieceKind::Knight)).is_not_empty()
    {
        return true;
    }

    if (king_attacks(square) & game_state.pieces(attacker_color, PieceKind::King)).is_not_empty() {
        return true;
    }

    let queens = game_state.pieces(attacker_color, PieceKind::Queen);
    let bishops_queens = game_state.pieces(attacker_color, PieceKind::Bishop) | queens;
    if (bishop_attacks(square, occupancy) & bishops_queens).is_not_empty() {
        return true;
    }

    let rooks_queens = game_state.pieces(attacker_color, PieceKind::Rook) | queens;
    (rook_attacks(square, occupancy) & rooks_queens).is_not_empty()
}

/// Every piece of either color attacking `square`, with sliders traced
/// through `occupancy` instead of the live board.
///
/// Pieces missing from `occupancy` are not masked out here; exchange
/// evaluation intersects the result with its own occupancy.
pub fn attackers_to_square(game_state: &GameState, square: Square, occupancy: Bitboard) -> Bitboard {
    let pawns = game_state.piece_bb[PieceKind::Pawn.index()];
    let queens = game_state.piece_bb[PieceKind::Queen.index()];
    let bishops_queens = game_state.piece_bb[PieceKind::Bishop.index()] | queens;
    let rooks_queens = game_state.piece_bb[PieceKind::Rook.index()] | queens;

    (pawn_attacks(Color::Dark, square) & pawns & game_state.pieces_of(Color::Light))
        | (pawn_attacks(Color::Light, square) & pawns & game_state.pieces_of(Color::Dark))
        | (knight_attacks(square) & game_state.piece_bb[PieceKind::Knight.index()])
        | (king_attacks(square) & game_state.piece_bb[PieceKind::King.index()])
        | (bishop_attacks(square, occupancy) & bishops_queens)
        | (rook_attacks(square, occupancy) & rooks_queens)
}
