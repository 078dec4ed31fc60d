//! Canonical chess-rule constants.
//!
//! Starting position, home squares used by castling, and the per-square
//! castling-right masks applied on every move.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Geometry of one castling move.
#[derive(Debug, Clone, Copy)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty.
    pub between: Bitboard,
    /// Squares the king stands on, crosses, or lands on.
    pub king_path: [Square; 3],
}

const fn mask(squares: &[Square]) -> Bitboard {
    let mut bits = 0u64;
    let mut i = 0;
    while i < squares.len() {
        bits |= 1u64 << squares[i];
        i += 1;
    }
    Bitboard(bits)
}

pub const LIGHT_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_LIGHT_KINGSIDE,
    king_from: E1,
    king_to: G1,
    rook_from: H1,
    rook_to: F1,
    between: mask(&[F1, G1]),
    king_path: [E1, F1, G1],
};

pub const LIGHT_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_LIGHT_QUEENSIDE,
    king_from: E1,
    king_to: C1,
    rook_from: A1,
    rook_to: D1,
    between: mask(&[B1, C1, D1]),
    king_path: [E1, D1, C1],
};

pub const DARK_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_DARK_KINGSIDE,
    king_from: E8,
    king_to: G8,
    rook_from: H8,
    rook_to: F8,
    between: mask(&[F8, G8]),
    king_path: [E8, F8, G8],
};

pub const DARK_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_DARK_QUEENSIDE,
    king_from: E8,
    king_to: C8,
    rook_from: A8,
    rook_to: D8,
    between: mask(&[B8, C8, D8]),
    king_path: [E8, D8, C8],
};

#[inline]
pub const fn castling_lanes(color: Color) -> [CastlingLane; 2] {
    match color {
        Color::Light => [LIGHT_KINGSIDE, LIGHT_QUEENSIDE],
        Color::Dark => [DARK_KINGSIDE, DARK_QUEENSIDE],
    }
}

/// The lane a king move `from -> to` belongs to, if it is a castling move.
#[inline]
pub fn castling_lane_for(from: Square, to: Square) -> Option<CastlingLane> {
    [LIGHT_KINGSIDE, LIGHT_QUEENSIDE, DARK_KINGSIDE, DARK_QUEENSIDE]
        .into_iter()
        .find(|lane| lane.king_from == from && lane.king_to == to)
}

/// Rights lost when a piece leaves or lands on `square`.
///
/// Covers king moves, rook moves from home, and captures of a rook on its home square.
#[inline]
pub const fn castling_rights_touched_by(square: Square) -> CastlingRights {
    match square {
        A1 => CASTLE_LIGHT_QUEENSIDE,
        H1 => CASTLE_LIGHT_KINGSIDE,
        E1 => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        A8 => CASTLE_DARK_QUEENSIDE,
        H8 => CASTLE_DARK_KINGSIDE,
        E8 => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
        _ => 0,
    }
}

/// Rank index a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

/// Rank index a pawn of `color` starts on.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

/// Signed square step for one pawn push.
#[inline]
pub const fn pawn_push_delta(color: Color) -> i8 {
    match color {
        Color::Light => 8,
        Color::Dark => -8,
    }
}
