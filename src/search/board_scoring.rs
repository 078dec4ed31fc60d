//! Pluggable board evaluation.
//!
//! Search only sees the `BoardScorer` trait, so evaluation heuristics can be
//! swapped without touching the search code.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Score of being mated at the root. Mate at ply `n` scores `MATE_SCORE - n`.
pub const MATE_SCORE: i32 = 30000;

/// Scores at or beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&kind| {
                let light = game_state.piece_count(Piece::new(Color::Light, kind)) as i32;
                let dark = game_state.piece_count(Piece::new(Color::Dark, kind)) as i32;
                (light - dark) * Self::piece_value(kind)
            })
            .sum()
    }
}

#[inline]
fn from_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move {
        Color::Light => white_minus_black,
        Color::Dark => -white_minus_black,
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        from_side_to_move(
            game_state,
            Self::material_balance_white_minus_black(game_state),
        )
    }
}

/// Material plus a small per-square placement bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    fn positional_term(game_state: &GameState) -> i32 {
        let mut score = 0i32;
        for square in 0..64u8 {
            if let Some(piece) = game_state.piece_at(square) {
                let sign = if piece.color == Color::Light { 1 } else { -1 };
                score += sign * piece_square_bonus(piece.kind, piece.color, square);
            }
        }
        score
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let material = MaterialScorer::material_balance_white_minus_black(game_state);
        from_side_to_move(game_state, material + Self::positional_term(game_state))
    }
}

fn piece_square_bonus(piece: PieceKind, color: Color, sq: Square) -> i32 {
    let rank = square_rank(sq) as i32;
    let file = square_file(sq) as i32;
    let r = if color == Color::Light {
        rank
    } else {
        7 - rank
    };
    let dist_center = (file - 3).abs().min((file - 4).abs()) + (r - 3).abs().min((r - 4).abs());
    let center_bonus = 4 - dist_center;

    match piece {
        PieceKind::Pawn => r * 8 - (file * 2 - 7).abs(),
        PieceKind::Knight => center_bonus * 6,
        PieceKind::Bishop => center_bonus * 4 + r,
        PieceKind::Rook => r * 2,
        PieceKind::Queen => center_bonus * 2,
        // Mild preference for a king tucked away on its own back ranks.
        PieceKind::King => {
            if r <= 1 {
                8 - (file * 2 - 7).abs()
            } else {
                -center_bonus * 4
            }
        }
    }
}
