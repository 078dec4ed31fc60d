//! Long algebraic move text (`e2e4`, `e7e8q`) in and out of the engine.

use crate::errors::MoveParseError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::move_validation::validate_move;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

#[inline]
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Split move text into its squares and promotion piece without looking at a board.
pub fn parse_long_algebraic(
    text: &str,
) -> Result<(Square, Square, Option<PieceKind>), MoveParseError> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(MoveParseError::Length(text.to_owned()));
    }
    let lower = text.to_ascii_lowercase();

    let from = algebraic_to_square(&lower[0..2])
        .ok_or_else(|| MoveParseError::Square(lower[0..2].to_owned()))?;
    let to = algebraic_to_square(&lower[2..4])
        .ok_or_else(|| MoveParseError::Square(lower[2..4].to_owned()))?;

    let promotion = match lower.as_bytes().get(4) {
        None => None,
        Some(&letter) => Some(char_to_promotion(letter as char)?),
    };

    Ok((from, to, promotion))
}

/// Parse `text` and validate it against the position.
pub fn long_algebraic_to_move(game_state: &GameState, text: &str) -> Result<Move, MoveParseError> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    validate_move(game_state, from, to, promotion)
}

/// Play a whitespace-separated list of moves.
///
/// Stops at the first invalid token; moves before it stay applied. Returns
/// the number of moves played.
pub fn apply_move_list(game_state: &mut GameState, moves: &str) -> Result<usize, MoveParseError> {
    let mut applied = 0;
    for token in moves.split_whitespace() {
        let mv = long_algebraic_to_move(game_state, token).map_err(|err| {
            log::warn!("rejecting move {token:?} after {applied} moves: {err}");
            err
        })?;
        if !make_move(game_state, mv) {
            // validate_move already proved the move legal.
            return Err(MoveParseError::LeavesKingInCheck(mv.to_string()));
        }
        applied += 1;
    }
    Ok(applied)
}

fn char_to_promotion(ch: char) -> Result<PieceKind, MoveParseError> {
    match ch {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(MoveParseError::PromotionLetter(ch)),
    }
}
