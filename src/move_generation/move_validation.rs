//! Verification of externally supplied moves.
//!
//! The generator never builds a move it has not derived from attack sets.
//! Moves arriving as text are different: every rule is checked again here
//! from the board alone before the move is allowed anywhere near search.

use crate::errors::MoveParseError;
use crate::game_state::chess_rules::{
    castling_lane_for, pawn_push_delta, pawn_start_rank, promotion_rank,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{en_passant_victim_square, make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use crate::moves::chess_move::{Move, MoveContext};
use crate::utils::algebraic::square_to_algebraic;

fn illegal(from: Square, to: Square, reason: &'static str) -> MoveParseError {
    MoveParseError::IllegalShape {
        text: format!("{}{}", square_to_algebraic(from), square_to_algebraic(to)),
        reason,
    }
}

/// Check `from -> to` (with optional promotion) against the position and
/// return the fully described move. The position is not changed.
pub fn validate_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Move, MoveParseError> {
    let us = game_state.side_to_move;

    let moved = game_state
        .piece_at(from)
        .ok_or_else(|| MoveParseError::EmptyFrom(square_to_algebraic(from).to_owned()))?;
    if moved.color != us {
        return Err(MoveParseError::WrongColor(square_to_algebraic(from).to_owned()));
    }
    if from == to {
        return Err(illegal(from, to, "source and destination are the same square"));
    }

    let captured = game_state.piece_at(to);
    let mut en_passant_victim = None;
    match captured {
        Some(piece) if piece.color == us => {
            return Err(illegal(from, to, "destination holds an own piece"));
        }
        Some(piece) if piece.kind == PieceKind::King => {
            return Err(illegal(from, to, "the king cannot be captured"));
        }
        _ => {}
    }

    if moved.kind != PieceKind::Pawn && promotion.is_some() {
        return Err(illegal(from, to, "only pawns promote"));
    }

    let occupancy = game_state.occupancy();
    match moved.kind {
        PieceKind::Pawn => {
            en_passant_victim = validate_pawn_move(game_state, from, to)?;
            let reaches_last_rank = square_rank(to) == promotion_rank(us);
            match promotion {
                None if reaches_last_rank => {
                    return Err(illegal(from, to, "missing promotion piece"));
                }
                Some(_) if !reaches_last_rank => {
                    return Err(illegal(from, to, "promotion only on the last rank"));
                }
                Some(PieceKind::Pawn | PieceKind::King) => {
                    return Err(illegal(from, to, "cannot promote to that piece"));
                }
                _ => {}
            }
        }
        PieceKind::Knight => {
            if !knight_attacks(from).test(to) {
                return Err(illegal(from, to, "knight cannot move there"));
            }
        }
        PieceKind::Bishop => {
            if !bishop_attacks(from, occupancy).test(to) {
                return Err(illegal(from, to, "bishop cannot move there"));
            }
        }
        PieceKind::Rook => {
            if !rook_attacks(from, occupancy).test(to) {
                return Err(illegal(from, to, "rook cannot move there"));
            }
        }
        PieceKind::Queen => {
            if !queen_attacks(from, occupancy).test(to) {
                return Err(illegal(from, to, "queen cannot move there"));
            }
        }
        PieceKind::King => {
            if from.abs_diff(to) == 2 && square_rank(from) == square_rank(to) {
                validate_castling(game_state, from, to)?;
            } else if !king_attacks(from).test(to) {
                return Err(illegal(from, to, "king cannot move there"));
            }
        }
    }

    let context = MoveContext::of(game_state);
    let mv = match en_passant_victim {
        Some(victim) => Move::en_passant(from, to, moved, victim, context),
        None => Move::new(from, to, moved, captured, promotion, context),
    };

    let mut probe = game_state.clone();
    if !make_move(&mut probe, mv) {
        return Err(MoveParseError::LeavesKingInCheck(mv.to_string()));
    }
    unmake_move(&mut probe, mv);

    Ok(mv)
}

/// Pawn geometry. Returns the en passant victim when the move is one.
fn validate_pawn_move(
    game_state: &GameState,
    from: Square,
    to: Square,
) -> Result<Option<Piece>, MoveParseError> {
    let us = game_state.side_to_move;
    let them = us.opposite();
    let empty = !game_state.occupancy();
    let delta = pawn_push_delta(us);
    let single = (from as i8 + delta) as Square;

    if square_file(from) == square_file(to) {
        if to == single && empty.test(to) {
            return Ok(None);
        }
        let double = (single as i8 + delta) as Square;
        if to == double && square_rank(from) == pawn_start_rank(us) {
            if empty.test(single) && empty.test(double) {
                return Ok(None);
            }
            return Err(illegal(from, to, "pawn push is blocked"));
        }
        if to == single {
            return Err(illegal(from, to, "pawn push is blocked"));
        }
        return Err(illegal(from, to, "pawn cannot move there"));
    }

    if !pawn_attacks(us, from).test(to) {
        return Err(illegal(from, to, "pawn cannot move there"));
    }
    if game_state.piece_at(to).is_some() {
        return Ok(None);
    }
    if game_state.en_passant_square == Some(to) {
        let victim = game_state.piece_at(en_passant_victim_square(to, us));
        if victim == Some(Piece::new(them, PieceKind::Pawn)) {
            return Ok(victim);
        }
    }
    Err(illegal(from, to, "pawn captures need a target"))
}

fn validate_castling(game_state: &GameState, from: Square, to: Square) -> Result<(), MoveParseError> {
    let us = game_state.side_to_move;
    let lane = castling_lane_for(from, to)
        .filter(|lane| lane.right & castling_rights_for(us) != 0)
        .ok_or_else(|| illegal(from, to, "king cannot move there"))?;

    if game_state.castling_rights & lane.right == 0 {
        return Err(illegal(from, to, "castling right has been lost"));
    }
    if game_state.piece_at(lane.rook_from) != Some(Piece::new(us, PieceKind::Rook)) {
        return Err(illegal(from, to, "no rook to castle with"));
    }
    if (lane.between & game_state.occupancy()).is_not_empty() {
        return Err(illegal(from, to, "pieces stand between king and rook"));
    }
    if lane
        .king_path
        .iter()
        .any(|&square| is_square_attacked(game_state, square, us.opposite()))
    {
        return Err(illegal(from, to, "king passes through an attacked square"));
    }
    Ok(())
}
