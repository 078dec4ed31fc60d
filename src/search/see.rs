//! Static exchange evaluation.
//!
//! Plays out every capture on one square, cheapest attacker first, on a
//! scratch occupancy set. The board itself is never touched.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::en_passant_victim_square;
use crate::move_generation::legal_move_checks::attackers_to_square;
use crate::moves::chess_move::Move;

/// Exchange values. The king is priced so that losing it outweighs any trade.
#[inline]
pub const fn see_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

// 32 pieces can never produce a longer capture sequence.
const MAX_EXCHANGE: usize = 32;

#[inline]
pub fn see_move(game_state: &GameState, mv: Move) -> i32 {
    see(game_state, mv.from(), mv.to())
}

/// Net material the side moving `from -> to` wins on `to` when both sides
/// keep recapturing with their cheapest piece and may stop at any point.
pub fn see(game_state: &GameState, from: Square, to: Square) -> i32 {
    let Some(mover) = game_state.piece_at(from) else {
        return 0;
    };

    let mut occupancy = game_state.occupancy();
    let captured_value = match game_state.piece_at(to) {
        Some(victim) => see_value(victim.kind),
        // A diagonal pawn step onto an empty square is en passant.
        None if mover.kind == PieceKind::Pawn && square_file(from) != square_file(to) => {
            occupancy.clear(en_passant_victim_square(to, mover.color));
            see_value(PieceKind::Pawn)
        }
        None => 0,
    };

    occupancy.clear(from);
    let mut attackers = attackers_to_square(game_state, to, occupancy) & occupancy;
    let mut side = mover.color.opposite();
    if (attackers & game_state.pieces_of(side)).is_empty() {
        return captured_value;
    }

    let mut gains = [0i32; MAX_EXCHANGE];
    gains[0] = captured_value;
    let mut depth = 0usize;
    let mut on_square = see_value(mover.kind);

    while depth + 1 < MAX_EXCHANGE {
        let side_attackers = attackers & game_state.pieces_of(side);
        if side_attackers.is_empty() {
            break;
        }
        let (square, kind) = least_valuable_attacker(game_state, side, side_attackers);

        depth += 1;
        gains[depth] = on_square - gains[depth - 1];

        // The king may only take last.
        if kind == PieceKind::King && (attackers & game_state.pieces_of(side.opposite())).is_not_empty() {
            depth -= 1;
            break;
        }

        occupancy.clear(square);
        attackers = attackers_to_square(game_state, to, occupancy) & occupancy;
        on_square = see_value(kind);
        side = side.opposite();
    }

    while depth > 0 {
        gains[depth - 1] = gains[depth - 1].min(-gains[depth]);
        depth -= 1;
    }
    gains[0]
}

fn least_valuable_attacker(game_state: &GameState, side: Color, attackers: Bitboard) -> (Square, PieceKind) {
    for kind in PieceKind::ALL {
        if let Some(square) = (attackers & game_state.pieces(side, kind)).lowest() {
            return (square, kind);
        }
    }
    panic!("attacker set {attackers:?} of {side:?} holds no piece of that side");
}
