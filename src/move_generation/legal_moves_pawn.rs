//! Pawn pseudo-legal moves: pushes, double pushes, captures, promotions and en passant.

use crate::game_state::chess_rules::{pawn_push_delta, pawn_start_rank, promotion_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::en_passant_victim_square;
use crate::move_generation::legal_move_shared::{build_move, GenTarget};
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::{Move, MoveContext};

pub fn generate_pawn_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    let us = game_state.side_to_move;
    let them = us.opposite();
    let empty = !game_state.occupancy();
    let enemies = game_state.pieces_of(them);
    let delta = pawn_push_delta(us);

    for from in game_state.pieces(us, PieceKind::Pawn) {
        let single = (from as i8 + delta) as Square;
        if empty.test(single) {
            if square_rank(single) == promotion_rank(us) {
                // Push promotions are noisy and belong to the capture pass.
                if target.includes_captures() {
                    push_promotions(game_state, from, single, out);
                }
            } else if target.includes_quiets() {
                push_plain(game_state, from, single, out);

                let double = (single as i8 + delta) as Square;
                if square_rank(from) == pawn_start_rank(us) && empty.test(double) {
                    push_plain(game_state, from, double, out);
                }
            }
        }

        if !target.includes_captures() {
            continue;
        }

        let attacks = pawn_attacks(us, from);
        for to in attacks & enemies {
            if square_rank(to) == promotion_rank(us) {
                push_promotions(game_state, from, to, out);
            } else {
                push_plain(game_state, from, to, out);
            }
        }

        if let Some(ep) = game_state.en_passant_square {
            let victim = Piece::new(them, PieceKind::Pawn);
            let victim_in_place = game_state.piece_at(en_passant_victim_square(ep, us)) == Some(victim);
            if attacks.test(ep) && empty.test(ep) && victim_in_place {
                out.push(Move::en_passant(
                    from,
                    ep,
                    Piece::new(us, PieceKind::Pawn),
                    victim,
                    MoveContext::of(game_state),
                ));
            }
        }
    }
}

#[inline]
fn push_plain(game_state: &GameState, from: Square, to: Square, out: &mut Vec<Move>) {
    if let Some(mv) = build_move(game_state, from, to, None) {
        out.push(mv);
    }
}

#[inline]
fn push_promotions(game_state: &GameState, from: Square, to: Square, out: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        if let Some(mv) = build_move(game_state, from, to, Some(kind)) {
            out.push(mv);
        }
    }
}
