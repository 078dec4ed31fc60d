//! Bishop, rook and queen pseudo-legal moves.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_moves_to, GenTarget};
use crate::moves::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Bishop, bishop_attacks, target, out);
}

pub fn generate_rook_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Rook, rook_attacks, target, out);
}

pub fn generate_queen_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, PieceKind::Queen, queen_attacks, target, out);
}

#[inline]
fn generate_slider_moves(
    game_state: &GameState,
    kind: PieceKind,
    attacks: fn(Square, Bitboard) -> Bitboard,
    target: GenTarget,
    out: &mut Vec<Move>,
) {
    let mask = target.mask(game_state);
    let occupancy = game_state.occupancy();
    for from in game_state.pieces(game_state.side_to_move, kind) {
        push_moves_to(game_state, from, attacks(from, occupancy) & mask, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fen: &str, generate: fn(&GameState, GenTarget, &mut Vec<Move>), target: GenTarget) -> usize {
        let game_state = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate(&game_state, target, &mut out);
        out.len()
    }

    #[test]
    fn sliders_are_boxed_in_at_the_start() {
        let fen = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(count(fen, generate_bishop_moves, GenTarget::All), 0);
        assert_eq!(count(fen, generate_rook_moves, GenTarget::All), 0);
        assert_eq!(count(fen, generate_queen_moves, GenTarget::All), 0);
    }

    #[test]
    fn rook_stops_on_own_piece_and_takes_enemy() {
        // Rook d4, own pawn d6, enemy knight b4.
        let fen = "4k3/8/3P4/8/1n1R4/8/8/4K3 w - - 0 1";
        assert_eq!(count(fen, generate_rook_moves, GenTarget::All), 1 + 2 + 4 + 3);
        assert_eq!(count(fen, generate_rook_moves, GenTarget::Captures), 1);
        assert_eq!(count(fen, generate_rook_moves, GenTarget::Quiet), 9);
    }

    #[test]
    fn queen_in_open_centre() {
        let fen = "4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1";
        assert_eq!(count(fen, generate_queen_moves, GenTarget::All), 27);
    }
}
