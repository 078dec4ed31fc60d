//! Perft: leaf counting over the legal move tree, walked in place with make/unmake.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_pseudo_legal_moves,
};
use crate::move_generation::legal_move_shared::GenTarget;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only; the fast path used by benches and deep tests.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, GenTarget::All, &mut moves);

    let mut nodes = 0;
    for mv in moves {
        if !make_move(game_state, mv) {
            continue;
        }
        nodes += if depth == 1 { 1 } else { perft(game_state, depth - 1) };
        unmake_move(game_state, mv);
    }
    nodes
}

/// Leaf count per root move, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for mv in generate_legal_moves(game_state) {
        if make_move(game_state, mv) {
            out.push((mv, perft(game_state, depth - 1)));
            unmake_move(game_state, mv);
        }
    }
    out
}

/// Leaf count with per-leaf move statistics.
pub fn perft_detailed(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        if !make_move(game_state, mv) {
            continue;
        }
        if depth == 1 {
            total.merge(classify_leaf(game_state, mv));
        } else {
            total.merge(perft_detailed(game_state, depth - 1));
        }
        unmake_move(game_state, mv);
    }
    total
}

fn classify_leaf(game_state: &mut GameState, mv: Move) -> PerftCounts {
    let mut counts = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    counts.captures = mv.is_capture() as u64;
    counts.en_passant = mv.is_en_passant() as u64;
    counts.castles = mv.is_castling() as u64;
    counts.promotions = mv.is_promotion() as u64;

    if is_king_in_check(game_state, game_state.side_to_move) {
        counts.checks = 1;
        counts.checkmates = generate_legal_moves(game_state).is_empty() as u64;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn start_position_shallow_counts() {
        let mut game_state = GameState::from_fen(STARTING_POSITION_FEN).expect("FEN should parse");
        assert_eq!(perft(&mut game_state, 1), 20);
        assert_eq!(perft(&mut game_state, 2), 400);
        assert_eq!(perft(&mut game_state, 3), 8902);
        assert_eq!(game_state, GameState::new_game());
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game_state = GameState::new_game();
        let divided = perft_divide(&mut game_state, 2);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
    }

    #[test]
    fn kiwipete_detailed_depth_two() {
        let mut game_state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let counts = perft_detailed(&mut game_state, 2);
        assert_eq!(counts.nodes, 2039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.promotions, 0);
        assert_eq!(counts.checks, 3);
        assert_eq!(counts.checkmates, 0);
    }
}
