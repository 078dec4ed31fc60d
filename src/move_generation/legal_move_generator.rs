//! Full legal move generation pipeline.
//!
//! Runs the per-piece pseudo-legal generators in value order (pawn first,
//! king last) and then keeps only the moves that `make_move` accepts.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_shared::GenTarget;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::chess_move::Move;

/// Pseudo-legal moves for the side to move, appended to `out`.
///
/// Captures come out grouped by attacker, least valuable first.
pub fn generate_pseudo_legal_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    generate_pawn_moves(game_state, target, out);
    generate_knight_moves(game_state, target, out);
    generate_bishop_moves(game_state, target, out);
    generate_rook_moves(game_state, target, out);
    generate_queen_moves(game_state, target, out);
    generate_king_moves(game_state, target, out);
}

/// Drop every move in `moves` that leaves the mover's king attacked.
pub fn retain_legal_moves(game_state: &mut GameState, moves: &mut Vec<Move>) {
    moves.retain(|&mv| {
        if make_move(game_state, mv) {
            unmake_move(game_state, mv);
            true
        } else {
            false
        }
    });
}

pub fn generate_legal_moves_for(game_state: &mut GameState, target: GenTarget) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, target, &mut moves);
    retain_legal_moves(game_state, &mut moves);
    moves
}

/// Every legal move. Empty for both checkmate and stalemate.
#[inline]
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    generate_legal_moves_for(game_state, GenTarget::All)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use test_case::test_case;

    #[test_case("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 20; "start")]
    #[test_case("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 48; "kiwipete")]
    #[test_case("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 14; "rook endgame")]
    fn legal_move_counts(fen: &str, expected: usize) {
        let mut game_state = GameState::from_fen(fen).expect("FEN should parse");
        assert_eq!(generate_legal_moves(&mut game_state).len(), expected);
    }

    #[test]
    fn captures_and_quiets_partition_all_legal_moves() {
        let mut game_state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let captures = generate_legal_moves_for(&mut game_state, GenTarget::Captures);
        let quiets = generate_legal_moves_for(&mut game_state, GenTarget::Quiet);
        assert_eq!(captures.len(), 8);
        assert_eq!(captures.len() + quiets.len(), 48);
        assert!(captures.iter().all(|mv| mv.is_capture() || mv.is_promotion()));
    }

    #[test]
    fn mate_and_stalemate_both_have_no_moves() {
        let mut mated =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut mated).is_empty());
        assert!(is_king_in_check(&mated, mated.side_to_move));

        let mut stalemated =
            GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(generate_legal_moves(&mut stalemated).is_empty());
        assert!(!is_king_in_check(&stalemated, stalemated.side_to_move));
    }

    #[test]
    fn pinned_piece_cannot_move_off_the_line() {
        // Light knight on e2 pinned by the rook on e8.
        let mut game_state =
            GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generate_legal_moves(&mut game_state);
        assert!(moves.iter().all(|mv| mv.from() != 12));
    }
}
