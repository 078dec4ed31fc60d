//! Horizon evaluation: stand pat plus the best non-losing exchange.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves_for;
use crate::move_generation::legal_move_shared::GenTarget;
use crate::search::board_scoring::BoardScorer;
use crate::search::see::{see_move, see_value};

/// What a free push to the last rank is worth: a queen in place of a pawn.
const PROMOTION_GAIN: i32 = see_value(PieceKind::Queen) - see_value(PieceKind::Pawn);

/// Fail-hard: the result always lies in `[alpha, beta]`.
pub fn quiescence(game_state: &mut GameState, scorer: &dyn BoardScorer, alpha: i32, beta: i32) -> i32 {
    let stand_pat = scorer.score(game_state);
    if stand_pat >= beta {
        return beta;
    }

    let mut best_gain = 0;
    let mut visited = Bitboard::EMPTY;
    // Pawn captures come first, so the first move onto a square is the cheapest.
    for mv in generate_legal_moves_for(game_state, GenTarget::Captures) {
        if visited.test(mv.to()) {
            continue;
        }
        visited.set(mv.to());

        let mut gain = see_move(game_state, mv);
        if gain == 0 && mv.is_promotion() && !mv.is_capture() {
            gain = PROMOTION_GAIN;
        }
        if gain > best_gain {
            best_gain = gain;
        }
    }

    let score = stand_pat + best_gain;
    if score >= beta {
        beta
    } else {
        score.max(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;

    const WINDOW: i32 = 100_000;

    fn qs(fen: &str) -> i32 {
        let mut game_state = GameState::from_fen(fen).expect("FEN should parse");
        let before = game_state.clone();
        let score = quiescence(&mut game_state, &MaterialScorer, -WINDOW, WINDOW);
        assert_eq!(game_state, before);
        score
    }

    #[test]
    fn quiet_position_is_its_static_score() {
        assert_eq!(qs("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), 100);
    }

    #[test]
    fn hanging_piece_is_counted() {
        assert_eq!(qs("4k3/8/8/3n4/8/8/8/3RK3 w - - 0 1"), 500 - 320 + 320);
    }

    #[test]
    fn losing_captures_are_ignored() {
        // Rxd5 cxd5 loses the exchange; standing pat is better.
        assert_eq!(qs("4k3/8/2p5/3n4/8/8/8/3RK3 w - - 0 1"), 500 - 420);
    }

    #[test]
    fn free_promotion_is_worth_a_queen() {
        assert_eq!(qs("7k/P7/8/8/8/8/8/K7 w - - 0 1"), 100 + PROMOTION_GAIN);
    }

    #[test]
    fn fail_hard_bounds_hold() {
        let mut game_state = GameState::from_fen("4k3/8/8/3n4/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        assert_eq!(quiescence(&mut game_state, &MaterialScorer, -50, 50), 50);
        assert_eq!(quiescence(&mut game_state, &MaterialScorer, 900, 1000), 900);
    }
}
