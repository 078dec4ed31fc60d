use crate::game_state::chess_rules::castling_lanes;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{build_move, push_moves_to, GenTarget};
use crate::moves::attack_tables::king_attacks;
use crate::moves::chess_move::Move;

pub fn generate_king_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let from = game_state.king_square_of(side);
    if from == NO_SQUARE {
        return;
    }

    push_moves_to(game_state, from, king_attacks(from) & target.mask(game_state), out);

    if target.includes_quiets() {
        generate_castling_moves(game_state, out);
    }
}

fn generate_castling_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let occupancy = game_state.occupancy();
    let king = Some(Piece::new(side, PieceKind::King));
    let rook = Some(Piece::new(side, PieceKind::Rook));

    for lane in castling_lanes(side) {
        if game_state.castling_rights & lane.right == 0
            || game_state.piece_at(lane.king_from) != king
            || game_state.piece_at(lane.rook_from) != rook
            || (lane.between & occupancy).is_not_empty()
        {
            continue;
        }

        // Start, transit and destination squares must all be safe.
        if lane
            .king_path
            .iter()
            .any(|&square| is_square_attacked(game_state, square, enemy))
        {
            continue;
        }

        if let Some(mv) = build_move(game_state, lane.king_from, lane.king_to, None) {
            out.push(mv);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::apply_move_list;

    fn king_moves_after(moves: &str) -> Vec<String> {
        let mut game_state = GameState::new_game();
        apply_move_list(&mut game_state, moves).expect("moves should apply");
        let mut out = Vec::new();
        generate_king_moves(&game_state, GenTarget::All, &mut out);
        let mut moves: Vec<String> = out.iter().map(ToString::to_string).collect();
        moves.sort();
        moves
    }

    #[test]
    fn light_castles_long() {
        assert_eq!(
            king_moves_after("d2d4 d7d5 b1c3 b8c6 c1f4 c8f5 d1d2 d8d7"),
            vec!["e1c1", "e1d1"]
        );
    }

    #[test]
    fn dark_castles_short() {
        assert_eq!(
            king_moves_after("e2e4 e7e5 g1f3 g8f6 f1c4 f8c5 e1g1"),
            vec!["e8e7", "e8f8", "e8g8"]
        );
    }

    #[test]
    fn no_castling_through_an_attacked_square() {
        // Dark bishop on a6 covers f1.
        let game_state = GameState::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1")
            .expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&game_state, GenTarget::Quiet, &mut out);
        assert!(out.iter().all(|mv| !mv.is_castling()));
    }

    #[test]
    fn no_castling_out_of_check() {
        let game_state = GameState::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1")
            .expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&game_state, GenTarget::All, &mut out);
        assert!(out.iter().all(|mv| !mv.is_castling()));
    }

    #[test]
    fn captures_pass_skips_castling() {
        let game_state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&game_state, GenTarget::Captures, &mut out);
        assert!(out.is_empty());
        generate_king_moves(&game_state, GenTarget::Quiet, &mut out);
        assert_eq!(out.iter().filter(|mv| mv.is_castling()).count(), 2);
    }
}
