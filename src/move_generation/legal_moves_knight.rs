use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_moves_to, GenTarget};
use crate::moves::attack_tables::knight_attacks;
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(game_state: &GameState, target: GenTarget, out: &mut Vec<Move>) {
    let mask = target.mask(game_state);
    for from in game_state.pieces(game_state.side_to_move, PieceKind::Knight) {
        push_moves_to(game_state, from, knight_attacks(from) & mask, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_knights_have_four_quiet_moves() {
        let game_state = GameState::new_game();
        let mut out = Vec::new();
        generate_knight_moves(&game_state, GenTarget::All, &mut out);
        assert_eq!(out.len(), 4);

        out.clear();
        generate_knight_moves(&game_state, GenTarget::Captures, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn captures_carry_the_victim() {
        let game_state =
            GameState::from_fen("4k3/8/8/3p4/8/4N3/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_knight_moves(&game_state, GenTarget::Captures, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "e3d5");
        assert_eq!(
            out[0].captured_piece(),
            Some(Piece::new(Color::Dark, PieceKind::Pawn))
        );
    }
}
