//! In-place make/unmake.
//!
//! `set_square` is the only writer of the mailbox and its caches. `make_move`
//! and `unmake_move` are exact inverses: everything `unmake_move` restores
//! comes from the fields packed into the `Move` itself.

use crate::game_state::chess_rules::{castling_lane_for, castling_rights_touched_by};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::Move;

impl GameState {
    /// Write `piece` (or empty) to `square`, keeping every cache in step.
    pub fn set_square(&mut self, piece: Option<Piece>, square: Square) {
        let bit = Bitboard::from_square(square);

        if let Some(old) = self.squares[square as usize] {
            self.color_bb[old.color.index()] &= !bit;
            self.piece_bb[old.kind.index()] &= !bit;
            self.piece_counts[old.table_index()] -= 1;
            if old.kind == PieceKind::King && self.king_square[old.color.index()] == square {
                self.king_square[old.color.index()] = NO_SQUARE;
            }
        }

        self.squares[square as usize] = piece;

        if let Some(new) = piece {
            self.color_bb[new.color.index()] |= bit;
            self.piece_bb[new.kind.index()] |= bit;
            self.piece_counts[new.table_index()] += 1;
            if new.kind == PieceKind::King {
                self.king_square[new.color.index()] = square;
            }
        }
    }
}

/// Square of the pawn removed by an en passant capture landing on `to`.
#[inline]
pub fn en_passant_victim_square(to: Square, mover: Color) -> Square {
    match mover {
        Color::Light => to - 8,
        Color::Dark => to + 8,
    }
}

/// Play `mv` on the board.
///
/// Returns `false` and leaves the position untouched when the move would
/// leave the mover's king attacked.
pub fn make_move(game_state: &mut GameState, mv: Move) -> bool {
    let mover = game_state.side_to_move;
    let from = mv.from();
    let to = mv.to();
    let moved = mv.moved_piece();

    game_state.castling_rights &=
        !(castling_rights_touched_by(from) | castling_rights_touched_by(to));
    game_state.en_passant_square = None;

    if mv.is_castling() {
        if let Some(lane) = castling_lane_for(from, to) {
            let rook = game_state.piece_at(lane.rook_from);
            game_state.set_square(None, lane.rook_from);
            game_state.set_square(rook, lane.rook_to);
        }
    } else if mv.is_en_passant() {
        game_state.set_square(None, en_passant_victim_square(to, mover));
    } else if mv.is_double_push() {
        game_state.en_passant_square = Some((from + to) / 2);
    }

    if moved.kind == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.set_square(None, from);
    game_state.set_square(Some(mv.promotion_piece().unwrap_or(moved)), to);
    game_state.side_to_move = mover.opposite();

    if is_king_in_check(game_state, mover) {
        unmake_move(game_state, mv);
        return false;
    }
    true
}

/// Take back `mv`, which must be the last move successfully made.
pub fn unmake_move(game_state: &mut GameState, mv: Move) {
    let from = mv.from();
    let to = mv.to();
    let moved = mv.moved_piece();
    let mover = moved.color;

    game_state.side_to_move = mover;

    if mv.is_en_passant() {
        game_state.set_square(None, to);
        game_state.set_square(mv.captured_piece(), en_passant_victim_square(to, mover));
    } else {
        game_state.set_square(mv.captured_piece(), to);
    }
    game_state.set_square(Some(moved), from);

    if mv.is_castling() {
        if let Some(lane) = castling_lane_for(from, to) {
            let rook = game_state.piece_at(lane.rook_to);
            game_state.set_square(None, lane.rook_to);
            game_state.set_square(rook, lane.rook_from);
        }
    }

    game_state.en_passant_square = mv.previous_en_passant();
    game_state.castling_rights = mv.previous_castling_rights();
    game_state.halfmove_clock = mv.previous_halfmove_clock();
    if mover == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::long_algebraic::{apply_move_list, long_algebraic_to_move};

    const F2: Square = 13;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("square should parse")
    }

    fn after(moves: &str) -> GameState {
        let mut game_state = GameState::new_game();
        let applied = apply_move_list(&mut game_state, moves);
        assert!(applied.is_ok(), "moves {moves:?} should apply: {applied:?}");
        game_state
    }

    #[test]
    fn double_push_sets_en_passant_and_keeps_rights() {
        let game_state = after("a2a4");
        assert_eq!(game_state.en_passant_square, Some(sq("a3")));
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.side_to_move, Color::Dark);
    }

    #[test]
    fn rook_moves_strip_only_their_own_right() {
        let game_state = after("b1c3 g8f6 a1b1");
        assert_eq!(
            game_state.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );

        let game_state = after("b1c3 g8f6 a1b1 h8g8");
        assert_eq!(
            game_state.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );

        let game_state = after("b1c3 g8f6 g1f3 b8c6 a1b1 a8b8 h1g1 h8g8");
        assert_eq!(game_state.castling_rights, 0);
    }

    #[test]
    fn queenside_castling_moves_both_pieces() {
        let game_state = after("d2d4 d7d5 b1c3 b8c6 c1f4 c8f5 d1d2 d8d7 e1c1 e8c8");
        let light_king = Some(Piece::new(Color::Light, PieceKind::King));
        let light_rook = Some(Piece::new(Color::Light, PieceKind::Rook));
        let dark_king = Some(Piece::new(Color::Dark, PieceKind::King));
        let dark_rook = Some(Piece::new(Color::Dark, PieceKind::Rook));
        assert_eq!(game_state.piece_at(C1), light_king);
        assert_eq!(game_state.piece_at(D1), light_rook);
        assert_eq!(game_state.piece_at(A1), None);
        assert_eq!(game_state.piece_at(C8), dark_king);
        assert_eq!(game_state.piece_at(D8), dark_rook);
        assert_eq!(game_state.castling_rights, 0);
        assert_eq!(game_state.check_consistency(), Ok(()));
    }

    #[test]
    fn capturing_a_home_rook_removes_its_right() {
        let mut game_state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move(&game_state, "a1a8").expect("capture should parse");
        assert!(make_move(&mut game_state, mv));
        assert_eq!(
            game_state.castling_rights,
            CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_KINGSIDE
        );
    }

    #[test]
    fn en_passant_capture_and_take_back() {
        let mut game_state =
            GameState::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .expect("FEN should parse");
        let before = game_state.clone();
        let mv = long_algebraic_to_move(&game_state, "e5f6").expect("en passant should parse");
        assert!(mv.is_en_passant());

        assert!(make_move(&mut game_state, mv));
        assert_eq!(game_state.piece_at(sq("f5")), None);
        assert_eq!(
            game_state.piece_at(sq("f6")),
            Some(Piece::new(Color::Light, PieceKind::Pawn))
        );
        assert_eq!(game_state.halfmove_clock, 0);

        unmake_move(&mut game_state, mv);
        assert_eq!(game_state, before);
    }

    #[test]
    fn capture_onto_a_stale_en_passant_square_is_ordinary() {
        let mut game_state = GameState::from_fen("4k3/8/4n3/3P4/8/8/8/4K3 w - e6 0 1").expect("FEN should parse");
        assert_eq!(game_state.en_passant_square, None);
        // Hand-set, as a caller building positions might.
        game_state.en_passant_square = Some(sq("e6"));
        let before = game_state.clone();

        let mut moves = Vec::new();
        crate::move_generation::legal_moves_pawn::generate_pawn_moves(
            &game_state,
            crate::move_generation::legal_move_shared::GenTarget::Captures,
            &mut moves,
        );
        let capture = moves
            .into_iter()
            .find(|mv| mv.to_string() == "d5e6")
            .expect("the knight should be capturable");
        assert!(!capture.is_en_passant());

        assert!(make_move(&mut game_state, capture));
        assert_eq!(game_state.piece_at(sq("e5")), None);
        unmake_move(&mut game_state, capture);
        assert_eq!(
            game_state.piece_at(sq("e6")),
            Some(Piece::new(Color::Dark, PieceKind::Knight))
        );
        assert_eq!(game_state, before);
        assert_eq!(game_state.check_consistency(), Ok(()));
    }

    #[test]
    fn move_into_check_is_rejected_without_side_effects() {
        let mut game_state =
            GameState::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 5 40").expect("FEN should parse");
        let before = game_state.clone();
        let mv = Move::new(
            E1,
            F2,
            Piece::new(Color::Light, PieceKind::King),
            None,
            None,
            crate::moves::chess_move::MoveContext::of(&game_state),
        );
        assert!(!make_move(&mut game_state, mv));
        assert_eq!(game_state, before);
    }

    #[test]
    fn clocks_advance_and_restore() {
        let mut game_state = GameState::new_game();
        let before = game_state.clone();
        let knight = long_algebraic_to_move(&game_state, "g1f3").expect("move should parse");
        assert!(make_move(&mut game_state, knight));
        assert_eq!(game_state.halfmove_clock, 1);
        let reply = long_algebraic_to_move(&game_state, "g8f6").expect("move should parse");
        assert!(make_move(&mut game_state, reply));
        assert_eq!(game_state.fullmove_number, 2);

        unmake_move(&mut game_state, reply);
        unmake_move(&mut game_state, knight);
        assert_eq!(game_state, before);
    }
}
