//! Mutable board model.
//!
//! `GameState` keeps a mailbox (`squares`) as the source of truth and two
//! bitboard caches derived from it: one set per color and one per piece kind.
//! Every write goes through `GameState::set_square` (see
//! `move_generation::legal_move_apply`) so the caches, king squares and piece
//! counts stay in step with the mailbox.

use crate::errors::FenError;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Mailbox (authoritative) ---
    pub squares: [Option<Piece>; 64],

    // --- Derived caches ---
    pub color_bb: [Bitboard; 2],
    pub piece_bb: [Bitboard; 6],
    pub king_square: [Square; 2],
    pub piece_counts: [u8; 12],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            color_bb: [Bitboard::EMPTY; 2],
            piece_bb: [Bitboard::EMPTY; 6],
            king_square: [NO_SQUARE; 2],
            piece_counts: [0; 12],

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    /// Board with no pieces, light to move.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::default();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as Square;
            game_state.set_square(Some(Piece::new(Color::Light, *kind)), file);
            game_state.set_square(Some(Piece::new(Color::Light, PieceKind::Pawn)), 8 + file);
            game_state.set_square(Some(Piece::new(Color::Dark, PieceKind::Pawn)), 48 + file);
            game_state.set_square(Some(Piece::new(Color::Dark, *kind)), 56 + file);
        }
        game_state.castling_rights = CASTLE_ALL;
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.color_bb[0] | self.color_bb[1]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color) -> Bitboard {
        self.color_bb[color.index()]
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.color_bb[color.index()] & self.piece_bb[kind.index()]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn king_square_of(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    #[inline]
    pub fn piece_count(&self, piece: Piece) -> u8 {
        self.piece_counts[piece.table_index()]
    }

    /// Cross-checks every derived cache against the mailbox.
    ///
    /// Returns a description of the first mismatch.
    pub fn check_consistency(&self) -> Result<(), String> {
        let mut counts = [0u8; 12];
        let mut kings = [NO_SQUARE; 2];
        for square in 0..64u8 {
            let content = self.squares[square as usize];
            for color in Color::BOTH {
                let expected = content.is_some_and(|p| p.color == color);
                if self.color_bb[color.index()].test(square) != expected {
                    return Err(format!("color cache {color:?} disagrees on square {square}"));
                }
            }
            for kind in PieceKind::ALL {
                let expected = content.is_some_and(|p| p.kind == kind);
                if self.piece_bb[kind.index()].test(square) != expected {
                    return Err(format!("piece cache {kind:?} disagrees on square {square}"));
                }
            }
            if let Some(piece) = content {
                counts[piece.table_index()] += 1;
                if piece.kind == PieceKind::King {
                    kings[piece.color.index()] = square;
                }
            }
        }
        if counts != self.piece_counts {
            return Err(format!("piece counts {:?} != {:?}", self.piece_counts, counts));
        }
        for color in Color::BOTH {
            if counts[Piece::new(color, PieceKind::King).table_index()] == 1
                && kings[color.index()] != self.king_square[color.index()]
            {
                return Err(format!(
                    "king square for {color:?} is {} but king stands on {}",
                    self.king_square[color.index()],
                    kings[color.index()]
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = GameState::new_game();
        let parsed = GameState::from_fen(STARTING_POSITION_FEN).expect("start FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn new_game_caches_are_consistent() {
        let game_state = GameState::new_game();
        assert_eq!(game_state.check_consistency(), Ok(()));
        assert_eq!(game_state.occupancy().count(), 32);
        assert_eq!(game_state.king_square_of(Color::Light), 4);
        assert_eq!(game_state.king_square_of(Color::Dark), 60);
        assert_eq!(
            game_state.piece_count(Piece::new(Color::Dark, PieceKind::Pawn)),
            8
        );
    }

    #[test]
    fn empty_board_has_no_kings() {
        let game_state = GameState::new_empty();
        assert!(game_state.occupancy().is_empty());
        assert_eq!(game_state.king_square, [NO_SQUARE; 2]);
    }
}
