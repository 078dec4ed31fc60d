//! Packed move representation.
//!
//! A `Move` holds everything `unmake_move` needs to restore the position
//! exactly: the squares, the moving, captured and promotion pieces, and the
//! en passant square, castling rights and halfmove clock from before the move.
//! En passant captures carry their own flag.
//! The ordering score rides alongside and takes no part in equality.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 16;
const PROMOTION_SHIFT: u32 = 20;
const EP_SHIFT: u32 = 24;
const CASTLING_SHIFT: u32 = 31;
const HALFMOVE_SHIFT: u32 = 35;

const SQUARE_MASK: u64 = 0x3f;
const PIECE_MASK: u64 = 0xf;
const EP_MASK: u64 = 0x7f;
const CASTLING_MASK: u64 = 0xf;
const HALFMOVE_MASK: u64 = 0xffff;

const EN_PASSANT_FLAG: u64 = 1 << 51;
/// From, to, moving piece and promotion: what the move does on the board.
const ACTION_MASK: u64 = (SQUARE_MASK << FROM_SHIFT)
    | (SQUARE_MASK << TO_SHIFT)
    | (PIECE_MASK << MOVED_SHIFT)
    | (PIECE_MASK << PROMOTION_SHIFT);

/// State a move must remember to be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub en_passant_square: Option<Square>,
    pub castling_rights: CastlingRights,
    pub halfmove_clock: u16,
}

impl MoveContext {
    #[inline]
    pub fn of(game_state: &GameState) -> Self {
        Self {
            en_passant_square: game_state.en_passant_square,
            castling_rights: game_state.castling_rights,
            halfmove_clock: game_state.halfmove_clock,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Move {
    bits: u64,
    pub score: i32,
}

impl PartialEq for Move {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

#[inline]
fn piece_code(piece: Option<Piece>) -> u64 {
    piece.map_or(NO_PIECE_CODE, Piece::code) as u64
}

impl Move {
    pub fn new(
        from: Square,
        to: Square,
        moved: Piece,
        captured: Option<Piece>,
        promotion: Option<PieceKind>,
        context: MoveContext,
    ) -> Self {
        let promotion = promotion.map(|kind| Piece::new(moved.color, kind));
        let bits = (from as u64 & SQUARE_MASK) << FROM_SHIFT
            | (to as u64 & SQUARE_MASK) << TO_SHIFT
            | (moved.code() as u64) << MOVED_SHIFT
            | piece_code(captured) << CAPTURED_SHIFT
            | piece_code(promotion) << PROMOTION_SHIFT
            | (context.en_passant_square.unwrap_or(NO_SQUARE) as u64 & EP_MASK) << EP_SHIFT
            | (context.castling_rights as u64 & CASTLING_MASK) << CASTLING_SHIFT
            | (context.halfmove_clock as u64 & HALFMOVE_MASK) << HALFMOVE_SHIFT;
        Self { bits, score: 0 }
    }

    /// A pawn capturing `victim` en passant by moving onto the empty `to`.
    pub fn en_passant(from: Square, to: Square, moved: Piece, victim: Piece, context: MoveContext) -> Self {
        debug_assert!(moved.kind == PieceKind::Pawn && victim.kind == PieceKind::Pawn);
        let mut mv = Self::new(from, to, moved, Some(victim), None, context);
        mv.bits |= EN_PASSANT_FLAG;
        mv
    }

    /// Same squares, piece and promotion, whatever position the move came from.
    #[inline]
    pub const fn same_action(self, other: Move) -> bool {
        self.bits & ACTION_MASK == other.bits & ACTION_MASK
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.bits >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.bits >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn moved_piece(self) -> Piece {
        match Piece::from_code(((self.bits >> MOVED_SHIFT) & PIECE_MASK) as u8) {
            Some(piece) => piece,
            None => unreachable!("move {:#x} has no moving piece", self.bits),
        }
    }

    #[inline]
    pub fn captured_piece(self) -> Option<Piece> {
        Piece::from_code(((self.bits >> CAPTURED_SHIFT) & PIECE_MASK) as u8)
    }

    #[inline]
    pub fn promotion_piece(self) -> Option<Piece> {
        Piece::from_code(((self.bits >> PROMOTION_SHIFT) & PIECE_MASK) as u8)
    }

    #[inline]
    pub fn previous_en_passant(self) -> Option<Square> {
        match ((self.bits >> EP_SHIFT) & EP_MASK) as Square {
            NO_SQUARE => None,
            square => Some(square),
        }
    }

    #[inline]
    pub const fn previous_castling_rights(self) -> CastlingRights {
        ((self.bits >> CASTLING_SHIFT) & CASTLING_MASK) as CastlingRights
    }

    #[inline]
    pub const fn previous_halfmove_clock(self) -> u16 {
        ((self.bits >> HALFMOVE_SHIFT) & HALFMOVE_MASK) as u16
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline]
    pub fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Neither a capture nor a promotion.
    #[inline]
    pub fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.moved_piece().kind == PieceKind::King && self.from().abs_diff(self.to()) == 2
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.bits & EN_PASSANT_FLAG != 0
    }

    #[inline]
    pub fn is_double_push(self) -> bool {
        self.moved_piece().kind == PieceKind::Pawn && self.from().abs_diff(self.to()) == 16
    }

}

/// Long algebraic text, e.g. `e2e4` or `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.from()),
            square_to_algebraic(self.to())
        )?;
        if let Some(promotion) = self.promotion_piece() {
            write!(f, "{}", promotion.kind.to_char())?;
        }
        Ok(())
    }
}
