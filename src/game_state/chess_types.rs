//! Core value types shared by the board model, move encoding and search.

pub use crate::game_state::bitboard::Bitboard;
pub use crate::game_state::game_state::GameState;

/// Board square index (`0..=63`, a1 = 0, h8 = 63).
pub type Square = u8;

/// Sentinel for "no square", returned by `Bitboard::pop_lowest` on an empty set.
pub const NO_SQUARE: Square = 64;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
///
/// Declaration order is also attacker order for exchange evaluation:
/// pawn < knight < bishop < rook < queen < king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Case-insensitive piece letter.
    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Colored piece. Its 4-bit code is `kind * 2 + color`; `NO_PIECE_CODE` marks an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

pub const NO_PIECE_CODE: u8 = 15;

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        (self.kind.index() as u8) << 1 | self.color.index() as u8
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        let color = if code & 1 == 0 { Color::Light } else { Color::Dark };
        match PieceKind::from_index((code >> 1) as usize) {
            Some(kind) => Some(Piece { color, kind }),
            None => None,
        }
    }

    /// Index into twelve-slot per-piece tables.
    #[inline]
    pub const fn table_index(self) -> usize {
        self.code() as usize
    }

    /// FEN letter: uppercase for light, lowercase for dark.
    #[inline]
    pub const fn to_fen_char(self) -> char {
        let ch = self.kind.to_char();
        match self.color {
            Color::Light => ch.to_ascii_uppercase(),
            Color::Dark => ch,
        }
    }

    #[inline]
    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_char(ch).map(|kind| Piece { color, kind })
    }
}

/// Castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0b1111;

#[inline]
pub const fn castling_rights_for(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

/// FEN-style castling string (`KQkq` subset, or `-`).
pub fn castling_rights_to_string(rights: CastlingRights) -> String {
    let mut out = String::new();
    for (bit, ch) in [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ] {
        if rights & bit != 0 {
            out.push(ch);
        }
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_codes_round_trip_for_all_twelve_pieces() {
        for color in Color::BOTH {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                assert!(piece.code() < NO_PIECE_CODE);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
        assert_eq!(Piece::from_code(NO_PIECE_CODE), None);
    }

    #[test]
    fn fen_letters_follow_color_case() {
        assert_eq!(Piece::new(Color::Light, PieceKind::Knight).to_fen_char(), 'N');
        assert_eq!(Piece::new(Color::Dark, PieceKind::Queen).to_fen_char(), 'q');
        assert_eq!(
            Piece::from_fen_char('k'),
            Some(Piece::new(Color::Dark, PieceKind::King))
        );
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn castling_string_lists_rights_in_fen_order() {
        assert_eq!(castling_rights_to_string(CASTLE_ALL), "KQkq");
        assert_eq!(
            castling_rights_to_string(CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE),
            "Kq"
        );
        assert_eq!(castling_rights_to_string(0), "-");
    }
}
