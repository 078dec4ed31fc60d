//! Error types for the recoverable boundaries: FEN text, move text and UCI commands.
//!
//! Illegal moves are not errors (`make_move` returns `false`), and broken
//! board bookkeeping panics instead of surfacing here.

/// FEN input that cannot be turned into a usable position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("board field has {0} ranks, expected 8")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: u8, files: u8 },

    #[error("{0:?} has no king")]
    MissingKing(crate::game_state::chess_types::Color),

    #[error("{0:?} has more than one king")]
    ExtraKing(crate::game_state::chess_types::Color),
}

/// Move text that does not describe a legal move in the current position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("move text {0:?} must be 4 or 5 characters")]
    Length(String),

    #[error("bad square {0:?}")]
    Square(String),

    #[error("bad promotion letter {0:?}")]
    PromotionLetter(char),

    #[error("no piece on {0}")]
    EmptyFrom(String),

    #[error("piece on {0} does not belong to the side to move")]
    WrongColor(String),

    #[error("{text}: {reason}")]
    IllegalShape { text: String, reason: &'static str },

    #[error("{0} leaves the king in check")]
    LeavesKingInCheck(String),
}

/// Malformed UCI command arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UciError {
    #[error("position command needs startpos or fen")]
    MissingPosition,

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Move(#[from] MoveParseError),

    #[error("bad value {value:?} for {name}")]
    BadValue { name: String, value: String },

    #[error("unknown option {0:?}")]
    UnknownOption(String),
}
