//! FEN-to-GameState parser.
//!
//! The parser is lenient about the fields that have a sensible default:
//! unknown piece letters are skipped, a bad side to move becomes light, and a
//! bad halfmove clock becomes 0. Each such repair is reported as a warning.
//! Only a board that cannot be placed (wrong rank count, overlong rank, missing
//! or duplicate king) is an error.

use crate::errors::FenError;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::en_passant_victim_square;
use crate::utils::algebraic::algebraic_to_square;

/// Parse a FEN, logging every repaired field.
pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let (game_state, warnings) = parse_fen_with_warnings(fen)?;
    for warning in &warnings {
        log::warn!("{warning}");
    }
    Ok(game_state)
}

/// Parse a FEN and hand the repair diagnostics back to the caller.
pub fn parse_fen_with_warnings(fen: &str) -> Result<(GameState, Vec<String>), FenError> {
    let mut warnings = Vec::new();
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::Empty)?;
    let mut game_state = GameState::new_empty();
    parse_board(board_part, &mut game_state, &mut warnings)?;

    game_state.side_to_move = match parts.next() {
        None | Some("w") => Color::Light,
        Some("b") => Color::Dark,
        Some(other) => {
            warnings.push(format!("invalid side to move {other:?}, using white"));
            Color::Light
        }
    };

    game_state.castling_rights = match parts.next() {
        None => 0,
        Some(field) => parse_castling_rights(field, &mut warnings),
    };

    game_state.en_passant_square = match parts.next() {
        None | Some("-") => None,
        Some(field) => match algebraic_to_square(field) {
            Some(square) if en_passant_is_possible(&game_state, square) => Some(square),
            Some(_) => {
                warnings.push(format!(
                    "en passant square {field:?} has no pawn that just double pushed, ignoring it"
                ));
                None
            }
            None => {
                warnings.push(format!("invalid en passant square {field:?}, ignoring it"));
                None
            }
        },
    };

    game_state.halfmove_clock = match parts.next() {
        None => 0,
        Some(field) => field.parse::<u16>().unwrap_or_else(|_| {
            warnings.push(format!("halfmove clock {field:?} is not a number >= 0, using 0"));
            0
        }),
    };

    game_state.fullmove_number = match parts.next() {
        None => 1,
        Some(field) => match field.parse::<u16>() {
            Ok(n) if n >= 1 => n,
            _ => {
                warnings.push(format!("fullmove number {field:?} is not a number >= 1, using 1"));
                1
            }
        },
    };

    Ok((game_state, warnings))
}

/// The square must be the one passed over by an enemy pawn that just moved
/// two ranks: empty, on the mover's sixth rank, with that pawn behind it.
fn en_passant_is_possible(game_state: &GameState, square: Square) -> bool {
    let us = game_state.side_to_move;
    let passed_rank = match us {
        Color::Light => 5,
        Color::Dark => 2,
    };
    square_rank(square) == passed_rank
        && game_state.piece_at(square).is_none()
        && game_state.piece_at(en_passant_victim_square(square, us))
            == Some(Piece::new(us.opposite(), PieceKind::Pawn))
}

fn parse_board(
    board_part: &str,
    game_state: &mut GameState,
    warnings: &mut Vec<String>,
) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                file += empty_count as u8;
            } else if let Some(piece) = Piece::from_fen_char(ch) {
                if piece.kind == PieceKind::Pawn && (board_rank == 0 || board_rank == 7) {
                    warnings.push(format!(
                        "pawn {ch:?} on rank {} cannot exist, leaving the square empty",
                        board_rank + 1
                    ));
                } else if file < 8 {
                    game_state.set_square(Some(piece), board_rank * 8 + file);
                }
                file += 1;
            } else {
                warnings.push(format!("invalid piece {ch:?} in FEN, skipping it"));
                continue;
            }

            if file > 8 {
                return Err(FenError::RankWidth {
                    rank: board_rank + 1,
                    files: file,
                });
            }
        }

        if file < 8 {
            warnings.push(format!(
                "rank {} describes only {file} files, leaving the rest empty",
                board_rank + 1
            ));
        }
    }

    for color in Color::BOTH {
        match game_state.piece_count(Piece::new(color, PieceKind::King)) {
            0 => return Err(FenError::MissingKing(color)),
            1 => {}
            _ => return Err(FenError::ExtraKing(color)),
        }
    }

    Ok(())
}

fn parse_castling_rights(field: &str, warnings: &mut Vec<String>) -> CastlingRights {
    if field == "-" {
        return 0;
    }

    let mut rights: CastlingRights = 0;
    for ch in field.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => warnings.push(format!("invalid castling character {ch:?}, skipping it")),
        }
    }
    rights
}
