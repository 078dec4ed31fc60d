//! Text dumps of a position for the `pb`, `pbb` and `pm` debug commands.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::utils::algebraic::square_to_algebraic;

fn status_line(game_state: &GameState) -> String {
    let side = match game_state.side_to_move {
        Color::Light => "white",
        Color::Dark => "black",
    };
    let ep = game_state
        .en_passant_square
        .map_or("-", square_to_algebraic);
    format!(
        "{side} to move; ep: {ep}; castling: {}",
        castling_rights_to_string(game_state.castling_rights)
    )
}

/// Board diagram, rank 8 at the top, followed by the state line.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_game_state(game_state: &GameState) -> String {
    let separator = "  +---+---+---+---+---+---+---+---+\n";
    let mut out = String::from(separator);

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push_str(" |");
        for file in 0..8u8 {
            let mark = game_state
                .piece_at(rank * 8 + file)
                .map_or(' ', Piece::to_fen_char);
            out.push(' ');
            out.push(mark);
            out.push_str(" |");
        }
        out.push('\n');
        out.push_str(separator);
    }

    out.push_str("    a   b   c   d   e   f   g   h\n");
    out.push_str(&status_line(game_state));
    out
}

/// Every cached bitboard, one grid per color and per colored piece kind.
pub fn render_bitboards(game_state: &GameState) -> String {
    let mut out = status_line(game_state);
    out.push('\n');

    for color in Color::BOTH {
        let name = match color {
            Color::Light => "white",
            Color::Dark => "black",
        };
        out.push_str(&format!("{name} pieces\n{}", game_state.pieces_of(color)));
    }
    for color in Color::BOTH {
        for kind in PieceKind::ALL {
            let piece = Piece::new(color, kind);
            out.push_str(&format!(
                "{}\n{}",
                piece.to_fen_char(),
                game_state.pieces(color, kind)
            ));
        }
    }
    out
}

/// The legal moves in generation order.
pub fn render_legal_moves(game_state: &mut GameState) -> String {
    let moves = generate_legal_moves(game_state);
    let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
    format!("{} legal moves: {}", moves.len(), listed.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_start_position() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "8 | r | n | b | q | k | b | n | r |");
        assert_eq!(lines[9], "4 |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[15], "1 | R | N | B | Q | K | B | N | R |");
        assert_eq!(lines.last().copied(), Some("white to move; ep: -; castling: KQkq"));
    }

    #[test]
    fn bitboard_dump_lists_every_piece_set() {
        let text = render_bitboards(&GameState::new_game());
        assert!(text.starts_with("white to move; ep: -; castling: KQkq\nwhite pieces\n"));
        assert!(text.contains("black pieces\n"));
        // 1 status line, then 14 headed grids of 8 rows each.
        assert_eq!(text.lines().count(), 1 + 14 * 9);
    }

    #[test]
    fn legal_move_listing() {
        let mut game_state =
            GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        let text = render_legal_moves(&mut game_state);
        assert!(text.starts_with("15 legal moves: "));
        assert!(text.contains("e1g1"));
    }
}
