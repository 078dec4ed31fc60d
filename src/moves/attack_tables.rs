//! Precomputed attack sets.
//!
//! Knight, king and pawn attacks are plain per-square tables. Sliders use
//! classical ray tables: each of the eight directions stores the full ray from
//! a square, and the first blocker along the ray trims everything behind it.

use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_attacks(&KNIGHT_STEPS);
pub const KING_ATTACKS: [u64; 64] = generate_leaper_attacks(&KING_STEPS);
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_leaper_attacks(&[(-1, 1), (1, 1)]),
    generate_leaper_attacks(&[(-1, -1), (1, -1)]),
];

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Ray directions as (file step, rank step). The first four increase the
/// square index, the last four decrease it.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (-1, 1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (1, -1),
];

const NORTH: usize = 0;
const NORTH_EAST: usize = 1;
const EAST: usize = 2;
const NORTH_WEST: usize = 3;
const SOUTH: usize = 4;
const SOUTH_WEST: usize = 5;
const WEST: usize = 6;
const SOUTH_EAST: usize = 7;

/// `RAYS[direction][square]`: every square from `square` to the board edge.
pub const RAYS: [[u64; 64]; 8] = generate_rays();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[square as usize])
}

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[square as usize])
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][square as usize])
}

#[inline]
fn ray_attacks(direction: usize, square: Square, occupancy: Bitboard) -> u64 {
    let ray = RAYS[direction][square as usize];
    let blockers = ray & occupancy.0;
    if blockers == 0 {
        return ray;
    }
    let first = if direction < 4 {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    ray ^ RAYS[direction][first as usize]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(
        ray_attacks(NORTH, square, occupancy)
            | ray_attacks(EAST, square, occupancy)
            | ray_attacks(SOUTH, square, occupancy)
            | ray_attacks(WEST, square, occupancy),
    )
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(
        ray_attacks(NORTH_EAST, square, occupancy)
            | ray_attacks(NORTH_WEST, square, occupancy)
            | ray_attacks(SOUTH_WEST, square, occupancy)
            | ray_attacks(SOUTH_EAST, square, occupancy),
    )
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

const fn generate_leaper_attacks(steps: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0;
        while i < steps.len() {
            attacks |= set_if_valid(file + steps[i].0, rank + steps[i].1);
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut dir = 0usize;

    while dir < 8 {
        let (file_step, rank_step) = DIRECTIONS[dir];
        let mut sq = 0usize;
        while sq < 64 {
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;
            let mut ray = 0u64;
            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                ray |= 1u64 << (rank * 8 + file);
                file += file_step;
                rank += rank_step;
            }
            table[dir][sq] = ray;
            sq += 1;
        }
        dir += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const A1: Square = 0;
    const D4: Square = 27;
    const H8: Square = 63;

    #[test_case(D4, 8; "knight in the centre")]
    #[test_case(A1, 2; "knight in the corner")]
    #[test_case(57, 3; "knight on b8")]
    fn knight_target_counts(square: Square, expected: u32) {
        assert_eq!(knight_attacks(square).count(), expected);
    }

    #[test]
    fn king_attacks_from_corner_and_centre() {
        assert_eq!(king_attacks(A1).count(), 3);
        assert_eq!(king_attacks(D4).count(), 8);
    }

    #[test]
    fn pawn_attacks_do_not_wrap_files() {
        // a2 pawn only attacks b3; h7 dark pawn only attacks g6.
        assert_eq!(pawn_attacks(Color::Light, 8), Bitboard::from_square(17));
        assert_eq!(pawn_attacks(Color::Dark, 55), Bitboard::from_square(46));
    }

    #[test]
    fn rook_on_empty_board_sees_fourteen_squares() {
        assert_eq!(rook_attacks(D4, Bitboard::EMPTY).count(), 14);
        assert_eq!(bishop_attacks(D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(queen_attacks(H8, Bitboard::EMPTY).count(), 21);
    }

    #[test]
    fn blockers_are_included_and_stop_the_ray() {
        // Blockers on d6 (43) and b4 (25).
        let occupancy = Bitboard::from_square(43) | Bitboard::from_square(25);
        let attacks = rook_attacks(D4, occupancy);
        assert!(attacks.test(35));
        assert!(attacks.test(43));
        assert!(!attacks.test(51));
        assert!(attacks.test(26));
        assert!(attacks.test(25));
        assert!(!attacks.test(24));
        assert_eq!(attacks.count(), 2 + 2 + 4 + 3);
    }

    #[test]
    fn bishop_blocker_below_the_square() {
        // Blocker on b2 (9) seen from d4 along the south-west diagonal.
        let attacks = bishop_attacks(D4, Bitboard::from_square(9));
        assert!(attacks.test(18));
        assert!(attacks.test(9));
        assert!(!attacks.test(0));
    }
}
