//! Move ordering memory: killer moves per ply and a history table.
//!
//! Killers are forgotten at the start of every search. History survives
//! between searches of the same game and is cleared on a new game.

use crate::moves::chess_move::Move;
use crate::search::see::see_value;

pub const MAX_PLY: usize = 128;

const CAPTURE_BASE: i32 = 1_000_000;
const PRIMARY_KILLER: i32 = 900_000;
const SECONDARY_KILLER: i32 = 800_000;
const HISTORY_CAP: i32 = 700_000;

pub struct SearchHeuristics {
    killers: [[Option<Move>; 2]; MAX_PLY],
    history: Box<[[[i32; 64]; 64]; 2]>,
}

impl Default for SearchHeuristics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchHeuristics {
    pub fn new() -> Self {
        Self {
            killers: [[None; 2]; MAX_PLY],
            history: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    pub fn reset_killers(&mut self) {
        self.killers = [[None; 2]; MAX_PLY];
    }

    pub fn reset_history(&mut self) {
        *self.history = [[[0; 64]; 64]; 2];
    }

    #[inline]
    pub fn killers(&self, ply: usize) -> [Option<Move>; 2] {
        self.killers.get(ply).copied().unwrap_or([None; 2])
    }

    #[inline]
    pub fn history_score(&self, mv: Move) -> i32 {
        self.history[mv.moved_piece().color.index()][mv.from() as usize][mv.to() as usize]
    }

    /// Remember a move that failed high at `ply` with `depth` plies left.
    pub fn record_cutoff(&mut self, mv: Move, ply: usize, depth: u8) {
        if mv.is_quiet() {
            if let Some(slot) = self.killers.get_mut(ply) {
                if !slot[0].is_some_and(|killer| killer.same_action(mv)) {
                    slot[1] = slot[0];
                    slot[0] = Some(mv);
                }
            }
        }

        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.history[mv.moved_piece().color.index()][mv.from() as usize]
            [mv.to() as usize];
        *entry = entry.saturating_add(bonus);
    }

    /// Sort `moves` best-first: captures and promotions by MVV-LVA, then this
    /// ply's killers, then quiet moves by history. Ties keep generation order.
    pub fn order_moves(&self, moves: &mut [Move], ply: usize) {
        let killers = self.killers(ply);
        for mv in moves.iter_mut() {
            mv.score = self.ordering_score(*mv, killers);
        }
        moves.sort_by(|a, b| b.score.cmp(&a.score));
    }

    fn ordering_score(&self, mv: Move, killers: [Option<Move>; 2]) -> i32 {
        if !mv.is_quiet() {
            let victim = mv.captured_piece().map_or(0, |piece| see_value(piece.kind));
            let promotion = mv.promotion_piece().map_or(0, |piece| see_value(piece.kind));
            let attacker = mv.moved_piece().kind.index() as i32;
            return CAPTURE_BASE + (victim + promotion) * 8 - attacker;
        }
        let is_killer = |slot: Option<Move>| slot.is_some_and(|killer| killer.same_action(mv));
        if is_killer(killers[0]) {
            PRIMARY_KILLER
        } else if is_killer(killers[1]) {
            SECONDARY_KILLER
        } else {
            self.history_score(mv).min(HISTORY_CAP)
        }
    }
}
