//! Fail-hard alpha-beta negamax over make/unmake.

use std::time::{Duration, Instant};

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_pseudo_legal_moves,
};
use crate::move_generation::legal_move_shared::GenTarget;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};
use crate::search::heuristics::SearchHeuristics;
use crate::search::limits::SearchControl;
use crate::search::quiescence::quiescence;
use crate::search::report::SearchReport;

/// Clock and limit checks happen once per this many nodes.
const POLL_INTERVAL_NODES: u64 = 1024;

/// Everything one search threads through the recursion.
pub struct SearchContext<'a> {
    pub scorer: &'a dyn BoardScorer,
    pub heuristics: &'a mut SearchHeuristics,
    pub control: SearchControl<'a>,
    pub nodes: u64,
    /// Best line known so far, repeated in periodic reports.
    pub progress: SearchReport,
    reporter: &'a mut dyn FnMut(&SearchReport),
    report_interval: Duration,
    last_report: Instant,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        scorer: &'a dyn BoardScorer,
        heuristics: &'a mut SearchHeuristics,
        control: SearchControl<'a>,
        reporter: &'a mut dyn FnMut(&SearchReport),
        report_interval: Duration,
    ) -> Self {
        let last_report = control.started();
        Self {
            scorer,
            heuristics,
            control,
            nodes: 0,
            progress: SearchReport::default(),
            reporter,
            report_interval,
            last_report,
            aborted: false,
        }
    }

    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Latches and returns whether the search has to unwind.
    #[inline]
    pub fn should_abort(&mut self) -> bool {
        if !self.aborted && self.control.stop_requested() {
            log::debug!("stop requested after {} nodes", self.nodes);
            self.aborted = true;
        }
        self.aborted
    }

    pub fn report(&mut self, report: &SearchReport) {
        (self.reporter)(report);
        self.last_report = Instant::now();
    }

    fn count_node(&mut self) {
        self.nodes += 1;
        if self.control.node_budget_spent(self.nodes) {
            self.aborted = true;
        }
        if self.nodes % POLL_INTERVAL_NODES != 0 {
            return;
        }
        if self.control.out_of_time() {
            self.aborted = true;
        }
        if self.last_report.elapsed() >= self.report_interval {
            let mut report = self.progress.clone();
            report.nodes = self.nodes;
            report.elapsed = self.control.elapsed();
            self.report(&report);
        }
    }
}

/// Score of the position for the side to move, searched `depth` plies deep.
///
/// `pv` receives the principal variation below this node.
pub fn negamax(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_>,
    mut alpha: i32,
    beta: i32,
    depth: u8,
    ply: usize,
    pv: &mut Vec<Move>,
) -> i32 {
    ctx.count_node();
    pv.clear();

    if depth == 0 {
        let side = game_state.side_to_move;
        if is_king_in_check(game_state, side) && generate_legal_moves(game_state).is_empty() {
            return mated_score(ply).clamp(alpha, beta);
        }
        return quiescence(game_state, ctx.scorer, alpha, beta);
    }

    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, GenTarget::All, &mut moves);
    ctx.heuristics.order_moves(&mut moves, ply);

    let mut legal_moves = 0;
    let mut child_pv = Vec::new();
    for mv in moves {
        if ctx.should_abort() {
            return alpha;
        }
        if !make_move(game_state, mv) {
            continue;
        }
        legal_moves += 1;
        let score = -negamax(game_state, ctx, -beta, -alpha, depth - 1, ply + 1, &mut child_pv);
        unmake_move(game_state, mv);

        if ctx.aborted() {
            return alpha;
        }
        if score >= beta {
            ctx.heuristics.record_cutoff(mv, ply, depth);
            return beta;
        }
        if score > alpha {
            alpha = score;
            pv.clear();
            pv.push(mv);
            pv.extend_from_slice(&child_pv);
        }
    }

    if legal_moves == 0 {
        let score = if is_king_in_check(game_state, game_state.side_to_move) {
            mated_score(ply)
        } else {
            0
        };
        return score.clamp(alpha, beta);
    }
    alpha
}

#[inline]
pub fn mated_score(ply: usize) -> i32 {
    -(MATE_SCORE - ply as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, MATE_THRESHOLD};
    use crate::search::limits::SearchLimits;
    use std::sync::atomic::{AtomicBool, Ordering};

    const INF: i32 = MATE_SCORE + 1;

    fn search(fen: &str, depth: u8, stop: &AtomicBool) -> (i32, Vec<Move>, u64) {
        let mut game_state = GameState::from_fen(fen).expect("FEN should parse");
        let before = game_state.clone();
        let mut heuristics = SearchHeuristics::new();
        let mut reporter = |_: &SearchReport| {};
        let control = SearchControl::new(&SearchLimits::default(), stop);
        let mut ctx = SearchContext::new(
            &MaterialScorer,
            &mut heuristics,
            control,
            &mut reporter,
            Duration::from_secs(1),
        );
        let mut pv = Vec::new();
        let score = negamax(&mut game_state, &mut ctx, -INF, INF, depth, 0, &mut pv);
        let nodes = ctx.nodes;
        assert_eq!(game_state, before);
        (score, pv, nodes)
    }

    #[test]
    fn finds_mate_in_one() {
        let stop = AtomicBool::new(false);
        let (score, pv, _) = search("6k1/5Q2/6K1/8/8/8/8/8 w - - 0 1", 1, &stop);
        assert_eq!(score, MATE_SCORE - 1);
        assert_eq!(pv.len(), 1);
        assert!(["f7g7", "f7e8"].contains(&pv[0].to_string().as_str()));
    }

    #[test]
    fn mated_and_stalemated_sides() {
        let stop = AtomicBool::new(false);
        let (mated, _, _) = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2, &stop);
        assert_eq!(mated, mated_score(0));
        let (stalemate, _, _) = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2, &stop);
        assert_eq!(stalemate, 0);
    }

    #[test]
    fn wins_material_at_depth_two() {
        let stop = AtomicBool::new(false);
        let (score, pv, _) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 2, &stop);
        assert_eq!(pv[0].to_string(), "d1d5");
        assert!(score >= 500 && score < MATE_THRESHOLD);
    }

    #[test]
    fn raised_stop_flag_unwinds_with_alpha() {
        let stop = AtomicBool::new(true);
        let (score, pv, nodes) = search(crate::game_state::chess_rules::STARTING_POSITION_FEN, 4, &stop);
        stop.store(false, Ordering::Relaxed);
        assert_eq!(score, -INF);
        assert!(pv.is_empty());
        assert_eq!(nodes, 1);
    }
}
