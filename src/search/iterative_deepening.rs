//! Root move loop and iterative deepening.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{MATE_SCORE, MATE_THRESHOLD};
use crate::search::negamax::{mated_score, negamax, SearchContext};
use crate::search::report::SearchReport;

const INFINITY: i32 = MATE_SCORE + 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest fully searched iteration; 0 when none finished.
    pub depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

struct RootIteration {
    best_move: Option<Move>,
    score: i32,
    pv: Vec<Move>,
    completed: bool,
}

/// Deepen one ply at a time up to `max_depth`, keeping the result of the last
/// finished iteration when the budget runs out.
pub fn iterative_deepening_search(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_>,
    max_depth: u8,
) -> SearchResult {
    ctx.heuristics.reset_killers();

    let mut root_moves = generate_legal_moves(game_state);
    if root_moves.is_empty() {
        let score = if is_king_in_check(game_state, game_state.side_to_move) {
            mated_score(0)
        } else {
            0
        };
        return SearchResult {
            score,
            nodes: ctx.nodes,
            ..SearchResult::default()
        };
    }

    presort_by_static_eval(game_state, ctx, &mut root_moves);
    let mut result = SearchResult {
        best_move: Some(root_moves[0]),
        score: root_moves[0].score,
        depth: 0,
        nodes: 0,
        pv: vec![root_moves[0]],
    };

    for depth in 1..=max_depth.max(1) {
        let iteration = search_root(game_state, ctx, &mut root_moves, depth);

        if !iteration.completed {
            // A partly searched first ply still beats the static guess.
            if depth == 1 {
                if let Some(best) = iteration.best_move {
                    result.best_move = Some(best);
                    result.score = iteration.score;
                    result.pv = iteration.pv;
                }
            }
            log::debug!("iteration {depth} interrupted after {} nodes", ctx.nodes);
            break;
        }

        result.best_move = iteration.best_move;
        result.score = iteration.score;
        result.depth = depth;
        result.pv = iteration.pv;

        let report = SearchReport {
            depth,
            score: result.score,
            nodes: ctx.nodes,
            elapsed: ctx.control.elapsed(),
            pv: result.pv.clone(),
        };
        log::debug!("{}", report.to_uci_info());
        ctx.progress = report.clone();
        ctx.report(&report);

        if result.score.abs() >= MATE_THRESHOLD {
            break;
        }
    }

    result.nodes = ctx.nodes;
    result
}

fn presort_by_static_eval(game_state: &mut GameState, ctx: &SearchContext<'_>, moves: &mut [Move]) {
    for mv in moves.iter_mut() {
        if make_move(game_state, *mv) {
            mv.score = -ctx.scorer.score(game_state);
            unmake_move(game_state, *mv);
        }
    }
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

fn search_root(
    game_state: &mut GameState,
    ctx: &mut SearchContext<'_>,
    root_moves: &mut [Move],
    depth: u8,
) -> RootIteration {
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut iteration = RootIteration {
        best_move: None,
        score: -INFINITY,
        pv: Vec::new(),
        completed: false,
    };
    let mut child_pv = Vec::new();

    for index in 0..root_moves.len() {
        if ctx.should_abort() {
            return iteration;
        }
        let mv = root_moves[index];
        if !make_move(game_state, mv) {
            continue;
        }
        let score = -negamax(game_state, ctx, -beta, -alpha, depth - 1, 1, &mut child_pv);
        unmake_move(game_state, mv);

        if ctx.aborted() {
            return iteration;
        }
        log::trace!("depth {depth} root move {mv} scored {score}");
        root_moves[index].score = score;

        if score > alpha {
            alpha = score;
            iteration.best_move = Some(mv);
            iteration.score = score;
            iteration.pv.clear();
            iteration.pv.push(mv);
            iteration.pv.extend_from_slice(&child_pv);
        }
    }

    root_moves.sort_by(|a, b| b.score.cmp(&a.score));
    iteration.completed = true;
    iteration
}
