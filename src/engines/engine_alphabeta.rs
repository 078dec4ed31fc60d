//! The alpha-beta engine: iterative deepening negamax with quiescence,
//! killer and history ordering.

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::resolve_limits;
use crate::errors::UciError;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::heuristics::SearchHeuristics;
use crate::search::iterative_deepening::iterative_deepening_search;
use crate::search::limits::{SearchControl, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use crate::search::negamax::SearchContext;
use crate::search::report::SearchReport;

const MAX_MOVE_OVERHEAD_MS: u64 = 5_000;

/// Tunables exposed as UCI options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_depth: u8,
    pub move_overhead_ms: u64,
    pub report_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_depth: DEFAULT_SEARCH_DEPTH,
            move_overhead_ms: 30,
            report_interval: Duration::from_secs(1),
        }
    }
}

impl EngineConfig {
    /// The `option` lines printed in reply to `uci`.
    pub fn uci_option_lines(&self) -> Vec<String> {
        vec![
            format!(
                "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                self.default_depth
            ),
            format!(
                "option name MoveOverhead type spin default {} min 0 max {MAX_MOVE_OVERHEAD_MS}",
                self.move_overhead_ms
            ),
        ]
    }

    /// Apply one `setoption`. Option names are case-insensitive.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Result<(), UciError> {
        let bad_value = || UciError::BadValue {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        if name.eq_ignore_ascii_case("Depth") {
            let depth = value.trim().parse::<u8>().map_err(|_| bad_value())?;
            if !(1..=MAX_SEARCH_DEPTH).contains(&depth) {
                return Err(bad_value());
            }
            self.default_depth = depth;
        } else if name.eq_ignore_ascii_case("MoveOverhead") {
            let overhead = value.trim().parse::<u64>().map_err(|_| bad_value())?;
            if overhead > MAX_MOVE_OVERHEAD_MS {
                return Err(bad_value());
            }
            self.move_overhead_ms = overhead;
        } else {
            return Err(UciError::UnknownOption(name.to_owned()));
        }
        Ok(())
    }
}

pub struct AlphaBetaEngine {
    config: EngineConfig,
    scorer: Box<dyn BoardScorer>,
    heuristics: SearchHeuristics,
    stop_signal: Arc<AtomicBool>,
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AlphaBetaEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scorer(config, Box::new(PieceSquareScorer))
    }

    pub fn with_scorer(config: EngineConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            config,
            scorer,
            heuristics: SearchHeuristics::new(),
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Engine for AlphaBetaEngine {
    fn new_game(&mut self) {
        self.heuristics.reset_killers();
        self.heuristics.reset_history();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), UciError> {
        self.config.apply_option(name, value)
    }

    fn set_stop_signal(&mut self, stop_signal: Arc<AtomicBool>) {
        self.stop_signal = stop_signal;
    }

    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
        reporter: &mut dyn FnMut(&SearchReport),
    ) -> EngineOutput {
        let limits = resolve_limits(
            game_state,
            params,
            self.config.default_depth,
            self.config.move_overhead_ms,
        );
        log::info!("search started: {limits:?}");

        let stop_signal = Arc::clone(&self.stop_signal);
        let mut ctx = SearchContext::new(
            self.scorer.as_ref(),
            &mut self.heuristics,
            SearchControl::new(&limits, &stop_signal),
            reporter,
            self.config.report_interval,
        );
        let result = iterative_deepening_search(game_state, &mut ctx, limits.depth);
        log::info!(
            "search finished: depth {} nodes {} best {:?}",
            result.depth,
            result.nodes,
            result.best_move.map(|mv| mv.to_string())
        );

        EngineOutput {
            best_move: result.best_move,
            score: result.score,
            depth: result.depth,
            nodes: result.nodes,
            pv: result.pv,
        }
    }
}
