//! Engine abstraction used by the UCI front end and the search worker.
//!
//! `GoParams` carries the raw `go` arguments; each engine turns them into its
//! own search budget.

use std::sync::{atomic::AtomicBool, Arc};

use crate::errors::UciError;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::report::SearchReport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub nodes: Option<u64>,
    pub infinite: bool,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

impl EngineOutput {
    /// `bestmove <move>`, or the null move `0000` when there is nothing to play.
    pub fn bestmove_line(&self) -> String {
        match self.best_move {
            Some(mv) => format!("bestmove {mv}"),
            None => "bestmove 0000".to_owned(),
        }
    }
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), UciError>;

    /// Flag polled during search; raising it makes `choose_move` return early.
    fn set_stop_signal(&mut self, stop_signal: Arc<AtomicBool>);

    /// Search `game_state` and return the move to play. The position is
    /// restored before returning.
    fn choose_move(
        &mut self,
        game_state: &mut GameState,
        params: &GoParams,
        reporter: &mut dyn FnMut(&SearchReport),
    ) -> EngineOutput;
}
