//! Progress reports and their UCI `info` rendering.

use std::time::Duration;

use crate::moves::chess_move::Move;
use crate::search::board_scoring::{MATE_SCORE, MATE_THRESHOLD};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: Vec<Move>,
}

impl SearchReport {
    pub fn nps(&self) -> u64 {
        let micros = self.elapsed.as_micros().max(1);
        (u128::from(self.nodes) * 1_000_000 / micros) as u64
    }

    /// `info depth .. score .. nodes .. nps .. time .. pv ..`
    pub fn to_uci_info(&self) -> String {
        let mut line = format!(
            "info depth {} score {} nodes {} nps {} time {}",
            self.depth,
            format_score(self.score),
            self.nodes,
            self.nps(),
            self.elapsed.as_millis()
        );
        if !self.pv.is_empty() {
            line.push_str(" pv");
            for mv in &self.pv {
                line.push(' ');
                line.push_str(&mv.to_string());
            }
        }
        line
    }
}

/// `cp <centipawns>` or `mate <moves>`, negative when the side to move is mated.
pub fn format_score(score: i32) -> String {
    if score >= MATE_THRESHOLD {
        format!("mate {}", (MATE_SCORE - score + 1) / 2)
    } else if score <= -MATE_THRESHOLD {
        format!("mate -{}", (MATE_SCORE + score) / 2)
    } else {
        format!("cp {score}")
    }
}
