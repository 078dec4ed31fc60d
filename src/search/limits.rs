//! Search budgets and the cooperative stop check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEPTH: u8 = 5;
pub const MAX_SEARCH_DEPTH: u8 = 64;

/// What a single search may spend. `infinite` searches run until stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: u8,
    pub movetime_ms: Option<u64>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            movetime_ms: None,
            nodes: None,
            infinite: false,
        }
    }
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: depth.clamp(1, MAX_SEARCH_DEPTH),
            ..Self::default()
        }
    }
}

/// Budget bookkeeping for one running search.
pub struct SearchControl<'a> {
    stop: &'a AtomicBool,
    started: Instant,
    deadline: Option<Instant>,
    node_limit: Option<u64>,
}

impl<'a> SearchControl<'a> {
    pub fn new(limits: &SearchLimits, stop: &'a AtomicBool) -> Self {
        let started = Instant::now();
        let deadline = match (limits.infinite, limits.movetime_ms) {
            (false, Some(ms)) => Some(started + Duration::from_millis(ms)),
            _ => None,
        };
        Self {
            stop,
            started,
            deadline,
            node_limit: limits.nodes,
        }
    }

    #[inline]
    pub fn started(&self) -> Instant {
        self.started
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn node_budget_spent(&self, nodes: u64) -> bool {
        self.node_limit.is_some_and(|limit| nodes >= limit)
    }

    #[inline]
    pub fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
