//! Turning `go` arguments into a concrete search budget.
//!
//! An explicit `movetime` wins. Otherwise the mover's clock is split over the
//! moves expected to remain, plus most of the increment.

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::limits::{SearchLimits, MAX_SEARCH_DEPTH};

pub fn resolve_limits(
    game_state: &GameState,
    params: &GoParams,
    default_depth: u8,
    move_overhead_ms: u64,
) -> SearchLimits {
    let (remaining, increment) = match game_state.side_to_move {
        Color::Light => (params.wtime_ms, params.winc_ms),
        Color::Dark => (params.btime_ms, params.binc_ms),
    };

    let movetime_ms = match (params.movetime_ms, remaining) {
        (Some(ms), _) => Some(ms.saturating_sub(move_overhead_ms).max(1)),
        (None, Some(clock)) => Some(clock_budget_ms(
            game_state,
            clock,
            increment.unwrap_or(0),
            params.movestogo,
            move_overhead_ms,
        )),
        (None, None) => None,
    };

    // Anything bounded by time, nodes or a stop command deepens as far as it can.
    let unbounded_depth = params.infinite || movetime_ms.is_some() || params.nodes.is_some();
    let depth = match params.depth {
        Some(depth) => depth,
        None if unbounded_depth => MAX_SEARCH_DEPTH,
        None => default_depth,
    };

    SearchLimits {
        depth: depth.clamp(1, MAX_SEARCH_DEPTH),
        movetime_ms,
        nodes: params.nodes,
        infinite: params.infinite,
    }
}

fn clock_budget_ms(
    game_state: &GameState,
    remaining_ms: u64,
    increment_ms: u64,
    movestogo: Option<u16>,
    move_overhead_ms: u64,
) -> u64 {
    let expected_moves_left = match movestogo {
        Some(moves) => u64::from(moves.max(1)),
        None if game_state.fullmove_number < 10 => 40,
        None if game_state.fullmove_number < 30 => 28,
        None => 18,
    };

    let usable = remaining_ms.saturating_sub(move_overhead_ms);
    let target = usable / expected_moves_left + increment_ms * 3 / 4;
    // Never plan to spend more than a quarter of what is left.
    target.min(usable / 4).max(1)
}
