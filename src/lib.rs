//! Crate root module declarations for the bitbrook chess engine.
//!
//! Board state, move generation, search, engines, the UCI front end and the
//! text helpers are all exposed here so the binary, the integration tests and
//! the benches share one set of module paths.

pub mod errors;

pub mod game_state {
    pub mod bitboard;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod move_validation;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod heuristics;
    pub mod iterative_deepening;
    pub mod limits;
    pub mod negamax;
    pub mod quiescence;
    pub mod report;
    pub mod see;
}

pub mod engines {
    pub mod engine_alphabeta;
    pub mod engine_trait;
    pub mod search_worker;
    pub mod time_management;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
