use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bitbrook::engines::engine_alphabeta::AlphaBetaEngine;
use bitbrook::engines::engine_trait::{Engine, GoParams};
use bitbrook::game_state::game_state::GameState;
use bitbrook::search::report::SearchReport;

const POSITIONS: &[(&str, &str)] = &[
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    (
        "italian",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    ),
    ("rook_endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn bench_fixed_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_depth_4");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    let params = GoParams {
        depth: Some(4),
        ..GoParams::default()
    };
    for (name, fen) in POSITIONS {
        let game_state = GameState::from_fen(fen).expect("benchmark FEN should parse");
        group.bench_with_input(BenchmarkId::from_parameter(name), &game_state, |b, start| {
            b.iter(|| {
                // A fresh engine keeps history tables from leaking between samples.
                let mut engine = AlphaBetaEngine::default();
                let mut game_state = start.clone();
                let output = engine.choose_move(&mut game_state, &params, &mut |_: &SearchReport| {});
                black_box(output.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_fixed_depth);
criterion_main!(search_benches);
