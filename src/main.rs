use std::process::ExitCode;

use env_logger::{Builder, Env, Target};

fn main() -> ExitCode {
    // stdout carries the protocol, so logs go to stderr only.
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    match bitbrook::uci::uci_top::run_stdio_loop() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("uci session failed: {err}");
            ExitCode::FAILURE
        }
    }
}
