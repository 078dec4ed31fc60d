//! UCI protocol front end and command dispatcher.
//!
//! The dispatcher owns the current position and one search worker. It waits on
//! two sources at once, protocol lines and worker events, so a best move can
//! be delivered while no command is pending. While a search is in flight only
//! `stop`, `quit` and read-only commands are served.

use std::io::{self, BufRead, Write};
use std::mem;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, unbounded, Receiver};

use crate::engines::engine_alphabeta::{AlphaBetaEngine, EngineConfig};
use crate::engines::engine_trait::{EngineOutput, GoParams};
use crate::engines::search_worker::{SearchWorker, WorkerCommand, WorkerEvent};
use crate::errors::UciError;
use crate::game_state::game_state::GameState;
use crate::utils::fen_parser::parse_fen_with_warnings;
use crate::utils::long_algebraic::apply_move_list;
use crate::utils::render_game_state::{render_bitboards, render_game_state, render_legal_moves};

const UCI_ENGINE_NAME: &str = "bitbrook";
const UCI_ENGINE_AUTHOR: &str = "the bitbrook developers";

/// Read stdin on a helper thread and serve UCI on stdout until `quit` or EOF.
pub fn run_stdio_loop() -> io::Result<()> {
    let (line_tx, line_rx) = unbounded::<String>();
    thread::Builder::new()
        .name("bitbrook-stdin".to_owned())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        log::error!("reading stdin failed: {err}");
                        break;
                    }
                }
            }
        })?;

    let mut uci = UciState::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    uci.run(line_rx, &mut out)
}

#[derive(Debug)]
enum SearchState {
    Idle,
    Searching { infinite: bool },
    /// An infinite search finished early; its move waits for `stop`.
    Holding(EngineOutput),
}

pub struct UciState {
    game_state: GameState,
    config: EngineConfig,
    worker: SearchWorker,
    search: SearchState,
    debug_mode: bool,
}

impl UciState {
    pub fn new() -> io::Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        let worker = SearchWorker::spawn(Box::new(AlphaBetaEngine::new(config)))?;
        Ok(Self {
            game_state: GameState::new_game(),
            config,
            worker,
            search: SearchState::Idle,
            debug_mode: false,
        })
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn is_searching(&self) -> bool {
        matches!(self.search, SearchState::Searching { .. })
    }

    /// Serve commands from `lines` until `quit` or until the sender hangs up.
    pub fn run(&mut self, lines: Receiver<String>, out: &mut impl Write) -> io::Result<()> {
        let events = self.worker.events().clone();
        loop {
            let step: io::Result<bool> = select! {
                recv(lines) -> line => match line {
                    Ok(line) => self.handle_command(&line, out),
                    Err(_) => {
                        log::info!("input closed");
                        Ok(true)
                    }
                },
                recv(events) -> event => match event {
                    Ok(event) => self.handle_event(event, out).map(|()| false),
                    Err(_) => {
                        log::error!("search worker hung up");
                        Ok(true)
                    }
                },
            };
            let quit = step?;
            out.flush()?;
            if quit {
                break;
            }
        }
        self.shutdown(out)
    }

    /// Handle one protocol line. Returns `true` when the session should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        let mut parts = trimmed.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(false);
        };
        let cmd = cmd.to_ascii_lowercase();

        match cmd.as_str() {
            "uci" => {
                writeln!(out, "id name {UCI_ENGINE_NAME}")?;
                writeln!(out, "id author {UCI_ENGINE_AUTHOR}")?;
                for option in self.config.uci_option_lines() {
                    writeln!(out, "{option}")?;
                }
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "debug" => match parts.next() {
                Some("on") => self.debug_mode = true,
                Some("off") => self.debug_mode = false,
                _ => writeln!(out, "info string debug expects on or off")?,
            },
            "ucinewgame" => {
                if self.require_idle(&cmd, out)? {
                    log::info!("new game");
                    self.game_state = GameState::new_game();
                    self.worker.send(WorkerCommand::NewGame);
                }
            }
            "position" => {
                if self.require_idle(&cmd, out)? {
                    match self.handle_position(trimmed) {
                        Ok(diagnostics) => {
                            for line in diagnostics {
                                writeln!(out, "info string {line}")?;
                            }
                        }
                        Err(err) => writeln!(out, "info string position error: {err}")?,
                    }
                }
            }
            "go" => {
                if self.require_idle(&cmd, out)? {
                    match parse_go_params(trimmed) {
                        Ok(params) => self.start_search(params, out)?,
                        Err(err) => {
                            writeln!(out, "info string go error: {err}")?;
                            writeln!(out, "bestmove 0000")?;
                        }
                    }
                }
            }
            "stop" => self.handle_stop(out)?,
            "setoption" => {
                if self.require_idle(&cmd, out)? {
                    if let Err(err) = self.handle_setoption(trimmed) {
                        writeln!(out, "info string setoption error: {err}")?;
                    }
                }
            }
            "pb" => writeln!(out, "{}", render_game_state(&self.game_state))?,
            "pbb" => write!(out, "{}", render_bitboards(&self.game_state))?,
            "pm" => writeln!(out, "{}", render_legal_moves(&mut self.game_state))?,
            "ponderhit" | "register" => writeln!(out, "info string {cmd} not supported")?,
            "quit" | "q" => return Ok(true),
            other => log::debug!("ignoring unknown command {other:?}"),
        }

        Ok(false)
    }

    /// Forward one worker event to the GUI.
    pub fn handle_event(&mut self, event: WorkerEvent, out: &mut impl Write) -> io::Result<()> {
        match event {
            WorkerEvent::Info(line) => writeln!(out, "{line}"),
            WorkerEvent::BestMove(output) => {
                match mem::replace(&mut self.search, SearchState::Idle) {
                    SearchState::Searching { infinite: true } => {
                        log::debug!("holding {} until stop", output.bestmove_line());
                        self.search = SearchState::Holding(output);
                        Ok(())
                    }
                    _ => writeln!(out, "{}", output.bestmove_line()),
                }
            }
        }
    }

    /// Block until the running search has answered or `timeout` passes.
    /// Returns `true` once no search is running.
    pub fn wait_for_search(&mut self, out: &mut impl Write, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        while self.is_searching() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.worker.events().recv_timeout(remaining) {
                Ok(event) => self.handle_event(event, out)?,
                Err(_) => return Ok(false),
            }
        }
        Ok(true)
    }

    fn require_idle(&self, cmd: &str, out: &mut impl Write) -> io::Result<bool> {
        if matches!(self.search, SearchState::Idle) {
            return Ok(true);
        }
        log::warn!("{cmd} arrived during a search, ignoring it");
        writeln!(out, "info string {cmd} ignored while searching")?;
        Ok(false)
    }

    fn start_search(&mut self, params: GoParams, out: &mut impl Write) -> io::Result<()> {
        if self.debug_mode {
            writeln!(out, "info string go {params:?}")?;
        }
        let infinite = params.infinite;
        if self.worker.start_search(self.game_state.clone(), params) {
            self.search = SearchState::Searching { infinite };
        } else {
            log::error!("search worker is gone");
            writeln!(out, "info string search worker unavailable")?;
            writeln!(out, "bestmove 0000")?;
        }
        Ok(())
    }

    fn handle_stop(&mut self, out: &mut impl Write) -> io::Result<()> {
        match mem::replace(&mut self.search, SearchState::Idle) {
            SearchState::Searching { .. } => {
                self.worker.stop();
                // The answer is printed as soon as the worker delivers it.
                self.search = SearchState::Searching { infinite: false };
            }
            SearchState::Holding(output) => writeln!(out, "{}", output.bestmove_line())?,
            SearchState::Idle => {}
        }
        Ok(())
    }

    /// Returns diagnostics worth showing to the GUI. A move list is played up to
    /// its first bad move and the position reached so far is kept.
    fn handle_position(&mut self, line: &str) -> Result<Vec<String>, UciError> {
        let mut tokens = line.split_whitespace().skip(1).peekable();
        let mut diagnostics = Vec::new();

        let mut game_state = match tokens.next() {
            Some("startpos") => GameState::new_game(),
            Some("fen") => {
                let mut fen_parts = Vec::new();
                while let Some(part) = tokens.next_if(|&part| part != "moves") {
                    fen_parts.push(part);
                }
                let (game_state, warnings) = parse_fen_with_warnings(&fen_parts.join(" "))?;
                for warning in &warnings {
                    log::warn!("{warning}");
                }
                diagnostics.extend(warnings);
                game_state
            }
            _ => return Err(UciError::MissingPosition),
        };

        if tokens.next() == Some("moves") {
            let moves = tokens.collect::<Vec<_>>().join(" ");
            if let Err(err) = apply_move_list(&mut game_state, &moves) {
                diagnostics.push(format!("move list abandoned: {err}"));
            }
        }

        self.game_state = game_state;
        Ok(diagnostics)
    }

    fn handle_setoption(&mut self, line: &str) -> Result<(), UciError> {
        let mut name = Vec::new();
        let mut value = Vec::new();
        let mut target: Option<&mut Vec<&str>> = None;
        for token in line.split_whitespace().skip(1) {
            match token {
                "name" => target = Some(&mut name),
                "value" => target = Some(&mut value),
                _ => {
                    if let Some(words) = target.as_mut() {
                        words.push(token);
                    }
                }
            }
        }
        let name = name.join(" ");
        let value = value.join(" ");

        self.config.apply_option(&name, &value)?;
        self.worker.send(WorkerCommand::SetOption { name, value });
        Ok(())
    }

    fn shutdown(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.worker.shutdown() {
            match event {
                WorkerEvent::Info(line) => writeln!(out, "{line}")?,
                WorkerEvent::BestMove(output) => writeln!(out, "{}", output.bestmove_line())?,
            }
        }
        if let SearchState::Holding(output) = mem::replace(&mut self.search, SearchState::Idle) {
            writeln!(out, "{}", output.bestmove_line())?;
        }
        out.flush()
    }
}

fn parse_go_params(line: &str) -> Result<GoParams, UciError> {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace().skip(1);
    while let Some(token) = tokens.next() {
        match token {
            "depth" => params.depth = Some(go_value(token, tokens.next())?),
            "movetime" => params.movetime_ms = Some(go_value(token, tokens.next())?),
            "nodes" => params.nodes = Some(go_value(token, tokens.next())?),
            "wtime" => params.wtime_ms = Some(go_value(token, tokens.next())?),
            "btime" => params.btime_ms = Some(go_value(token, tokens.next())?),
            "winc" => params.winc_ms = Some(go_value(token, tokens.next())?),
            "binc" => params.binc_ms = Some(go_value(token, tokens.next())?),
            "movestogo" => params.movestogo = Some(go_value(token, tokens.next())?),
            "infinite" => params.infinite = true,
            "ponder" | "searchmoves" | "mate" => log::warn!("go {token} is not supported"),
            _ => log::debug!("ignoring go token {token:?}"),
        }
    }
    Ok(params)
}

fn go_value<T: FromStr>(name: &str, value: Option<&str>) -> Result<T, UciError> {
    let value = value.unwrap_or_default();
    value.parse().map_err(|_| UciError::BadValue {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;

    fn output_of(state: &mut UciState, line: &str) -> String {
        let mut out = Vec::new();
        state.handle_command(line, &mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("UCI output is ASCII")
    }

    #[test]
    fn position_startpos_with_moves_updates_state() {
        let mut state = UciState::new().expect("worker should spawn");
        let out = output_of(&mut state, "position startpos moves e2e4 e7e5 g1f3");
        assert!(out.is_empty());
        assert_eq!(state.game_state().side_to_move, Color::Dark);
    }

    #[test]
    fn position_fen_without_moves_updates_state() {
        let mut state = UciState::new().expect("worker should spawn");
        output_of(&mut state, "position fen 4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(state.game_state().get_fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    }

    #[test]
    fn fen_repairs_are_reported_as_info_strings() {
        let mut state = UciState::new().expect("worker should spawn");
        let out = output_of(&mut state, "position fen 4k3/8/8/8/8/8/4P3/4K3 x - - 0 1");
        assert_eq!(out, "info string invalid side to move \"x\", using white\n");
        assert_eq!(state.game_state().side_to_move, Color::Light);
    }

    #[test]
    fn bad_move_keeps_the_moves_before_it() {
        let mut state = UciState::new().expect("worker should spawn");
        let out = output_of(&mut state, "position startpos moves e2e4 e7e5 e1e3 g1f3");
        assert!(out.starts_with("info string move list abandoned: "));
        assert_eq!(
            state.game_state().get_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
        );
    }

    #[test]
    fn unusable_position_leaves_the_old_one() {
        let mut state = UciState::new().expect("worker should spawn");
        output_of(&mut state, "position startpos moves e2e4");
        let before = state.game_state().clone();
        let out = output_of(&mut state, "position fen 8/8/8/8/8/8/8/8 w - - 0 1");
        assert!(out.starts_with("info string position error: "));
        assert_eq!(output_of(&mut state, "position bogus"), "info string position error: position command needs startpos or fen\n");
        assert_eq!(state.game_state(), &before);
    }

    #[test]
    fn uci_lists_identity_and_options() {
        let mut state = UciState::new().expect("worker should spawn");
        let out = output_of(&mut state, "uci");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id name bitbrook");
        assert!(lines.contains(&"option name Depth type spin default 5 min 1 max 64"));
        assert_eq!(lines.last().copied(), Some("uciok"));
        assert_eq!(output_of(&mut state, "isready"), "readyok\n");
    }

    #[test]
    fn setoption_updates_the_config() {
        let mut state = UciState::new().expect("worker should spawn");
        assert!(output_of(&mut state, "setoption name Depth value 3").is_empty());
        assert_eq!(state.config().default_depth, 3);
        let out = output_of(&mut state, "setoption name Hash value 64");
        assert_eq!(out, "info string setoption error: unknown option \"Hash\"\n");
    }

    #[test]
    fn parse_go_params_reads_clock_fields() {
        let params = parse_go_params("go wtime 120000 btime 60000 winc 1000 binc 500 movestogo 24")
            .expect("go params should parse");
        assert_eq!(params.movetime_ms, None);
        assert_eq!(params.wtime_ms, Some(120_000));
        assert_eq!(params.btime_ms, Some(60_000));
        assert_eq!(params.winc_ms, Some(1_000));
        assert_eq!(params.binc_ms, Some(500));
        assert_eq!(params.movestogo, Some(24));
    }

    #[test]
    fn parse_go_params_modes_and_errors() {
        let params = parse_go_params("go nodes 50000 depth 4 infinite").expect("go params should parse");
        assert_eq!(params.nodes, Some(50_000));
        assert_eq!(params.depth, Some(4));
        assert!(params.infinite);

        assert_eq!(
            parse_go_params("go movetime soon"),
            Err(UciError::BadValue {
                name: "movetime".to_owned(),
                value: "soon".to_owned()
            })
        );
        assert!(parse_go_params("go depth").is_err());
    }

    #[test]
    fn go_depth_answers_with_a_legal_best_move() {
        let mut state = UciState::new().expect("worker should spawn");
        output_of(&mut state, "position startpos moves e2e4");
        let mut out = Vec::new();
        state.handle_command("go depth 2", &mut out).expect("write");
        assert!(state.is_searching());
        assert!(state.wait_for_search(&mut out, Duration::from_secs(30)).expect("write"));
        let text = String::from_utf8(out).expect("ASCII");
        let bestmove = text.lines().last().expect("some output");
        assert!(bestmove.starts_with("bestmove "));
        assert!(text.contains("info depth 2 "));
    }

    #[test]
    fn commands_during_a_search_are_ignored() {
        let mut state = UciState::new().expect("worker should spawn");
        output_of(&mut state, "go infinite");
        let out = output_of(&mut state, "position startpos moves e2e4");
        assert_eq!(out, "info string position ignored while searching\n");
        assert_eq!(state.game_state(), &GameState::new_game());
        output_of(&mut state, "stop");
        let mut out = Vec::new();
        assert!(state.wait_for_search(&mut out, Duration::from_secs(30)).expect("write"));
        let text = String::from_utf8(out).expect("ASCII");
        assert!(text.lines().any(|line| line.starts_with("bestmove ")));
    }

    #[test]
    fn debug_dumps() {
        let mut state = UciState::new().expect("worker should spawn");
        assert!(output_of(&mut state, "pb").contains("white to move; ep: -; castling: KQkq"));
        assert!(output_of(&mut state, "pbb").contains("black pieces"));
        assert!(output_of(&mut state, "pm").starts_with("20 legal moves: "));
        assert_eq!(output_of(&mut state, "ponderhit"), "info string ponderhit not supported\n");
        assert!(output_of(&mut state, "quit").is_empty());
    }
}
