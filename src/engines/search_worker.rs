//! The search worker: one thread that owns the engine.
//!
//! Commands reach the worker over a rendezvous channel, so a send only
//! completes once the worker is idle and has taken the command. Results go
//! back over an unbounded channel so the worker never waits on the
//! dispatcher.

use std::io;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::report::SearchReport;

#[derive(Debug)]
pub enum WorkerCommand {
    Search {
        game_state: Box<GameState>,
        params: GoParams,
    },
    NewGame,
    SetOption {
        name: String,
        value: String,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    /// A protocol line to forward, usually `info ...`.
    Info(String),
    BestMove(EngineOutput),
}

pub struct SearchWorker {
    commands: Sender<WorkerCommand>,
    events: Receiver<WorkerEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(mut engine: Box<dyn Engine>) -> io::Result<Self> {
        let (command_tx, command_rx) = bounded::<WorkerCommand>(0);
        let (event_tx, event_rx) = unbounded::<WorkerEvent>();
        let stop = Arc::new(AtomicBool::new(false));
        engine.set_stop_signal(Arc::clone(&stop));

        let handle = thread::Builder::new()
            .name("bitbrook-search".to_owned())
            .spawn(move || worker_loop(engine, command_rx, event_tx))?;

        Ok(Self {
            commands: command_tx,
            events: event_rx,
            stop,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn events(&self) -> &Receiver<WorkerEvent> {
        &self.events
    }

    /// Hand a position to the idle worker and start searching it.
    pub fn start_search(&self, game_state: GameState, params: GoParams) -> bool {
        self.stop.store(false, Ordering::SeqCst);
        self.send(WorkerCommand::Search {
            game_state: Box::new(game_state),
            params,
        })
    }

    /// Ask a running search to finish; its best move still arrives as an event.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Blocks until the worker takes the command. Returns `false` if the
    /// worker thread is gone.
    pub fn send(&self, command: WorkerCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Stop any search, join the thread and return the events it left behind.
    pub fn shutdown(&mut self) -> Vec<WorkerEvent> {
        let Some(handle) = self.handle.take() else {
            return Vec::new();
        };
        self.stop();
        // The worker may already have exited; either way it ends after this.
        let _ = self.commands.send(WorkerCommand::Quit);
        if handle.join().is_err() {
            log::error!("search worker panicked");
        }
        self.events.try_iter().collect()
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(mut engine: Box<dyn Engine>, commands: Receiver<WorkerCommand>, events: Sender<WorkerEvent>) {
    log::debug!("search worker running");
    for command in commands.iter() {
        match command {
            WorkerCommand::Search {
                mut game_state,
                params,
            } => {
                let output = engine.choose_move(&mut game_state, &params, &mut |report: &SearchReport| {
                    let _ = events.send(WorkerEvent::Info(report.to_uci_info()));
                });
                if events.send(WorkerEvent::BestMove(output)).is_err() {
                    break;
                }
            }
            WorkerCommand::NewGame => engine.new_game(),
            WorkerCommand::SetOption { name, value } => {
                if let Err(err) = engine.set_option(&name, &value) {
                    let _ = events.send(WorkerEvent::Info(format!("info string {err}")));
                }
            }
            WorkerCommand::Quit => break,
        }
    }
    log::debug!("search worker exiting");
}
