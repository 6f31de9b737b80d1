//! The single in-flight-load slot behind the TUI.
//!
//! Selector changes arrive faster than fetches complete, and a superseded
//! fetch must never overwrite a newer render. Every request is tagged with a
//! monotonically increasing generation number and runs on a worker thread;
//! completions come back over a channel and anything stale is dropped at
//! `poll` time. `cancel_in_flight` is the explicit cancellation operation:
//! it advances the generation so the superseded result is discarded on
//! arrival (the worker itself is left to finish and be ignored).

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::app::pipeline::{self, ChartData};
use crate::data::DataSource;
use crate::domain::ChartConfig;
use crate::error::AppError;

/// Render-cycle state: idle → loading → drawn | empty | failed.
///
/// Transitions happen only on selector change, explicit reload, or load
/// completion. There are no retries and no internal timers.
#[derive(Debug, Clone)]
pub enum ChartState {
    Idle,
    Loading,
    Drawn(ChartData),
    Empty,
    Failed,
}

/// A completed load, tagged with the generation that requested it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<Option<ChartData>, AppError>,
}

pub struct FetchController {
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    generation: u64,
}

impl FetchController {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            generation: 0,
        }
    }

    /// The generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate whatever is currently in flight without issuing a new
    /// request; its completion will be dropped.
    pub fn cancel_in_flight(&mut self) {
        self.generation += 1;
    }

    /// Start a load on a worker thread and return its generation.
    pub fn request(&mut self, source: DataSource, config: ChartConfig) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = pipeline::load_chart(&source, &config);
            // The receiver may be gone if the TUI already exited.
            let _ = tx.send(FetchOutcome { generation, result });
        });
        generation
    }

    /// Drain completions, returning the first one that is still current.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        loop {
            match self.rx.try_recv() {
                Ok(outcome) if outcome.generation == self.generation => return Some(outcome),
                // Stale generation: a newer request superseded it.
                Ok(_) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    #[cfg(test)]
    fn sender(&self) -> Sender<FetchOutcome> {
        self.tx.clone()
    }
}
