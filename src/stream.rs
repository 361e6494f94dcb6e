//! Runs the search on a worker thread and hands solutions to a consumer.
//!
//! The channel has no buffer: the worker blocks on every solution until the
//! consumer takes it, so solutions arrive in discovery order and the worker
//! never runs ahead. The worker closes the channel when the search is done.

use std::ops::ControlFlow;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::debug;

use crate::error::Error;
use crate::pieces::Catalogue;
use crate::solver::{Search, SearchStats, Solution, SolutionSink};

impl SolutionSink for Sender<Solution> {
    fn accept(&mut self, solution: Solution) -> ControlFlow<()> {
        match self.send(solution) {
            Ok(()) => ControlFlow::Continue(()),
            // receiver dropped
            Err(_) => ControlFlow::Break(()),
        }
    }
}

/// Solutions streamed from a background search, in discovery order.
pub struct SolutionStream {
    receiver: Receiver<Solution>,
    worker: JoinHandle<SearchStats>,
}

impl SolutionStream {
    /// Starts the search over `catalogues` on a dedicated thread.
    pub fn spawn(catalogues: Vec<Catalogue>) -> Result<Self, Error> {
        let (sender, receiver) = bounded(0);

        let worker = thread::Builder::new()
            .name("search".into())
            .spawn(move || {
                let mut sender = sender;
                let stats = Search::new(&catalogues).run(&mut sender);
                debug!("search worker done, closing channel");
                stats
            })
            .map_err(Error::Spawn)?;

        Ok(Self { receiver, worker })
    }

    /// Stops listening and waits for the worker.
    ///
    /// If solutions are still pending the worker notices the hang-up on its
    /// next send and unwinds.
    pub fn finish(self) -> Result<SearchStats, Error> {
        let Self { receiver, worker } = self;
        drop(receiver);
        worker.join().map_err(|_| Error::WorkerPanicked)
    }
}

impl Iterator for SolutionStream {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        // fails only once the worker has dropped the sender
        self.receiver.recv().ok()
    }
}
