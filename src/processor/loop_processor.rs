//! Single-worker processor.
//!
//! Runs everything on one bag queue in the calling thread. No stealing,
//! no lifelines: the queue is simply drained slice by slice.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::bag::DynBag;
use crate::collector::WorkCollector;
use crate::config::Config;
use crate::fold::Fold;
use crate::processor::GlbProcessor;
use crate::queue::BagQueue;
use crate::telemetry::compute::{record_compute_finished, start_compute_span};

/// Outcome of the last `compute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Number of `process` slices executed.
    pub slices: u64,
    pub elapsed: Duration,
}

pub struct LoopProcessor<R: Fold> {
    queue: BagQueue<R>,
    work_size: usize,
    last_run: Option<RunStats>,
}

impl<R: Fold> LoopProcessor<R> {
    /// `work_size` is the number of work units per `process` slice; zero is
    /// bumped to one so the loop always makes progress.
    pub fn new(work_size: usize) -> Self {
        Self {
            queue: BagQueue::new(),
            work_size: work_size.max(1),
            last_run: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.work_size)
    }

    pub fn work_size(&self) -> usize {
        self.work_size
    }

    pub fn last_run(&self) -> Option<RunStats> {
        self.last_run
    }
}

impl<R: Fold> GlbProcessor<R> for LoopProcessor<R> {
    fn compute_bags<I, F>(&mut self, bags: I, initializer: F) -> R
    where
        I: IntoIterator<Item = DynBag<R>>,
        F: Fn() -> R,
    {
        let span = start_compute_span("loop", self.work_size);
        let _enter = span.enter();
        let start = Instant::now();

        self.queue.clear();
        for bag in bags {
            self.queue.give_dyn(bag);
        }
        debug!(kinds = self.queue.len(), "initial bags queued");

        let mut slices = 0u64;
        while !self.queue.is_empty() {
            self.queue.process(self.work_size);
            slices += 1;
        }

        let result = self.queue.result(initializer);
        let elapsed = start.elapsed();
        record_compute_finished(&span, slices, elapsed.as_millis() as u64);
        self.last_run = Some(RunStats { slices, elapsed });
        result
    }
}
