//! Processors: drivers that run bags to completion and return the result.
//!
//! A processor owns one or more bag queues, feeds them the initial bags,
//! keeps calling `process` with a bounded slice of work until no work is
//! left anywhere, then folds every queue's result together. Successive
//! `compute` calls are independent: each one starts from empty queues.

pub mod loop_processor;

pub use loop_processor::{LoopProcessor, RunStats};

use crate::bag::{Bag, DynBag};
use crate::fold::Fold;

/// Computing service over bags producing `R`.
pub trait GlbProcessor<R: Fold> {
    /// Run the given bags (of any kinds) to completion.
    ///
    /// `initializer` yields the identity value of `R`; it may be called once
    /// per worker.
    fn compute_bags<I, F>(&mut self, bags: I, initializer: F) -> R
    where
        I: IntoIterator<Item = DynBag<R>>,
        F: Fn() -> R;

    /// Run a single bag to completion.
    fn compute<B, F>(&mut self, bag: B, initializer: F) -> R
    where
        B: Bag<R>,
        F: Fn() -> R,
    {
        self.compute_bags(std::iter::once(DynBag::new(bag)), initializer)
    }

    /// Run a collection of same-kind bags to completion.
    fn compute_all<B, I, F>(&mut self, bags: I, initializer: F) -> R
    where
        B: Bag<R>,
        I: IntoIterator<Item = B>,
        F: Fn() -> R,
    {
        self.compute_bags(bags.into_iter().map(DynBag::new), initializer)
    }
}
