//! Two-stage spawning workload.
//!
//! A [`SpawnBag`] holding `n` units gives one single-unit [`UnitBag`] to its
//! collector per unit processed. Each processed unit of a `UnitBag` adds 1 to
//! the result, so the whole computation sums to `n`.

use crate::bag::Bag;
use crate::collector::WorkCollector;
use crate::payload::sum::Sum;

/// Spawns one [`UnitBag`] per unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnBag {
    remaining: u64,
}

impl SpawnBag {
    pub fn new(amount: u64) -> Self {
        Self { remaining: amount }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Bag<Sum> for SpawnBag {
    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    fn process(&mut self, work_amount: usize, collector: &mut dyn WorkCollector<Sum>) {
        let mut budget = work_amount;
        while self.remaining > 0 && budget > 0 {
            collector.give_bag(UnitBag::new(1));
            self.remaining -= 1;
            budget -= 1;
        }
    }

    fn split(&mut self) -> Option<Self> {
        if self.remaining < 2 {
            return None;
        }
        let half = self.remaining / 2;
        self.remaining -= half;
        Some(Self::new(half))
    }

    fn merge(&mut self, other: Self) {
        self.remaining += other.remaining;
    }

    // Spawning contributes nothing by itself.
    fn submit(&self, _: &mut Sum) {}
}

/// Counts processed units into the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitBag {
    remaining: u64,
    done: u64,
}

impl UnitBag {
    pub fn new(amount: u64) -> Self {
        Self {
            remaining: amount,
            done: 0,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn done(&self) -> u64 {
        self.done
    }
}

impl Bag<Sum> for UnitBag {
    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    fn process(&mut self, work_amount: usize, _: &mut dyn WorkCollector<Sum>) {
        let n = self.remaining.min(work_amount as u64);
        self.remaining -= n;
        self.done += n;
    }

    fn split(&mut self) -> Option<Self> {
        if self.remaining < 2 {
            return None;
        }
        let half = self.remaining / 2;
        self.remaining -= half;
        Some(Self::new(half))
    }

    fn merge(&mut self, other: Self) {
        self.remaining += other.remaining;
        self.done += other.done;
    }

    fn submit(&self, result: &mut Sum) {
        result.sum += self.done as i64;
    }
}
