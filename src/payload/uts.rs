//! Unbalanced tree search.
//!
//! Explores an implicit tree whose shape is fixed by a root seed: every node
//! has a geometrically distributed number of children (branching factor 4)
//! and each child's seed is derived from its parent's seed and its index.
//! The result is the number of nodes in the tree, as a [`Sum`].
//!
//! The bag keeps a stack of frontier records. A record stands for one
//! expanded node whose children `[lower, upper)` are not explored yet;
//! children are explored from the top index down. Splitting hands off the
//! upper half of every range with at least two children left, so the tree
//! (and the final count) does not depend on how work gets split.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bag::Bag;
use crate::collector::WorkCollector;
use crate::payload::sum::Sum;

/// Branching factor of the tree.
pub const BRANCHING_FACTOR: f64 = 4.0;

const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    /// Seed of the expanded node; children seeds derive from it.
    seed: u64,
    /// Depth budget handed to the children.
    depth: u32,
    lower: u32,
    upper: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtsBag {
    frontier: Vec<Frontier>,
    /// Nodes explored (or counted as leaves) by this bag.
    count: u64,
}

impl UtsBag {
    /// A bag with nothing to explore.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root a tree at `seed`, bounded to `depth` levels, and expand the root.
    pub fn new(seed: u64, depth: u32) -> Self {
        let mut bag = Self {
            frontier: Vec::with_capacity(64),
            count: 0,
        };
        bag.digest(seed, depth);
        bag
    }

    /// Nodes counted so far.
    pub fn explored(&self) -> u64 {
        self.count
    }

    /// Known children not explored yet, summed over the frontier.
    pub fn pending(&self) -> u64 {
        self.frontier
            .iter()
            .map(|f| u64::from(f.upper - f.lower))
            .sum()
    }

    /// Explore the whole remaining tree in place.
    pub fn run(&mut self) {
        while !self.frontier.is_empty() {
            self.expand();
        }
    }

    /// Count one node and record its children, if it has any and the depth
    /// budget allows going further. Children at the last level are counted
    /// without being expanded.
    fn digest(&mut self, seed: u64, depth: u32) {
        self.count += 1;
        let children = child_count(seed);
        if children == 0 {
            return;
        }
        if depth > 1 {
            self.frontier.push(Frontier {
                seed,
                depth: depth - 1,
                lower: 0,
                upper: children,
            });
        } else {
            self.count += u64::from(children);
        }
    }

    /// Explore the next child of the top frontier record.
    fn expand(&mut self) {
        let Some(top) = self.frontier.last_mut() else {
            return;
        };
        let index = top.upper - 1;
        let (seed, depth) = (top.seed, top.depth);
        if index == top.lower {
            self.frontier.pop();
        } else {
            top.upper = index;
        }
        self.digest(child_seed(seed, index), depth);
    }
}

impl Bag<Sum> for UtsBag {
    fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    fn process(&mut self, work_amount: usize, _: &mut dyn WorkCollector<Sum>) {
        for _ in 0..work_amount {
            if self.frontier.is_empty() {
                break;
            }
            self.expand();
        }
    }

    fn split(&mut self) -> Option<Self> {
        let splittable = self
            .frontier
            .iter()
            .filter(|f| f.upper - f.lower >= 2)
            .count();
        if splittable == 0 {
            return None;
        }

        let mut taken = Vec::with_capacity(splittable);
        for record in &mut self.frontier {
            let p = record.upper - record.lower;
            if p >= 2 {
                let cut = record.upper - p / 2;
                taken.push(Frontier {
                    lower: cut,
                    ..*record
                });
                record.upper = cut;
            }
        }
        Some(Self {
            frontier: taken,
            count: 0,
        })
    }

    fn merge(&mut self, other: Self) {
        self.frontier.extend(other.frontier);
        self.count += other.count;
    }

    fn submit(&self, result: &mut Sum) {
        result.sum += self.count as i64;
    }
}

/// Number of children of the node with `seed`: geometric with mean
/// `BRANCHING_FACTOR`.
fn child_count(seed: u64) -> u32 {
    let mut rng = StdRng::seed_from_u64(seed);
    let u: f64 = rng.random();
    let den = (BRANCHING_FACTOR / (1.0 + BRANCHING_FACTOR)).ln();
    ((1.0 - u).ln() / den).floor() as u32
}

fn child_seed(parent: u64, index: u32) -> u64 {
    let mixed = parent ^ (u64::from(index) + 1).wrapping_mul(SEED_MIX);
    StdRng::seed_from_u64(mixed).random()
}
