//! # glb-rs
//!
//! Lifeline-based global load balancing, the per-worker core.
//!
//! Users supply bags (splittable, mergeable units of work) and a foldable
//! result type. The [`BagQueue`] multiplexes bags of several kinds for one
//! worker: it merges same-kind work, picks what to process next, splits work
//! off for idle peers, and folds partial results. Deciding which peer to
//! steal from and moving work between processes is left to the layer above.

pub mod bag;
pub mod collector;
pub mod config;
pub mod error;
pub mod fold;
pub mod payload;
pub mod processor;
pub mod queue;
pub mod telemetry;

pub use bag::{Bag, BagKind, DynBag};
pub use collector::WorkCollector;
pub use fold::Fold;
pub use processor::{GlbProcessor, LoopProcessor};
pub use queue::BagQueue;
