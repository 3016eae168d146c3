//! Sample payloads: a result type and a few bags built on it.
//!
//! These are users of the engine, not part of it. They double as the
//! workloads for the CLI and the integration tests.

pub mod spawn;
pub mod sum;
pub mod uts;

pub use spawn::{SpawnBag, UnitBag};
pub use sum::Sum;
pub use uts::UtsBag;
