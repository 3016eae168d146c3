//! Error types for glb-rs.
//!
//! The bag queue itself never fails; errors only come from the edges
//! (configuration, telemetry setup, the CLI).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
