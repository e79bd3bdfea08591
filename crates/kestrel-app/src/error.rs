//! Errors surfaced by the application layer.

use thiserror::Error;

use kestrel_core::error::ConfigError;
use kestrel_sim::error::{MapError, SimError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("map error: {0}")]
    Map(#[from] MapError),
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
}
