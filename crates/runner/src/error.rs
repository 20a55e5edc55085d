//! Runner errors

use thiserror::Error;
use vault_core::Bps;
use vault_ports::ValidationError;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pool {id} has c_score {c_score} outside [0, 10000]")]
    InvalidPoolScore { id: String, c_score: Bps },

    #[error("No pool at index {index} (vault has {len})")]
    PoolIndex { index: usize, len: usize },

    #[error("Failed to serialize report: {0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
