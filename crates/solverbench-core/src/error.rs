//! Harness-level error taxonomy.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Seed;

/// Errors produced by the benchmark harness.
///
/// Every variant is fatal to the enclosing batch: nothing is retried and
/// nothing is downgraded to a per-seed skip.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("generator exited with status {status} for seed {seed}:\n{output}")]
    Generation {
        seed: Seed,
        status: i32,
        output: String,
    },

    #[error("solver exited with status {status} for seed {seed}")]
    Execution { seed: Seed, status: i32 },

    #[error("solver timed out after {limit:?} for seed {seed}")]
    Timeout { seed: Seed, limit: Duration },

    #[error("judge exited with status {status} for seed {seed}:\n{output}")]
    Judge {
        seed: Seed,
        status: i32,
        output: String,
    },

    #[error("judge output for seed {seed} carries no parsable score:\n{output}")]
    ScoreParse { seed: Seed, output: String },

    #[error("solver not found, {0} is not a file")]
    SolverNotFound(PathBuf),

    #[error("report build failed: {0}")]
    Report(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
