//! Solverbench Execution Pipeline
//!
//! Orchestrates one benchmark batch:
//! - Runs the solver under a wall-clock deadline, capturing artifacts
//! - Scores each run through the judge adapter
//! - Fans seeds out across a bounded worker pool, two phases with a barrier

pub mod judge;
pub mod pipeline;
pub mod runner;

// Re-export key types
pub use judge::{parse_score, ExternalJudge, Judge};
pub use pipeline::BatchPipeline;
pub use runner::SolverRunner;
