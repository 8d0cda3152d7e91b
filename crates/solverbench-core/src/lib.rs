//! Solverbench Core Library
//!
//! Domain types and storage for the seeded benchmark harness:
//! - Case store: deterministic, cached generator output per seed
//! - Result store: per-solver, per-seed score and output persistence
//! - Report builder: aggregate HTML overview rendered from the result tree

pub mod case_store;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod result_store;
pub mod telemetry;

pub use case_store::CaseStore;
pub use config::HarnessConfig;
pub use domain::{default_seeds, Seed, SeedScore, Score};
pub use error::{HarnessError, Result};
pub use report::ReportBuilder;
pub use result_store::{ResultStore, ResultTree};
pub use telemetry::init_tracing;

/// Solverbench version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
