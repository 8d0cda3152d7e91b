//! solverbench - seeded benchmark harness CLI
//!
//! Runs one solver across a list of seeds: cases are generated (and cached)
//! per seed, the solver runs under a wall-clock deadline with its artifacts
//! captured, the judge scores every run, and the aggregate overview is
//! rebuilt from everything persisted so far.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use solverbench_core::{default_seeds, init_tracing, HarnessConfig, ReportBuilder, Seed};
use solverbench_exec::BatchPipeline;

#[derive(Parser)]
#[command(name = "solverbench")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a solver across seeded benchmark cases", long_about = None)]
struct Cli {
    /// Solver to run, resolved against the solver directory
    solver: String,

    /// Single seed to run (defaults to the full range 1-100)
    #[arg(long)]
    seed: Option<Seed>,

    /// Harness root holding gen, vis, in/, out/ and the overview template
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let config = HarnessConfig::for_root(&cli.root);
    let solver = config
        .resolve_solver(&cli.solver)
        .context("failed to resolve solver binary")?;

    let seeds = match cli.seed {
        Some(seed) => vec![seed],
        None => default_seeds(),
    };

    let pipeline = BatchPipeline::new(&config);
    pipeline
        .run_batch(&solver, &seeds, &cli.solver)
        .await
        .with_context(|| format!("batch run failed for solver {}", cli.solver))?;

    ReportBuilder::new(&config)
        .build()
        .context("failed to rebuild overview")?;

    Ok(())
}
