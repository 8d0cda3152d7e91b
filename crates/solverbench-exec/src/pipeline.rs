//! Batch scheduler: two-phase fan-out of seeds over a bounded pool.

use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use solverbench_core::error::Result;
use solverbench_core::{CaseStore, HarnessConfig, ResultStore, Score, Seed, SeedScore};

use crate::judge::{ExternalJudge, Judge};
use crate::runner::SolverRunner;

/// Orchestrates one benchmark batch for one solver.
///
/// Two sequential phases, each fanned over the configured pool width:
/// generate every case, barrier, then execute every seed. The pool width is
/// fixed for the lifetime of the batch. Each unit of work is an OS process
/// spawn-and-wait, so worker isolation is process-level and no in-process
/// state is shared beyond the read-mostly case directory.
pub struct BatchPipeline {
    cases: CaseStore,
    runner: SolverRunner,
    store: ResultStore,
    pool_size: usize,
}

impl BatchPipeline {
    /// Wire a pipeline from the harness configuration.
    pub fn new(config: &HarnessConfig) -> Self {
        let cases = CaseStore::new(&config.in_dir, &config.generator);
        let judge: Arc<dyn Judge> = Arc::new(ExternalJudge::new(&config.judge));
        let runner = SolverRunner::new(cases.clone(), judge, config.solver_timeout());
        let store = ResultStore::new(&config.out_dir);
        Self {
            cases,
            runner,
            store,
            pool_size: config.pool_size.max(1),
        }
    }

    /// Run `solver` over `seeds`, printing and persisting one score per seed
    /// in input order, followed by the running total.
    ///
    /// The first failure in either phase propagates and abandons the rest of
    /// the batch: unscheduled seeds never start, nothing is persisted for
    /// seeds that had not completed, and in-flight sibling solvers are left
    /// to finish on their own rather than being force-terminated.
    pub async fn run_batch(
        &self,
        solver: &Path,
        seeds: &[Seed],
        solver_id: &str,
    ) -> Result<Vec<SeedScore>> {
        let results_dir = self.store.solver_dir(solver_id);
        std::fs::create_dir_all(&results_dir)?;

        info!(
            solver = solver_id,
            seeds = seeds.len(),
            pool = self.pool_size,
            "generating cases"
        );
        stream::iter(seeds.iter().copied())
            .map(|seed| self.cases.ensure_case(seed))
            .buffer_unordered(self.pool_size)
            .try_collect::<Vec<_>>()
            .await?;

        info!(solver = solver_id, "executing batch");
        let scores: Vec<Score> = stream::iter(seeds.iter().copied())
            .map(|seed| self.runner.execute(solver, seed, &results_dir))
            .buffered(self.pool_size)
            .try_collect()
            .await?;

        let results: Vec<SeedScore> = seeds
            .iter()
            .copied()
            .zip(scores)
            .map(|(seed, score)| SeedScore { seed, score })
            .collect();

        for result in &results {
            println!("{}: {}", result.seed, group_digits(result.score));
            self.store.persist(solver_id, result.seed, result.score)?;
        }

        if !results.is_empty() {
            let total: Score = results.iter().map(|r| r.score).sum();
            println!("Total score: {}", group_digits(total));
        }

        Ok(results)
    }
}

/// Decimal rendering with thousands separators, e.g. `1,234,567`.
fn group_digits(value: Score) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut text = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        text.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            text.push(',');
        }
        text.push(ch);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits_small() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
    }

    #[test]
    fn test_group_digits_grouping() {
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1234567), "1,234,567");
    }

    #[test]
    fn test_group_digits_negative() {
        assert_eq!(group_digits(-42), "-42");
        assert_eq!(group_digits(-1234567), "-1,234,567");
    }
}
