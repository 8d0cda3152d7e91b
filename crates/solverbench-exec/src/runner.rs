//! Run executor: one solver invocation against one cached case.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use solverbench_core::error::{HarnessError, Result};
use solverbench_core::{CaseStore, Score, Seed};

use crate::judge::Judge;

/// Executes the solver on cached cases and hands the artifacts to the judge.
///
/// The case must already exist; the executor never triggers generation.
/// Artifacts (`<seed>.out`, `<seed>.err`) are owned by this executor while
/// the solver runs and land in the solver's results directory with
/// truncating writes, so a rerun overwrites prior artifacts.
#[derive(Clone)]
pub struct SolverRunner {
    cases: CaseStore,
    judge: Arc<dyn Judge>,
    deadline: Duration,
}

impl SolverRunner {
    /// Create an executor over `cases`, scoring with `judge` and bounding
    /// each solver run by `deadline`.
    pub fn new(cases: CaseStore, judge: Arc<dyn Judge>, deadline: Duration) -> Self {
        Self {
            cases,
            judge,
            deadline,
        }
    }

    /// Run `solver` on the case for `seed` and return the judge's score.
    ///
    /// The case text is piped to the solver's stdin; stdout and stderr are
    /// captured to sibling artifact files. Exceeding the deadline kills the
    /// solver and fails the seed without retry; a nonzero exit fails it
    /// likewise. Failures propagate to the batch scheduler, which decides
    /// the batch-wide policy.
    pub async fn execute(&self, solver: &Path, seed: Seed, results_dir: &Path) -> Result<Score> {
        let case_file = self.cases.case_path(seed);
        let input = tokio::fs::read(&case_file).await?;

        let out_path = results_dir.join(format!("{seed}.out"));
        let err_path = results_dir.join(format!("{seed}.err"));
        let out_file = std::fs::File::create(&out_path)?;
        let err_file = std::fs::File::create(&err_path)?;

        debug!(seed, solver = %solver.display(), "running solver");
        let mut child = Command::new(solver)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(out_file))
            .stderr(Stdio::from(err_file))
            .spawn()?;

        let wait = async {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(err) = stdin.write_all(&input).await {
                    // A solver may exit without draining its stdin.
                    if err.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(HarnessError::Io(err));
                    }
                }
            }
            Ok(child.wait().await?)
        };

        let waited = tokio::time::timeout(self.deadline, wait).await;
        let status = match waited {
            Ok(status) => status?,
            Err(_) => {
                child.kill().await.ok();
                return Err(HarnessError::Timeout {
                    seed,
                    limit: self.deadline,
                });
            }
        };

        if !status.success() {
            return Err(HarnessError::Execution {
                seed,
                status: status.code().unwrap_or(-1),
            });
        }

        self.judge.score(seed, &case_file, &out_path).await
    }
}
