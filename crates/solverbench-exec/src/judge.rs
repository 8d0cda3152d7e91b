//! Judge adapter: numeric scoring of a solver run via an external binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use solverbench_core::error::{HarnessError, Result};
use solverbench_core::{Score, Seed};

/// Literal marker preceding the score in the judge's combined output.
///
/// The substring match is deliberately loose for compatibility with
/// existing judges; a stricter contract can be substituted behind
/// [`Judge`] without touching callers.
const SCORE_MARKER: &str = "Score = ";

/// Scoring seam between the run executor and whatever computes scores.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Score the solver output at `output` against the case at `case`.
    async fn score(&self, seed: Seed, case: &Path, output: &Path) -> Result<Score>;
}

/// Judge backed by an external executable.
///
/// Invoked as `judge <case-file> <solver-output-file>` with a scoped
/// temporary working directory, so judges that drop scratch files never
/// pollute the harness tree.
#[derive(Debug, Clone)]
pub struct ExternalJudge {
    binary: PathBuf,
}

impl ExternalJudge {
    /// Create an adapter around the judge executable at `binary`.
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Judge for ExternalJudge {
    async fn score(&self, seed: Seed, case: &Path, output: &Path) -> Result<Score> {
        let work_dir = tempfile::tempdir()?;

        debug!(seed, judge = %self.binary.display(), "judging output");
        let out = Command::new(&self.binary)
            .arg(case)
            .arg(output)
            .current_dir(work_dir.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let combined = combined_output(&out);
        if !out.status.success() {
            return Err(HarnessError::Judge {
                seed,
                status: out.status.code().unwrap_or(-1),
                output: combined,
            });
        }

        parse_score(seed, &combined)
    }
}

/// Extract the integer following the `Score = ` marker.
///
/// Takes the remainder of the marker's line; a missing marker or a
/// non-integer remainder is fatal to the batch like any other failure.
pub fn parse_score(seed: Seed, output: &str) -> Result<Score> {
    let rest = match output.split_once(SCORE_MARKER) {
        Some((_, rest)) => rest,
        None => {
            return Err(HarnessError::ScoreParse {
                seed,
                output: output.to_string(),
            })
        }
    };

    let line = rest.lines().next().unwrap_or_default();
    line.trim()
        .parse::<Score>()
        .map_err(|_| HarnessError::ScoreParse {
            seed,
            output: output.to_string(),
        })
}

/// Stdout and stderr of a finished process as one trimmed string.
fn combined_output(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim_end().to_string()
}
