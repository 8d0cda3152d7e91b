//! Deterministic, cached materialization of generator output per seed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::domain::Seed;
use crate::error::{HarnessError, Result};

/// Relative path the generator writes its case to, inside its working
/// directory.
const GENERATOR_OUTPUT: &str = "in/0000.txt";

/// Seed-keyed store of generated case files.
///
/// Case content is a pure function of the seed, so the store treats the case
/// directory as a cache with no invalidation: a case is generated only when
/// its file is absent. Two workers racing on the same absent seed may both
/// invoke the generator; determinism makes the duplicate write harmless, and
/// callers must not rely on the generator running exactly once per seed.
#[derive(Debug, Clone)]
pub struct CaseStore {
    in_dir: PathBuf,
    generator: PathBuf,
}

impl CaseStore {
    /// Create a store over `in_dir`, generating missing cases with the
    /// executable at `generator`.
    pub fn new(in_dir: impl AsRef<Path>, generator: impl AsRef<Path>) -> Self {
        Self {
            in_dir: in_dir.as_ref().to_path_buf(),
            generator: generator.as_ref().to_path_buf(),
        }
    }

    /// Path of the case file for `seed`, whether or not it exists yet.
    pub fn case_path(&self, seed: Seed) -> PathBuf {
        self.in_dir.join(format!("{seed}.txt"))
    }

    /// Ensure the case file for `seed` exists and return its path.
    ///
    /// The generator runs with a scoped temporary directory as its working
    /// directory and a scoped temporary file carrying the seed as its sole
    /// input line; both are removed on every exit path. On nonzero exit the
    /// combined captured output is attached to the error.
    pub async fn ensure_case(&self, seed: Seed) -> Result<PathBuf> {
        let case_file = self.case_path(seed);
        if case_file.is_file() {
            debug!(seed, "case cache hit");
            return Ok(case_file);
        }

        fs::create_dir_all(&self.in_dir)?;

        let mut seed_file = NamedTempFile::new()?;
        writeln!(seed_file, "{seed}")?;
        seed_file.flush()?;

        let work_dir = tempfile::tempdir()?;

        debug!(seed, generator = %self.generator.display(), "generating case");
        let output = Command::new(&self.generator)
            .arg(seed_file.path())
            .current_dir(work_dir.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(HarnessError::Generation {
                seed,
                status: output.status.code().unwrap_or(-1),
                output: combined_output(&output),
            });
        }

        let produced = fs::read(work_dir.path().join(GENERATOR_OUTPUT))?;
        fs::write(&case_file, produced)?;

        Ok(case_file)
    }
}

/// Stdout and stderr of a finished process as one trimmed string.
fn combined_output(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim_end().to_string()
}
