//! Harness configuration and directory layout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Default wall-clock deadline for one solver run, in milliseconds.
pub const DEFAULT_SOLVER_TIMEOUT_MS: u64 = 2_000;

/// Configuration for one harness root.
///
/// The root directory is expected to carry the generator (`gen`) and judge
/// (`vis`) executables, the case cache (`in/`), the results tree (`out/`),
/// and the overview template. Solver binaries are resolved against
/// `solver_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Harness root directory.
    pub root: PathBuf,

    /// Directory solver names are resolved against.
    pub solver_dir: PathBuf,

    /// Path to the case generator executable.
    pub generator: PathBuf,

    /// Path to the judge executable.
    pub judge: PathBuf,

    /// Case cache directory (`<seed>.txt` files).
    pub in_dir: PathBuf,

    /// Results root (one subdirectory per solver).
    pub out_dir: PathBuf,

    /// Overview template document.
    pub template: PathBuf,

    /// Rendered overview document.
    pub overview: PathBuf,

    /// Wall-clock deadline for one solver run, in milliseconds.
    pub solver_timeout_ms: u64,

    /// Worker-pool width for batch phases.
    pub pool_size: usize,
}

impl HarnessConfig {
    /// Build the conventional layout under `root`.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            solver_dir: root.join("solvers"),
            generator: root.join("gen"),
            judge: root.join("vis"),
            in_dir: root.join("in"),
            out_dir: root.join("out"),
            template: root.join("overview.tmpl.html"),
            overview: root.join("overview.html"),
            solver_timeout_ms: DEFAULT_SOLVER_TIMEOUT_MS,
            pool_size: default_pool_size(),
            root,
        }
    }

    /// The solver deadline as a [`Duration`].
    pub fn solver_timeout(&self) -> Duration {
        Duration::from_millis(self.solver_timeout_ms)
    }

    /// Resolve a solver name against the solver directory.
    ///
    /// A missing binary is a configuration error and fatal to the run.
    pub fn resolve_solver(&self, name: &str) -> Result<PathBuf> {
        let path = self.solver_dir.join(name);
        if !path.is_file() {
            return Err(HarnessError::SolverNotFound(path));
        }
        Ok(path)
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}

/// Pool width: available parallelism minus two, floor 1.
///
/// The two reserved slots keep the scheduler and the host responsive while
/// worker subprocesses saturate the remaining cores.
fn default_pool_size() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cores.saturating_sub(2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_root() {
        let config = HarnessConfig::for_root("/bench");
        assert_eq!(config.generator, PathBuf::from("/bench/gen"));
        assert_eq!(config.judge, PathBuf::from("/bench/vis"));
        assert_eq!(config.in_dir, PathBuf::from("/bench/in"));
        assert_eq!(config.out_dir, PathBuf::from("/bench/out"));
        assert_eq!(config.template, PathBuf::from("/bench/overview.tmpl.html"));
        assert_eq!(config.overview, PathBuf::from("/bench/overview.html"));
    }

    #[test]
    fn test_default_deadline_is_two_seconds() {
        let config = HarnessConfig::default();
        assert_eq!(config.solver_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_pool_size_has_floor() {
        assert!(default_pool_size() >= 1);
    }

    #[test]
    fn test_resolve_solver_missing_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::for_root(dir.path());
        match config.resolve_solver("nope") {
            Err(HarnessError::SolverNotFound(path)) => {
                assert!(path.ends_with("solvers/nope"));
            }
            other => panic!("expected SolverNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_solver_finds_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::for_root(dir.path());
        std::fs::create_dir_all(&config.solver_dir).unwrap();
        let solver = config.solver_dir.join("greedy");
        std::fs::write(&solver, "").unwrap();

        let resolved = config.resolve_solver("greedy").expect("resolve failed");
        assert_eq!(resolved, solver);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = HarnessConfig::for_root("/bench");
        let json = serde_json::to_string(&config).expect("serialize");
        let back: HarnessConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.solver_timeout_ms, config.solver_timeout_ms);
        assert_eq!(back.out_dir, config.out_dir);
    }
}
