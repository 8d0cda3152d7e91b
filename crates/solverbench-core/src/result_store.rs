//! Durable, idempotent per-seed result persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::domain::{Score, Seed};
use crate::error::{HarnessError, Result};

/// Everything persisted under a results root, keyed solver → seed.
///
/// Ordered maps keep report rebuilds byte-stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultTree {
    /// Judge scores per solver, per seed.
    pub scores: BTreeMap<String, BTreeMap<Seed, Score>>,

    /// Raw solver stdout per solver, per seed.
    pub outputs: BTreeMap<String, BTreeMap<Seed, String>>,
}

/// Filesystem store of per-solver, per-seed results.
///
/// Layout: `<out-dir>/<solver-id>/<seed>.txt` holds the decimal score;
/// the sibling `<seed>.out` and `<seed>.err` artifacts are written by the
/// run executor and belong to the same logical record. The store is the
/// sole source of truth; the overview document is always rederivable.
#[derive(Debug, Clone)]
pub struct ResultStore {
    out_dir: PathBuf,
}

impl ResultStore {
    /// Create a store rooted at `out_dir`.
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Results directory for one solver.
    pub fn solver_dir(&self, solver_id: &str) -> PathBuf {
        self.out_dir.join(solver_id)
    }

    /// Write the score for `(solver_id, seed)` as decimal text.
    ///
    /// Last write wins; rerunning a seed overwrites the prior value.
    pub fn persist(&self, solver_id: &str, seed: Seed, score: Score) -> Result<()> {
        let dir = self.solver_dir(solver_id);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{seed}.txt")), score.to_string())?;
        Ok(())
    }

    /// Scan the results root into a [`ResultTree`].
    ///
    /// Each immediate subdirectory is one solver id; within it, every
    /// `<seed>.txt` paired with its sibling `<seed>.out` forms one entry.
    /// Seeds lacking a `.txt` file are omitted entirely: a run that crashed
    /// before scoring leaves no trace here.
    pub fn load_all(&self) -> Result<ResultTree> {
        let mut tree = ResultTree::default();
        if !self.out_dir.is_dir() {
            return Ok(tree);
        }

        for entry in fs::read_dir(&self.out_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let solver_id = entry.file_name().to_string_lossy().into_owned();

            let mut scores = BTreeMap::new();
            let mut outputs = BTreeMap::new();
            for file in fs::read_dir(entry.path())? {
                let path = file?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                    continue;
                }
                let stem = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem,
                    None => continue,
                };
                let seed = match stem.parse::<Seed>() {
                    Ok(seed) => seed,
                    Err(_) => {
                        warn!(file = %path.display(), "skipping non-seed entry in results tree");
                        continue;
                    }
                };

                let raw = fs::read_to_string(&path)?;
                let score = raw.trim().parse::<Score>().map_err(|_| {
                    HarnessError::Report(format!(
                        "invalid score in {}: {raw:?}",
                        path.display()
                    ))
                })?;
                let output = fs::read_to_string(path.with_extension("out"))?;

                scores.insert(seed, score);
                outputs.insert(seed, output);
            }

            tree.scores.insert(solver_id.clone(), scores);
            tree.outputs.insert(solver_id, outputs);
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("out"));
        (dir, store)
    }

    fn write_artifact(store: &ResultStore, solver: &str, seed: Seed, output: &str) {
        let dir = store.solver_dir(solver);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{seed}.out")), output).unwrap();
    }

    #[test]
    fn test_persist_load_roundtrip() {
        let (_dir, store) = make_store();
        write_artifact(&store, "greedy", 3, "solution text\n");
        store.persist("greedy", 3, 1500).unwrap();

        let tree = store.load_all().unwrap();
        assert_eq!(tree.scores["greedy"][&3], 1500);
        assert_eq!(tree.outputs["greedy"][&3], "solution text\n");
    }

    #[test]
    fn test_persist_overwrites() {
        let (_dir, store) = make_store();
        write_artifact(&store, "greedy", 1, "");
        store.persist("greedy", 1, 10).unwrap();
        store.persist("greedy", 1, 20).unwrap();

        let tree = store.load_all().unwrap();
        assert_eq!(tree.scores["greedy"][&1], 20);
    }

    #[test]
    fn test_scoreless_seed_is_omitted() {
        let (_dir, store) = make_store();
        write_artifact(&store, "greedy", 2, "crashed before scoring\n");
        write_artifact(&store, "greedy", 4, "scored\n");
        store.persist("greedy", 4, 7).unwrap();

        let tree = store.load_all().unwrap();
        assert!(!tree.scores["greedy"].contains_key(&2));
        assert!(!tree.outputs["greedy"].contains_key(&2));
        assert_eq!(tree.scores["greedy"][&4], 7);
    }

    #[test]
    fn test_non_seed_stem_is_skipped() {
        let (_dir, store) = make_store();
        write_artifact(&store, "greedy", 1, "ok\n");
        store.persist("greedy", 1, 5).unwrap();
        fs::write(store.solver_dir("greedy").join("notes.txt"), "stray").unwrap();

        let tree = store.load_all().unwrap();
        assert_eq!(tree.scores["greedy"].len(), 1);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let (_dir, store) = make_store();
        let tree = store.load_all().unwrap();
        assert!(tree.scores.is_empty());
        assert!(tree.outputs.is_empty());
    }

    #[test]
    fn test_solvers_partition_results() {
        let (_dir, store) = make_store();
        write_artifact(&store, "greedy", 1, "a\n");
        write_artifact(&store, "annealing", 1, "b\n");
        store.persist("greedy", 1, 1).unwrap();
        store.persist("annealing", 1, 2).unwrap();

        let tree = store.load_all().unwrap();
        assert_eq!(tree.scores["greedy"][&1], 1);
        assert_eq!(tree.scores["annealing"][&1], 2);
        assert_eq!(tree.outputs["annealing"][&1], "b\n");
    }
}
