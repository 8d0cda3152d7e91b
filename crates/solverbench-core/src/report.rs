//! Aggregate overview rendering.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::result_store::ResultStore;

/// Placeholder token replaced with the scores-by-solver JSON object.
const SCORES_TOKEN: &str = "/* scores_by_solver */{}";

/// Placeholder token replaced with the outputs-by-solver JSON object.
const OUTPUTS_TOKEN: &str = "/* outputs_by_solver */{}";

/// Renders the static overview document from the persisted result tree.
///
/// The overview is a derived view: it is fully rebuilt on every call and
/// never consulted as a source of truth. Rebuilding against an unchanged
/// result store yields a byte-identical document.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    store: ResultStore,
    template: PathBuf,
    overview: PathBuf,
}

impl ReportBuilder {
    /// Build a report builder over the configured results root and
    /// template/overview paths.
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            store: ResultStore::new(&config.out_dir),
            template: config.template.clone(),
            overview: config.overview.clone(),
        }
    }

    /// Render the overview document and return its path.
    ///
    /// A malformed template or an unreadable result tree fails the whole
    /// build; there is no per-solver isolation here.
    pub fn build(&self) -> Result<PathBuf> {
        let tree = self
            .store
            .load_all()
            .map_err(|e| HarnessError::Report(format!("failed to scan results: {e}")))?;

        let template = fs::read_to_string(&self.template).map_err(|e| {
            HarnessError::Report(format!(
                "failed to read template {}: {e}",
                self.template.display()
            ))
        })?;

        let scores = serde_json::to_string(&tree.scores)
            .map_err(|e| HarnessError::Report(format!("failed to encode scores: {e}")))?;
        let outputs = serde_json::to_string(&tree.outputs)
            .map_err(|e| HarnessError::Report(format!("failed to encode outputs: {e}")))?;

        let document = template
            .replace(SCORES_TOKEN, &scores)
            .replace(OUTPUTS_TOKEN, &outputs);

        fs::write(&self.overview, document).map_err(|e| {
            HarnessError::Report(format!(
                "failed to write overview {}: {e}",
                self.overview.display()
            ))
        })?;

        info!(overview = %self.overview.display(), "overview rebuilt");
        println!("Overview: file://{}", self.overview.display());

        Ok(self.overview.clone())
    }
}
