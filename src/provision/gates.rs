//! Quality gates run through the project's fresh environment

use std::path::Path;

use tracing::{info, warn};

use crate::provision::environment::{StepOutcome, run_pipenv};

/// Tooling invoked against the new project, in run order
const GATES: [&[&str]; 3] = [
    &["run", "mypy", "."],
    &["run", "flake8"],
    &["run", "pytest"],
];

/// Run the type-check, lint, and test gates inside the project root
///
/// A red gate never aborts the pipeline; each outcome is reported and the
/// full set returned for the summary.
pub fn run_quality_gates(project_root: &Path) -> Vec<StepOutcome> {
    info!("Running quality gates in {}", project_root.display());

    let outcomes: Vec<StepOutcome> = GATES
        .iter()
        .map(|args| run_pipenv(project_root, args))
        .collect();

    summarize(&outcomes);
    outcomes
}

/// Log one line per gate plus a pass tally
fn summarize(outcomes: &[StepOutcome]) {
    for outcome in outcomes {
        if outcome.success {
            info!("Gate passed: {}", outcome.label);
        } else {
            warn!("Gate failed: {}", outcome.label);
        }
    }
    let passed = outcomes.iter().filter(|outcome| outcome.success).count();
    info!("Gates passed: {passed}/{}", outcomes.len());
}
