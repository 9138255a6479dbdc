//! Pipenv environment provisioning

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::template::PLACEHOLDER_NAME;

/// Outcome of one best-effort external invocation
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Human-readable invocation, e.g. `pipenv run mypy .`
    pub label: String,
    /// Whether the process ran and exited zero
    pub success: bool,
    /// Trimmed stderr of a failed run, when any was captured
    pub error: Option<String>,
}

/// Run one pipenv invocation inside the given root
///
/// Spawn failures and non-zero exits are folded into the outcome instead of
/// becoming errors. Every invocation carries `PIPENV_VENV_IN_PROJECT=1` so
/// the virtualenv lands in `.venv/` under the project.
pub fn run_pipenv(project_root: &Path, args: &[&str]) -> StepOutcome {
    let label = format!("pipenv {}", args.join(" "));
    debug!("Running {label} in {}", project_root.display());

    let output = Command::new("pipenv")
        .args(args)
        .env("PIPENV_VENV_IN_PROJECT", "1")
        .current_dir(project_root)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Ok(output) => {
            if output.status.success() {
                StepOutcome {
                    label,
                    success: true,
                    error: None,
                }
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                StepOutcome {
                    label,
                    success: false,
                    error: if stderr.trim().is_empty() {
                        None
                    } else {
                        Some(stderr.trim().to_owned())
                    },
                }
            }
        }
        Err(err) => StepOutcome {
            label,
            success: false,
            error: Some(format!("failed to spawn: {err}")),
        },
    }
}

/// Provision the pipenv environment of a project
///
/// Steps, in order: create the in-project virtualenv, drop the stale
/// placeholder entry the template Pipfile may still carry, install the
/// project editable with dev dependencies (plus the pretty extras group when
/// color is requested). Every step is best-effort: failures become warnings
/// and the project stands regardless.
pub fn provision_environment(project_root: &Path, color: bool) -> Vec<StepOutcome> {
    info!("Provisioning environment in {}", project_root.display());

    let steps: [&[&str]; 3] = [
        &["--python", "3"],
        &["uninstall", PLACEHOLDER_NAME],
        &["install", "--editable", editable_spec(color), "--dev"],
    ];

    let mut outcomes = Vec::with_capacity(steps.len());
    for args in steps {
        let outcome = run_pipenv(project_root, args);
        report(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

/// Editable install target, with the pretty extras group when color is on
#[must_use]
pub const fn editable_spec(color: bool) -> &'static str {
    if color { ".[pretty]" } else { "." }
}

/// Log an outcome at the appropriate level
pub(crate) fn report(outcome: &StepOutcome) {
    if outcome.success {
        debug!("{} succeeded", outcome.label);
    } else if let Some(error) = &outcome.error {
        warn!("{} failed: {error}", outcome.label);
    } else {
        warn!("{} failed", outcome.label);
    }
}
