//! Git command invocations
//!
//! All version-control effects go through the git binary. Failures are
//! returned to callers, which downgrade them to warnings: a project without
//! a repository still beats no project.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Check that the git binary can be invoked
///
/// # Errors
///
/// Returns an error if:
/// - The Git command is not found
/// - The Git command failed to execute properly
#[inline]
pub fn check_git_availability() -> Result<()> {
    let output = Command::new("git")
        .args(["--version"])
        .output()
        .context("Git command not found. Please ensure Git is installed and available in PATH")?;

    if !output.status.success() {
        return Err(anyhow!("Git command failed to execute properly"));
    }

    debug!(
        "Git available: {}",
        String::from_utf8_lossy(&output.stdout).trim()
    );
    Ok(())
}

/// Strip ignored and untracked files from a working copy with `git clean`
///
/// The copy must still contain its `.git` directory when this runs.
pub fn clean_working_copy(path: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["clean", "-fdx"])
        .current_dir(path)
        .output()
        .context("Failed to execute git clean")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "git clean failed in {}: {}",
            path.display(),
            stderr.trim()
        ));
    }

    debug!("Working copy cleaned: {}", path.display());
    Ok(())
}

/// Initialize a fresh repository at the given root
pub fn init_repository(path: &Path) -> Result<()> {
    let output = Command::new("git")
        .args(["init"])
        .current_dir(path)
        .output()
        .context("Failed to execute git init")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "git init failed in {}: {}",
            path.display(),
            stderr.trim()
        ));
    }

    debug!("Repository initialized: {}", path.display());
    Ok(())
}
