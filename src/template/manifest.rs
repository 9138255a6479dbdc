//! Manifest rendering and finalization

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::BootstrapError;
use crate::template::{IGNORE_FILE, MANIFEST_FILE, MANIFEST_TEMPLATE, PLACEHOLDER_TOKEN};

/// Substitute the project name into manifest template content
///
/// Replacement is literal: every occurrence of the recognized token is
/// rewritten, everything else passes through untouched. Once the token is
/// gone, rendering again changes nothing.
#[must_use]
pub fn render(content: &str, name: &str) -> String {
    content.replace(PLACEHOLDER_TOKEN, name)
}

/// Render the manifest template and write the final manifest beside it
///
/// # Errors
/// Returns a `Template` error when the manifest template cannot be read.
pub fn write_manifest(root: &Path, name: &str) -> Result<()> {
    let template_path = root.join(MANIFEST_TEMPLATE);
    let content = fs::read_to_string(&template_path).map_err(|err| {
        BootstrapError::template(format!(
            "manifest template '{MANIFEST_TEMPLATE}' is unreadable at {}: {err}",
            template_path.display()
        ))
    })?;

    let manifest_path = root.join(MANIFEST_FILE);
    fs::write(&manifest_path, render(&content, name))
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
    debug!("Manifest written: {}", manifest_path.display());
    Ok(())
}

/// Write the manifest, drop the template file, and scrub the ignore list
///
/// The generated project must not ship the template file, and its ignore
/// list must stop hiding the now-real manifest. Used by the fresh-project
/// pipeline; self-bootstrap keeps the template file in place.
///
/// # Errors
/// Returns a `Template` error when the manifest template cannot be read.
pub fn finalize(root: &Path, name: &str) -> Result<()> {
    write_manifest(root, name)?;

    let template_path = root.join(MANIFEST_TEMPLATE);
    fs::remove_file(&template_path)
        .with_context(|| format!("Failed to remove {}", template_path.display()))?;
    debug!("Manifest template removed: {}", template_path.display());

    scrub_ignore_file(root)
}

/// Drop every ignore-list line that references the manifest file
fn scrub_ignore_file(root: &Path) -> Result<()> {
    let ignore_path = root.join(IGNORE_FILE);
    if !ignore_path.is_file() {
        debug!("No {IGNORE_FILE} to scrub");
        return Ok(());
    }

    let content = fs::read_to_string(&ignore_path)
        .with_context(|| format!("Failed to read {}", ignore_path.display()))?;
    let kept: Vec<&str> = content
        .lines()
        .filter(|line| !line.contains(MANIFEST_FILE))
        .collect();

    let mut scrubbed = kept.join("\n");
    if content.ends_with('\n') && !scrubbed.is_empty() {
        scrubbed.push('\n');
    }
    fs::write(&ignore_path, scrubbed)
        .with_context(|| format!("Failed to write {}", ignore_path.display()))?;
    debug!("Ignore list scrubbed: {}", ignore_path.display());
    Ok(())
}
