//! Layout transformation of a staged template tree

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::Layout;
use crate::error::BootstrapError;
use crate::template::{MODULE_EXTENSION, MODULE_FILE, PACKAGE_DIR};

/// Shape a staged tree for the chosen layout
///
/// Module layout keeps the single-file module and drops the package
/// directory; package layout does the reverse. The surviving placeholder is
/// renamed after the project, so exactly one of the two shapes leaves the
/// transformation.
///
/// # Errors
/// Returns a `Template` error when an expected placeholder path is absent
/// (the checkout is damaged), or a `Filesystem`-level error when a remove or
/// rename fails.
pub fn apply_layout(root: &Path, layout: Layout, name: &str) -> Result<()> {
    match layout {
        Layout::Module => {
            remove_package_placeholder(root)?;
            rename_module_file(root, name)?;
        }
        Layout::Package => {
            remove_module_placeholder(root)?;
            rename_package_dir(root, name)?;
        }
    }
    Ok(())
}

fn remove_package_placeholder(root: &Path) -> Result<()> {
    let dir = root.join(PACKAGE_DIR);
    if !dir.is_dir() {
        return Err(BootstrapError::template(format!(
            "expected package directory '{PACKAGE_DIR}' is missing"
        ))
        .into());
    }
    fs::remove_dir_all(&dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
    debug!("Removed package placeholder: {}", dir.display());
    Ok(())
}

fn remove_module_placeholder(root: &Path) -> Result<()> {
    let file = root.join(MODULE_FILE);
    if !file.is_file() {
        return Err(BootstrapError::template(format!(
            "expected module file '{MODULE_FILE}' is missing"
        ))
        .into());
    }
    fs::remove_file(&file).with_context(|| format!("Failed to remove {}", file.display()))?;
    debug!("Removed module placeholder: {}", file.display());
    Ok(())
}

fn rename_module_file(root: &Path, name: &str) -> Result<()> {
    let source = root.join(MODULE_FILE);
    if !source.is_file() {
        return Err(BootstrapError::template(format!(
            "expected module file '{MODULE_FILE}' is missing"
        ))
        .into());
    }
    let target = root.join(format!("{name}.{MODULE_EXTENSION}"));
    fs::rename(&source, &target).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            source.display(),
            target.display()
        )
    })?;
    debug!("Module file renamed to {name}.{MODULE_EXTENSION}");
    Ok(())
}

fn rename_package_dir(root: &Path, name: &str) -> Result<()> {
    let source = root.join(PACKAGE_DIR);
    if !source.is_dir() {
        return Err(BootstrapError::template(format!(
            "expected package directory '{PACKAGE_DIR}' is missing"
        ))
        .into());
    }
    let target = root.join(name);
    fs::rename(&source, &target).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            source.display(),
            target.display()
        )
    })?;
    debug!("Package directory renamed to {name}");
    Ok(())
}
