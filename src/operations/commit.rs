//! Committing a staged tree to its destination

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::error::BootstrapError;
use crate::operations::StagingTree;
use crate::utils::fs::copy_tree;

/// Move a staged tree to the destination project root
///
/// The destination is re-checked immediately before the move; the early
/// check in the pipeline may have been raced by another process. A rename
/// crossing filesystems falls back to copy-and-remove, since the staging
/// tree lives under the system temp dir.
///
/// # Errors
/// Returns a `Destination` error when the project root already exists, or a
/// `Filesystem` error when the move fails. Either way the staging tree stays
/// on disk and the message names its path.
pub fn commit(tree: StagingTree, destination_root: &Path) -> Result<()> {
    let staged = tree.into_path();

    if destination_root.exists() {
        return Err(BootstrapError::destination(format!(
            "{} appeared before commit; staging tree left at {}",
            destination_root.display(),
            staged.display()
        ))
        .into());
    }

    if let Some(parent) = destination_root.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|err| {
            BootstrapError::filesystem(format!(
                "could not create {}: {err}; staging tree left at {}",
                parent.display(),
                staged.display()
            ))
        })?;
    }

    match fs::rename(&staged, destination_root) {
        Ok(()) => {
            info!("Project committed to {}", destination_root.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Rename crossed filesystems, copying instead");
            copy_and_remove(&staged, destination_root)
        }
        Err(err) => Err(BootstrapError::filesystem(format!(
            "could not move staging tree {} to {}: {err}",
            staged.display(),
            destination_root.display()
        ))
        .into()),
    }
}

fn copy_and_remove(staged: &Path, destination_root: &Path) -> Result<()> {
    copy_tree(staged, destination_root).map_err(|err| {
        BootstrapError::filesystem(format!(
            "could not copy staging tree {} to {}: {err:#}",
            staged.display(),
            destination_root.display()
        ))
    })?;
    fs::remove_dir_all(staged).map_err(|err| {
        BootstrapError::filesystem(format!(
            "copied to {} but could not remove staging tree {}: {err}",
            destination_root.display(),
            staged.display()
        ))
    })?;
    info!("Project committed to {}", destination_root.display());
    Ok(())
}
