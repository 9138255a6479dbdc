//! Staging of a template working copy

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::BootstrapError;
use crate::git;
use crate::utils::fs::{copy_tree, remove_path_any};

/// Version-control metadata entry stripped from every staged copy
const VCS_DIR: &str = ".git";

/// Distinguishes staging roots created by one process in the same nanosecond
static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A template copy being transformed before it is committed
///
/// The tree lives under the system temp directory and is never cleaned up
/// automatically: when the pipeline dies the copy stays on disk for
/// inspection, and every fatal error past this point names its path.
/// Committing consumes the tree.
#[derive(Debug)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// Stage a copy of the template checkout
    ///
    /// Copies the whole tree, strips ignored and untracked files with
    /// `git clean`, then removes the version-control metadata and every
    /// top-level entry named in `exclude`.
    ///
    /// # Errors
    /// Returns a `Filesystem` error when the staging root cannot be created
    /// or the copy fails. A failing `git clean` is downgraded to a warning.
    pub fn stage(template_root: &Path, exclude: &[String]) -> Result<Self> {
        let root = create_staging_root()?;
        info!("Staging template copy at {}", root.display());

        let copied = copy_tree(template_root, &root).map_err(|err| {
            BootstrapError::filesystem(format!(
                "copy into staging tree {} failed: {err:#}",
                root.display()
            ))
        })?;
        debug!("Files staged: {copied}");

        // git clean must run while the copy still carries its .git entry
        if let Err(err) = git::clean_working_copy(&root) {
            warn!("Could not strip ignored files from staging tree: {err:#}");
        }

        let tree = Self { root };
        tree.remove_vcs_metadata()?;
        tree.remove_excluded(exclude)?;
        Ok(tree)
    }

    /// Path of the staged tree
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Consume the tree, handing ownership of its path to the caller
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.root
    }

    fn remove_vcs_metadata(&self) -> Result<()> {
        // .git is a directory in a normal checkout but a file in worktrees
        // and submodules
        let vcs_path = self.root.join(VCS_DIR);
        match remove_path_any(&vcs_path) {
            Ok(true) => debug!("Removed {}", vcs_path.display()),
            Ok(false) => debug!("No {VCS_DIR} entry in template"),
            Err(err) => {
                return Err(BootstrapError::filesystem(format!(
                    "could not remove {VCS_DIR} from staging tree {}: {err:#}",
                    self.root.display()
                ))
                .into());
            }
        }
        Ok(())
    }

    fn remove_excluded(&self, exclude: &[String]) -> Result<()> {
        for name in exclude {
            let path = self.root.join(name);
            match remove_path_any(&path) {
                Ok(true) => debug!("Removed excluded entry: {}", path.display()),
                Ok(false) => {}
                Err(err) => {
                    return Err(BootstrapError::filesystem(format!(
                        "could not remove '{name}' from staging tree {}: {err:#}",
                        self.root.display()
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Create a fresh, uniquely named directory under the system temp dir
fn create_staging_root() -> Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let seq = STAGING_COUNTER.fetch_add(1, Ordering::SeqCst);
    let name = format!("sprig-{}-{nanos:x}-{seq}", std::process::id());
    let root = std::env::temp_dir().join(name);

    fs::create_dir(&root).map_err(|err| {
        BootstrapError::filesystem(format!(
            "could not create staging directory {}: {err}",
            root.display()
        ))
    })?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn init_template_repo(root: &Path) {
        let init = Command::new("git")
            .args(["init"])
            .current_dir(root)
            .output()
            .unwrap();
        assert!(init.status.success());
        fs::write(root.join(".gitignore"), "*.log\n").unwrap();
        fs::write(root.join("app.py"), "print('app')\n").unwrap();
        let add = Command::new("git")
            .args(["add", "."])
            .current_dir(root)
            .output()
            .unwrap();
        assert!(add.status.success());
    }

    #[test]
    fn test_stage_copies_and_strips_metadata() {
        let template = TempDir::new().unwrap();
        init_template_repo(template.path());

        let tree = StagingTree::stage(template.path(), &[]).unwrap();

        assert!(tree.path().join("app.py").is_file());
        assert!(tree.path().join(".gitignore").is_file());
        assert!(!tree.path().join(".git").exists());

        fs::remove_dir_all(tree.into_path()).unwrap();
    }

    #[test]
    fn test_stage_strips_ignored_and_untracked_files() {
        let template = TempDir::new().unwrap();
        init_template_repo(template.path());
        fs::write(template.path().join("debug.log"), "ignored\n").unwrap();
        fs::write(template.path().join("scratch.txt"), "untracked\n").unwrap();

        let tree = StagingTree::stage(template.path(), &[]).unwrap();

        assert!(tree.path().join("app.py").is_file());
        assert!(!tree.path().join("debug.log").exists());
        assert!(!tree.path().join("scratch.txt").exists());
        // the template itself must stay untouched
        assert!(template.path().join("debug.log").is_file());
        assert!(template.path().join("scratch.txt").is_file());

        fs::remove_dir_all(tree.into_path()).unwrap();
    }

    #[test]
    fn test_stage_removes_excluded_entries() {
        let template = TempDir::new().unwrap();
        init_template_repo(template.path());
        fs::write(template.path().join("sprig"), "fake binary\n").unwrap();
        let add = Command::new("git")
            .args(["add", "sprig"])
            .current_dir(template.path())
            .output()
            .unwrap();
        assert!(add.status.success());

        let tree = StagingTree::stage(template.path(), &["sprig".to_owned()]).unwrap();

        assert!(!tree.path().join("sprig").exists());
        assert!(tree.path().join("app.py").is_file());

        fs::remove_dir_all(tree.into_path()).unwrap();
    }

    #[test]
    fn test_stage_tolerates_template_without_git() {
        let template = TempDir::new().unwrap();
        fs::write(template.path().join("app.py"), "print('app')\n").unwrap();

        let tree = StagingTree::stage(template.path(), &[]).unwrap();

        assert!(tree.path().join("app.py").is_file());
        assert!(!tree.path().join(".git").exists());

        fs::remove_dir_all(tree.into_path()).unwrap();
    }

    #[test]
    fn test_staging_roots_are_unique() {
        let template = TempDir::new().unwrap();
        fs::write(template.path().join("f.txt"), "x\n").unwrap();

        let first = StagingTree::stage(template.path(), &[]).unwrap();
        let second = StagingTree::stage(template.path(), &[]).unwrap();

        assert_ne!(first.path(), second.path());

        fs::remove_dir_all(first.into_path()).unwrap();
        fs::remove_dir_all(second.into_path()).unwrap();
    }
}
