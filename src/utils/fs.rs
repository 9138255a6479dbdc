//! File system utilities

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

/// Copy a directory tree recursively, returning the number of files copied
///
/// Directories are recreated and regular files copied. Symlinks and other
/// special entries are skipped with a debug log: project templates carry
/// plain files only.
pub fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    if !target.exists() {
        fs::create_dir_all(target)
            .with_context(|| format!("Failed to create target directory: {}", target.display()))?;
    }

    let mut files_copied = 0;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.context("Failed to read directory entry")?;
        let source_path = entry.path();

        let relative_path = source_path
            .strip_prefix(source)
            .context("Failed to calculate relative path")?;
        let target_path = target.join(relative_path);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            if !target_path.exists() {
                fs::create_dir_all(&target_path).with_context(|| {
                    format!("Failed to create directory: {}", target_path.display())
                })?;
            }
        } else if file_type.is_file() {
            if let Some(parent) = target_path.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create parent directory: {}", parent.display())
                })?;
            }

            fs::copy(source_path, &target_path).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    source_path.display(),
                    target_path.display()
                )
            })?;

            files_copied += 1;
        } else {
            debug!("Skipping special entry: {}", source_path.display());
        }
    }

    Ok(files_copied)
}

/// Remove a path whether it is a file or a directory
///
/// Returns `true` when something was removed, `false` when the path was
/// already absent. Symlinks are removed without being followed.
pub fn remove_path_any(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to inspect {}", path.display()));
        }
    };

    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    } else {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove file: {}", path.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_tree_recreates_structure() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let target = temp.path().join("target");

        fs::create_dir_all(source.join("nested/deep")).unwrap();
        fs::write(source.join("top.txt"), "top\n").unwrap();
        fs::write(source.join("nested/mid.txt"), "mid\n").unwrap();
        fs::write(source.join("nested/deep/leaf.txt"), "leaf\n").unwrap();
        fs::write(source.join(".hidden"), "hidden\n").unwrap();

        let copied = copy_tree(&source, &target).unwrap();

        assert_eq!(copied, 4);
        assert!(target.join("top.txt").is_file());
        assert!(target.join("nested/mid.txt").is_file());
        assert!(target.join("nested/deep/leaf.txt").is_file());
        assert!(target.join(".hidden").is_file());
        assert_eq!(
            fs::read_to_string(target.join("nested/deep/leaf.txt")).unwrap(),
            "leaf\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_skips_symlinks() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        let target = temp.path().join("target");

        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("real.txt"), "real\n").unwrap();
        std::os::unix::fs::symlink(source.join("real.txt"), source.join("link.txt")).unwrap();

        let copied = copy_tree(&source, &target).unwrap();

        assert_eq!(copied, 1);
        assert!(target.join("real.txt").is_file());
        assert!(!target.join("link.txt").exists());
    }

    #[test]
    fn test_remove_path_any_handles_files_and_dirs() {
        let temp = TempDir::new().unwrap();

        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(remove_path_any(&file).unwrap());
        assert!(!file.exists());

        let dir = temp.path().join("dir");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner/file.txt"), "x").unwrap();
        assert!(remove_path_any(&dir).unwrap());
        assert!(!dir.exists());

        assert!(!remove_path_any(&temp.path().join("missing")).unwrap());
    }
}
