//! Bootstrap pipeline coordination

use std::env;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::{debug, info, warn};

use crate::cli::{Args, Layout, validate_project_name};
use crate::error::BootstrapError;
use crate::git;
use crate::operations::{StagingTree, commit};
use crate::provision::{provision_environment, run_quality_gates};
use crate::template::{self, PLACEHOLDER_NAME};

/// Coordinates creation of a fresh project from the template checkout
#[non_exhaustive]
pub struct FreshProject {
    name: String,
    destination_root: PathBuf,
    layout: Layout,
    color: bool,
    template_root: PathBuf,
}

impl FreshProject {
    /// Create a fresh-project operation from CLI arguments
    ///
    /// All user-input validation happens here, before any filesystem
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A virtual environment is active in the calling shell
    /// - The project name is not a valid identifier
    /// - The destination project root already exists
    #[inline]
    pub fn new(args: &Args) -> Result<Self> {
        ensure_no_active_virtualenv()?;

        let name = args
            .project
            .as_deref()
            .ok_or_else(|| BootstrapError::project_name("no project name given"))?;
        validate_project_name(name)?;

        let destination_root = args.destination.join(name);
        if destination_root.exists() {
            return Err(BootstrapError::destination(format!(
                "{} already exists; choose another name or destination",
                destination_root.display()
            ))
            .into());
        }

        let template_root = env::current_dir().context("Failed to resolve the template root")?;

        // Without git the run degrades: staging keeps ignored files and the
        // project starts without a repository
        if let Err(err) = git::check_git_availability() {
            warn!("{err:#}");
        }

        Ok(Self {
            name: name.to_owned(),
            destination_root,
            layout: args.layout,
            color: args.color,
            template_root,
        })
    }

    /// Execute the full pipeline: stage, transform, commit, provision
    ///
    /// # Errors
    ///
    /// Returns the typed errors described in `error::types`. Any failure
    /// after staging leaves the staging tree on disk, named in the message.
    #[inline]
    pub fn execute(&self) -> Result<()> {
        info!(
            "Creating project '{}' at {}",
            self.name,
            self.destination_root.display()
        );

        let tree = StagingTree::stage(&self.template_root, &bootstrapper_artifacts())?;
        template::apply_layout(tree.path(), self.layout, &self.name)
            .with_context(|| format!("staging tree left at {}", tree.path().display()))?;
        template::finalize(tree.path(), &self.name)
            .with_context(|| format!("staging tree left at {}", tree.path().display()))?;
        commit(tree, &self.destination_root)?;

        provision_environment(&self.destination_root, self.color);
        run_quality_gates(&self.destination_root);

        // Repository init runs last, once the tree is final
        if let Err(err) = git::init_repository(&self.destination_root) {
            warn!("Could not initialize repository: {err:#}");
        }

        info!("Project '{}' is ready", self.name);
        Ok(())
    }
}

/// Coordinates re-bootstrapping the template checkout itself
#[non_exhaustive]
pub struct SelfBootstrap {
    template_root: PathBuf,
    color: bool,
}

impl SelfBootstrap {
    /// Create a self-bootstrap operation from CLI arguments
    ///
    /// # Errors
    /// Returns an error when a virtual environment is active in the calling
    /// shell.
    #[inline]
    pub fn new(args: &Args) -> Result<Self> {
        ensure_no_active_virtualenv()?;
        let template_root = env::current_dir().context("Failed to resolve the template root")?;
        Ok(Self {
            template_root,
            color: args.color,
        })
    }

    /// Regenerate the template's own manifest and provision its environment
    ///
    /// Operates in place: no staging, no layout change, no commit. The
    /// manifest template file stays put so the checkout survives repeated
    /// runs.
    ///
    /// # Errors
    /// Returns a `Template` error when the manifest template is missing.
    #[inline]
    pub fn execute(&self) -> Result<()> {
        info!(
            "Re-bootstrapping template checkout at {}",
            self.template_root.display()
        );

        template::write_manifest(&self.template_root, PLACEHOLDER_NAME)?;
        provision_environment(&self.template_root, self.color);

        info!("Template checkout is ready for development");
        Ok(())
    }
}

/// Names of bootstrapper files that must never ship inside a project
fn bootstrapper_artifacts() -> Vec<String> {
    let mut artifacts = Vec::new();
    match env::current_exe() {
        Ok(exe) => {
            if let Some(name) = exe.file_name().and_then(|name| name.to_str()) {
                artifacts.push(name.to_owned());
            }
        }
        Err(err) => debug!("Could not resolve own executable name: {err}"),
    }
    artifacts
}

/// Refuse to run while a virtual environment is active
///
/// Pipenv would otherwise provision into the active environment instead of
/// the project's own.
fn ensure_no_active_virtualenv() -> Result<()> {
    if let Some(active) = env::var_os("VIRTUAL_ENV") {
        return Err(BootstrapError::environment(format!(
            "virtual environment active at {}; deactivate it and rerun",
            PathBuf::from(active).display()
        ))
        .into());
    }
    Ok(())
}
