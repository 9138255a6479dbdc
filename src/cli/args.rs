use clap::{ArgAction, Parser, ValueEnum};
use regex::Regex;
use std::path::PathBuf;

use crate::error::BootstrapError;

/// Pattern a project name must match to be usable as a Python identifier
const PROJECT_NAME_PATTERN: &str = "^[A-Za-z_][A-Za-z0-9_]*$";

/// Command-line arguments for sprig
#[derive(Parser, Debug, Clone)]
#[command(name = "sprig")]
#[command(about = "A CLI tool for bootstrapping Python projects from a template checkout")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Name of the project to create (must be a valid Python identifier)
    #[arg(value_name = "PROJECT", required_unless_present = "dev")]
    pub project: Option<String>,

    /// Directory under which the new project root is created
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub destination: PathBuf,

    /// Source layout for the generated project
    #[arg(short, long, value_enum, value_name = "LAYOUT", default_value_t = Layout::Module)]
    pub layout: Layout,

    /// Re-bootstrap the template checkout itself instead of creating a project
    #[arg(long)]
    pub dev: bool,

    /// Include the optional pretty-output dependency group and colorize output
    #[arg(short, long)]
    pub color: bool,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Source layout variants for a generated project
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single importable module file
    Module,
    /// Package directory
    Package,
}

/// Validate that a name is usable as a Python identifier
///
/// # Errors
/// Returns a `ProjectName` error when the name is empty, starts with a digit,
/// or contains anything besides letters, digits, and underscores.
pub fn validate_project_name(name: &str) -> anyhow::Result<()> {
    let pattern = Regex::new(PROJECT_NAME_PATTERN)?;
    if pattern.is_match(name) {
        return Ok(());
    }
    Err(BootstrapError::project_name(format!(
        "'{name}' is not a valid identifier (letters, digits, and underscores, not starting with a digit)"
    ))
    .into())
}
