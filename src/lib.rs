//! `sprig` - A CLI tool for bootstrapping Python projects from a template checkout
//!
//! This library stages a clean copy of the template checkout the tool runs
//! inside, reshapes it for the requested source layout, renders the
//! packaging manifest, commits the result to its destination, and provisions
//! a pipenv environment with quality tooling.

pub mod cli;
pub mod error;
pub mod git;
pub mod logging;
pub mod operations;
pub mod provision;
pub mod template;
pub mod utils;

use anyhow::Result;
use cli::Args;
use operations::{FreshProject, SelfBootstrap};

/// Main entry point for the sprig library
///
/// Dispatches to exactly one pipeline variant: self-bootstrap when `--dev`
/// is set, fresh-project creation otherwise.
pub fn run(args: Args) -> Result<()> {
    if args.dev {
        SelfBootstrap::new(&args)?.execute()
    } else {
        FreshProject::new(&args)?.execute()
    }
}
