//! # sprig
//!
//! sprig turns a Python project template checkout into a fresh, ready-to-use
//! project: it stages a clean copy, shapes the source layout, renders the
//! packaging manifest, moves the result into place, and provisions a pipenv
//! environment with the quality tooling already wired up.
//!
//! ## Usage
//!
//! **New project with a single-module layout:**
//! ```sh
//! sprig demo --destination ~/work
//! ```
//!
//! **Package layout, louder logging:**
//! ```sh
//! sprig demo -l package -vv
//! ```
//!
//! **Re-bootstrap the template checkout itself:**
//! ```sh
//! sprig --dev
//! ```
//!
//! See `sprig --help` for all options.

use clap::Parser as _;
use sprig::cli::Args;
use sprig::error::BootstrapError;
use sprig::logging::{self, LogPolicy};
use tracing::error;

fn main() {
    let args = Args::parse();

    let policy = LogPolicy::resolve(args.verbose);
    logging::init(&policy, args.color);

    match sprig::run(args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(
                err.downcast_ref::<BootstrapError>()
                    .map_or(1, BootstrapError::exit_code),
            );
        }
    }
}
