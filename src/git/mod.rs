//! Git operations module
//!
//! Shells out to the git binary for working-copy cleanup and repository init

pub mod commands;

pub use commands::*;
