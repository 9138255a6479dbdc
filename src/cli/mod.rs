//! Command-line interface module
//!
//! Handles argument parsing and project name validation

pub mod args;

pub use args::*;
