//! Environment provisioning module
//!
//! Drives pipenv and the quality gates inside a committed project

pub mod environment;
pub mod gates;

pub use environment::*;
pub use gates::*;
