//! Shared utilities module

pub mod fs;
