//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for sprig operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BootstrapError {
    /// Project Name Error - not a usable Python identifier
    #[error("Invalid project name: {message}")]
    ProjectName { message: String },

    /// Destination Error - target directory already taken
    #[error("Destination error: {message}")]
    Destination { message: String },

    /// Environment Error - shell state incompatible with provisioning
    #[error("Environment error: {message}")]
    Environment { message: String },

    /// Template Error - template checkout is missing expected content
    #[error("Template error: {message}")]
    Template { message: String },

    /// Filesystem Error - staging or commit operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl BootstrapError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::ProjectName { .. } | Self::Destination { .. } | Self::Environment { .. } => 1,
            Self::Template { .. } => 2,
            Self::Filesystem { .. } => 3,
        }
    }

    /// Create a project name error
    #[inline]
    pub fn project_name<S: Into<String>>(message: S) -> Self {
        Self::ProjectName {
            message: message.into(),
        }
    }

    /// Create a destination error
    #[inline]
    pub fn destination<S: Into<String>>(message: S) -> Self {
        Self::Destination {
            message: message.into(),
        }
    }

    /// Create an environment error
    #[inline]
    pub fn environment<S: Into<String>>(message: S) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    /// Create a template error
    #[inline]
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}
