//! The embedded Python project template
//!
//! sprig operates on exactly one template: the checkout it runs inside.
//! The pipeline looks for these fixed names.

pub mod layout;
pub mod manifest;

pub use layout::*;
pub use manifest::*;

/// Placeholder single-file module shipped by the template
pub const MODULE_FILE: &str = "yourproject.py";

/// Placeholder package directory shipped by the template
pub const PACKAGE_DIR: &str = "submodule";

/// Default project name, used when the template bootstraps itself
pub const PLACEHOLDER_NAME: &str = "yourproject";

/// Manifest template file
pub const MANIFEST_TEMPLATE: &str = "setup.py.template";

/// Rendered manifest file
pub const MANIFEST_FILE: &str = "setup.py";

/// The one substitution token the templater recognizes
pub const PLACEHOLDER_TOKEN: &str = "project_name";

/// Ignore list scrubbed once the manifest is rendered
pub const IGNORE_FILE: &str = ".gitignore";

/// Extension given to the renamed module file
pub const MODULE_EXTENSION: &str = "py";
