//! Operations module
//!
//! Coordinates the bootstrap pipeline: staging, transformation, and commit

pub mod bootstrap;
pub mod commit;
pub mod stage;

pub use bootstrap::*;
pub use commit::*;
pub use stage::*;
