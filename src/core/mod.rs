//! Core module containing configuration and error handling
//!
//! These are shared by every helper family in the crate.

pub mod config;
pub mod errors;

// Re-export for convenience
pub use config::HelpersConfig;
pub use errors::{HelperError, HelperResult};
