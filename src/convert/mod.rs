//! Conversions between native values and nullable PostgreSQL wrappers
//!
//! - [`set`] builds wrappers from native or dynamically typed input
//! - [`revert`] reads wrappers back into native values

pub mod revert;
pub mod set;

pub use revert::*;
pub use set::*;
