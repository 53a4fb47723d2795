//! Generic functional helpers
//!
//! - [`compare`] - value selection
//! - [`recovery`] - panic-safe background tasks
//! - [`routine`] - bounded-concurrency fan-out

pub mod compare;
pub mod recovery;
pub mod routine;

pub use compare::ternary;
pub use recovery::go_safe;
pub use routine::run_with_concurrency_limit;
