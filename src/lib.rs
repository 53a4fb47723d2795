//! vnw-helpers - stateless helpers for PostgreSQL-backed services
//!
//! # Modules
//!
//! * [`core`] - configuration and error types
//! * [`pgtype`] - nullable PostgreSQL value wrappers
//! * [`value`] - dynamically typed converter input
//! * [`convert`] - native values to and from nullable wrappers
//! * [`datetime`] - formatting, layout parsing and timestamp normalization
//! * [`null`] - the null-ish predicate
//! * [`array`] - PostgreSQL array literal parsing
//! * [`func`] - ternary, panic-safe spawning and bounded fan-out

pub mod array;
pub mod convert;
pub mod core;
pub mod datetime;
pub mod func;
pub mod null;
pub mod pgtype;
pub mod value;

pub use crate::core::{HelperError, HelperResult, HelpersConfig};
pub use array::{convert_to_slice, try_convert_to_slice};
pub use datetime::{TimestampNormalizer, normalize_timestamp, string_to_pg_timestamp};
pub use null::{NotNull, not_null};
pub use pgtype::PgNullable;
pub use value::Value;
