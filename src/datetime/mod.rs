//! Date and time helpers
//!
//! - [`format`] - named output formats and formatting wrappers
//! - [`layouts`] - parsing against ordered candidate layouts
//! - [`normalizer`] - normalization of loosely formatted timestamps

pub mod format;
pub mod layouts;
pub mod normalizer;

pub use format::{FormattableTime, TimeFormat, format_time, format_time_custom};
pub use layouts::{parse_with_layouts, string_to_pg_date};
pub use normalizer::{
    TimestampNormalizer, normalize_timestamp, string_to_pg_timestamp, string_to_pg_timestamptz,
};
