//! Configuration management for the helper library
//!
//! Helpers never read the environment on their own. Callers that want
//! environment-driven settings build a `HelpersConfig` with `from_env` and pass
//! it (or the pieces they need) explicitly.

use super::{HelperError, HelperResult};
use std::env;

/// Century prepended to two-digit years when no configuration is supplied
pub const DEFAULT_TWO_DIGIT_YEAR_CENTURY: i32 = 2000;

/// Concurrency limit used when no configuration is supplied
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 8;

const TWO_DIGIT_YEAR_CENTURY_VAR: &str = "VNW_TWO_DIGIT_YEAR_CENTURY";
const CONCURRENCY_LIMIT_VAR: &str = "VNW_CONCURRENCY_LIMIT";

/// Settings shared by the helpers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpersConfig {
    /// Century added to two-digit years (`24` becomes `century + 24`)
    pub two_digit_year_century: i32,
    /// Default number of in-flight handlers for the concurrency runner
    pub concurrency_limit: usize,
}

impl Default for HelpersConfig {
    fn default() -> Self {
        Self {
            two_digit_year_century: DEFAULT_TWO_DIGIT_YEAR_CENTURY,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

impl HelpersConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// Optional (with defaults):
    /// - `VNW_TWO_DIGIT_YEAR_CENTURY`: century for two-digit years (default: 2000)
    /// - `VNW_CONCURRENCY_LIMIT`: default concurrency limit (default: 8)
    pub fn from_env() -> HelperResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// Missing keys fall back to defaults; present keys must be valid.
    pub fn from_lookup<F>(lookup: F) -> HelperResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let century = match lookup(TWO_DIGIT_YEAR_CENTURY_VAR) {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| {
                HelperError::config(format!("{TWO_DIGIT_YEAR_CENTURY_VAR} must be an integer"))
            })?,
            None => DEFAULT_TWO_DIGIT_YEAR_CENTURY,
        };

        let concurrency_limit = match lookup(CONCURRENCY_LIMIT_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                HelperError::config(format!(
                    "{CONCURRENCY_LIMIT_VAR} must be a non-negative integer"
                ))
            })?,
            None => DEFAULT_CONCURRENCY_LIMIT,
        };

        Self::validate_and_create(century, concurrency_limit)
    }

    /// Validate configuration parameters and create HelpersConfig
    pub fn validate_and_create(
        two_digit_year_century: i32,
        concurrency_limit: usize,
    ) -> HelperResult<Self> {
        if two_digit_year_century <= 0 || two_digit_year_century % 100 != 0 {
            return Err(HelperError::config(format!(
                "{TWO_DIGIT_YEAR_CENTURY_VAR} must be a positive multiple of 100"
            )));
        }

        // A four-digit result is required by the canonical timestamp layout
        if two_digit_year_century > 9900 {
            return Err(HelperError::config(format!(
                "{TWO_DIGIT_YEAR_CENTURY_VAR} cannot be later than 9900"
            )));
        }

        if concurrency_limit == 0 {
            return Err(HelperError::config(format!(
                "{CONCURRENCY_LIMIT_VAR} must be at least 1"
            )));
        }

        Ok(Self {
            two_digit_year_century,
            concurrency_limit,
        })
    }
}
