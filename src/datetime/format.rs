//! Named date/time formats and formatting wrappers

use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use std::fmt::Display;

/// The fixed table of output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// `02/01/2006`
    DateDdMmYyyy,
    /// `2006/01/02`
    DateYyyyMmDd,
    /// `02/01/2006 15:04`
    DateDdMmYyyyHhMm,
    /// `02/01/2006 15:04:05`
    DateDdMmYyyyHhMmSs,
    /// `15:04:05`
    TimeHhMmSs,
    /// `15:04`
    TimeHhMm,
    /// `2006-01-02T15:04:05Z07:00`
    DateTimeRfc3339,
}

impl TimeFormat {
    /// chrono `strftime` pattern, `None` for RFC 3339 which has its own writer
    pub fn pattern(self) -> Option<&'static str> {
        match self {
            TimeFormat::DateDdMmYyyy => Some("%d/%m/%Y"),
            TimeFormat::DateYyyyMmDd => Some("%Y/%m/%d"),
            TimeFormat::DateDdMmYyyyHhMm => Some("%d/%m/%Y %H:%M"),
            TimeFormat::DateDdMmYyyyHhMmSs => Some("%d/%m/%Y %H:%M:%S"),
            TimeFormat::TimeHhMmSs => Some("%H:%M:%S"),
            TimeFormat::TimeHhMm => Some("%H:%M"),
            TimeFormat::DateTimeRfc3339 => None,
        }
    }
}

/// Time values that can be rendered with a [`TimeFormat`]
pub trait FormattableTime {
    fn format_as(&self, format: TimeFormat) -> String;
}

impl<Tz: TimeZone> FormattableTime for DateTime<Tz>
where
    Tz::Offset: Display,
{
    fn format_as(&self, format: TimeFormat) -> String {
        match format.pattern() {
            Some(pattern) => self.format(pattern).to_string(),
            None => self.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Naive timestamps are rendered as UTC
impl FormattableTime for NaiveDateTime {
    fn format_as(&self, format: TimeFormat) -> String {
        self.and_utc().format_as(format)
    }
}

impl FormattableTime for NaiveDate {
    fn format_as(&self, format: TimeFormat) -> String {
        NaiveDateTime::from(*self).format_as(format)
    }
}

/// Format an optional time value, returning an empty string when absent
pub fn format_time<T: FormattableTime>(time: Option<&T>, format: TimeFormat) -> String {
    time.map(|t| t.format_as(format)).unwrap_or_default()
}

/// Format a dynamic value, returning an empty string for non-time values
pub fn format_time_custom(value: &Value, format: TimeFormat) -> String {
    match value {
        Value::Date(date) => date.format_as(format),
        Value::Timestamp(ts) => ts.format_as(format),
        Value::TimestampTz(ts) => ts.format_as(format),
        _ => String::new(),
    }
}
