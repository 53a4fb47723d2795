//! The "null-ish" predicate
//!
//! A value is null-ish when it is semantically absent: a blank string or a
//! textual null marker, a zero number, `false`, an invalid nullable wrapper.

use crate::pgtype::PgNullable;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Textual markers treated as absent
pub const NULL_MARKERS: [&str; 3] = ["null", "NULL", "nil"];

pub trait NotNull {
    /// `true` when the value carries meaningful content
    fn not_null(&self) -> bool;
}

/// Free-function form of [`NotNull::not_null`]
pub fn not_null<T: NotNull + ?Sized>(value: &T) -> bool {
    value.not_null()
}

impl NotNull for str {
    fn not_null(&self) -> bool {
        !NULL_MARKERS.contains(&self) && !self.trim().is_empty()
    }
}

impl NotNull for String {
    fn not_null(&self) -> bool {
        self.as_str().not_null()
    }
}

impl<T: NotNull + ?Sized> NotNull for &T {
    fn not_null(&self) -> bool {
        (**self).not_null()
    }
}

macro_rules! impl_not_null_for_numbers {
    ($($ty:ty),*) => {
        $(
            impl NotNull for $ty {
                fn not_null(&self) -> bool {
                    *self != 0 as $ty
                }
            }
        )*
    };
}

impl_not_null_for_numbers!(i16, i32, i64, u32, u64, f32, f64);

impl NotNull for bool {
    fn not_null(&self) -> bool {
        *self
    }
}

// chrono has no zero time; any constructed instant is present.
impl NotNull for NaiveDate {
    fn not_null(&self) -> bool {
        true
    }
}

impl NotNull for NaiveDateTime {
    fn not_null(&self) -> bool {
        true
    }
}

impl<Tz: TimeZone> NotNull for DateTime<Tz> {
    fn not_null(&self) -> bool {
        true
    }
}

impl<T> NotNull for PgNullable<T> {
    fn not_null(&self) -> bool {
        self.valid
    }
}

impl<T: NotNull> NotNull for Option<T> {
    fn not_null(&self) -> bool {
        self.as_ref().is_some_and(NotNull::not_null)
    }
}

impl NotNull for Value {
    fn not_null(&self) -> bool {
        match self {
            Value::Null => false,
            Value::String(value) => value.not_null(),
            Value::Int32(value) => value.not_null(),
            Value::Int64(value) => value.not_null(),
            Value::Float32(value) => value.not_null(),
            Value::Float64(value) => value.not_null(),
            Value::Bool(value) => value.not_null(),
            Value::Date(_) | Value::Timestamp(_) | Value::TimestampTz(_) => true,
            // Not recognised by the predicate
            Value::Bytes(_) | Value::Uuid(_) | Value::Json(_) => false,
        }
    }
}
