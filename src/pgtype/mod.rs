//! Nullable PostgreSQL value wrappers
//!
//! Every wrapper is a `PgNullable<T>`: a value plus a validity flag. An invalid
//! wrapper maps to SQL `NULL`; its `value` is the type's default and carries no
//! meaning.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may be SQL `NULL`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PgNullable<T> {
    pub value: T,
    pub valid: bool,
}

pub type PgText = PgNullable<String>;
pub type PgInt2 = PgNullable<i16>;
pub type PgInt4 = PgNullable<i32>;
pub type PgInt8 = PgNullable<i64>;
pub type PgFloat4 = PgNullable<f32>;
pub type PgFloat8 = PgNullable<f64>;
pub type PgBool = PgNullable<bool>;
pub type PgDate = PgNullable<NaiveDate>;
pub type PgTimestamp = PgNullable<NaiveDateTime>;
pub type PgTimestamptz = PgNullable<DateTime<Utc>>;
pub type PgNumeric = PgNullable<BigDecimal>;

impl<T> PgNullable<T> {
    /// Wrap a present value
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// Wrap a value with an explicit validity flag
    pub fn with_validity(value: T, valid: bool) -> Self {
        Self { value, valid }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> PgNullable<T> {
    /// The SQL `NULL` wrapper
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::null(),
        }
    }
}

impl<T: Default> From<Option<T>> for PgNullable<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<PgNullable<T>> for Option<T> {
    fn from(value: PgNullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: Serialize> Serialize for PgNullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for PgNullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::PgInt2 {}
    impl Sealed for super::PgInt4 {}
    impl Sealed for super::PgInt8 {}
    impl Sealed for super::PgFloat4 {}
    impl Sealed for super::PgFloat8 {}
}

/// Integer wrappers: `PgInt2`, `PgInt4`, `PgInt8`
pub trait PgInt: sealed::Sealed + Sized {
    /// Build a valid wrapper, narrowing with a truncating cast
    fn from_i64(value: i64) -> Self;

    /// Widen to `i64`, `None` when invalid
    fn to_i64(&self) -> Option<i64>;
}

impl PgInt for PgInt2 {
    fn from_i64(value: i64) -> Self {
        Self::new(value as i16)
    }

    fn to_i64(&self) -> Option<i64> {
        self.as_option().map(|v| i64::from(*v))
    }
}

impl PgInt for PgInt4 {
    fn from_i64(value: i64) -> Self {
        Self::new(value as i32)
    }

    fn to_i64(&self) -> Option<i64> {
        self.as_option().map(|v| i64::from(*v))
    }
}

impl PgInt for PgInt8 {
    fn from_i64(value: i64) -> Self {
        Self::new(value)
    }

    fn to_i64(&self) -> Option<i64> {
        self.as_option().copied()
    }
}

/// Float wrappers: `PgFloat4`, `PgFloat8`
pub trait PgFloat: sealed::Sealed + Sized {
    /// Build a valid wrapper, narrowing `f64` to `f32` where needed
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`, `None` when invalid
    fn to_f64(&self) -> Option<f64>;
}

impl PgFloat for PgFloat4 {
    fn from_f64(value: f64) -> Self {
        Self::new(value as f32)
    }

    fn to_f64(&self) -> Option<f64> {
        self.as_option().map(|v| f64::from(*v))
    }
}

impl PgFloat for PgFloat8 {
    fn from_f64(value: f64) -> Self {
        Self::new(value)
    }

    fn to_f64(&self) -> Option<f64> {
        self.as_option().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_wrapper_has_no_option_value() {
        let text = PgText::null();
        assert!(!text.is_valid());
        assert_eq!(text.as_option(), None);
        assert_eq!(text.into_option(), None);
    }

    #[test]
    fn test_option_round_trip() {
        let value: PgInt4 = Some(7).into();
        assert!(value.valid);
        assert_eq!(Option::<i32>::from(value), Some(7));

        let missing: PgInt4 = None.into();
        assert_eq!(missing, PgInt4::null());
    }

    #[test]
    fn test_serializes_as_value_or_null() {
        let present = PgText::new("hello".to_string());
        let absent = PgText::with_validity("ignored".to_string(), false);

        assert_eq!(serde_json::to_string(&present).unwrap(), "\"hello\"");
        assert_eq!(serde_json::to_string(&absent).unwrap(), "null");

        let decoded: PgInt8 = serde_json::from_str("null").unwrap();
        assert!(!decoded.valid);
        let decoded: PgInt8 = serde_json::from_str("42").unwrap();
        assert_eq!(decoded, PgInt8::new(42));
    }

    #[test]
    fn test_int_narrowing_truncates() {
        assert_eq!(PgInt2::from_i64(70_000).value, 70_000_i64 as i16);
        assert_eq!(PgInt4::from_i64(-5).to_i64(), Some(-5));
        assert_eq!(PgInt8::null().to_i64(), None);
    }

    #[test]
    fn test_float_widening() {
        assert_eq!(PgFloat4::from_f64(1.5).to_f64(), Some(1.5));
        assert_eq!(PgFloat8::null().to_f64(), None);
    }
}
