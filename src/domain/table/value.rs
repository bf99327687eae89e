//! Cell values loaded from the relational store.
//!
//! Tables arrive with whatever column types the store happens to use, so a
//! cell is a small dynamically typed value. Analyzers never match on the
//! variants directly; they go through the coercions below, which treat
//! anything they cannot interpret as missing.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A single cell of a [`LogicalTable`](super::LogicalTable).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Epoch values at or above this are treated as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

impl Value {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Creates a float value, mapping NaN and infinities to `Null`.
    pub fn float(x: f64) -> Self {
        if x.is_finite() {
            Value::Float(x)
        } else {
            Value::Null
        }
    }

    /// Returns true for `Null` and for non-finite floats.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(x) => !x.is_finite(),
            _ => false,
        }
    }

    /// Borrows the text of a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric coercion.
    ///
    /// Integers, finite floats, and text that parses as a number (after
    /// trimming) are numeric. Everything else, including booleans and dates,
    /// is `None` so that aggregates exclude it.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) if x.is_finite() => Some(*x),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
            _ => None,
        }
    }

    /// Grouping/equality key. `None` for null cells and blank text.
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Float(x) if !x.is_finite() => None,
            Value::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            other => Some(other.to_string()),
        }
    }

    /// Calendar date coercion.
    ///
    /// Accepts date and datetime cells, ISO-like text (`2024-03-01`,
    /// `2024-03-01 10:00:00`, `2024-03-01T10:00:00`, RFC 3339), and epoch
    /// milliseconds as the upstream feed reports them.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Int(i) => date_from_epoch_millis(*i),
            Value::Text(s) => parse_date(s.trim()),
            _ => None,
        }
    }
}

fn date_from_epoch_millis(millis: i64) -> Option<NaiveDate> {
    if millis < EPOCH_MILLIS_THRESHOLD {
        return None;
    }
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    s.parse::<i64>().ok().and_then(date_from_epoch_millis)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_finite() => write!(f, "{}", x),
            Value::Float(_) => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Date(_) | Value::DateTime(_) => serializer.collect_str(self),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_accepts_numbers_and_numeric_text() {
        assert_eq!(Value::Int(12).as_f64(), Some(12.0));
        assert_eq!(Value::Float(4.5).as_f64(), Some(4.5));
        assert_eq!(Value::text(" 42 ").as_f64(), Some(42.0));
    }

    #[test]
    fn numeric_coercion_rejects_everything_else() {
        assert_eq!(Value::text("12 runs").as_f64(), None);
        assert_eq!(Value::text("").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
    }

    #[test]
    fn float_constructor_maps_nan_to_null() {
        assert_eq!(Value::float(f64::NAN), Value::Null);
        assert!(Value::Float(f64::NAN).is_null());
    }

    #[test]
    fn key_trims_text_and_skips_blanks() {
        assert_eq!(Value::text("  India ").key(), Some("India".to_string()));
        assert_eq!(Value::text("   ").key(), None);
        assert_eq!(Value::Null.key(), None);
        assert_eq!(Value::Int(7).key(), Some("7".to_string()));
    }

    #[test]
    fn dates_parse_from_common_text_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Value::text("2024-03-01").as_date(), Some(expected));
        assert_eq!(Value::text("2024-03-01 10:15:00").as_date(), Some(expected));
        assert_eq!(Value::text("2024-03-01T10:15:00").as_date(), Some(expected));
        assert_eq!(Value::text("2024-03-01T10:15:00+00:00").as_date(), Some(expected));
        assert_eq!(Value::Date(expected).as_date(), Some(expected));
    }

    #[test]
    fn dates_parse_from_epoch_millis() {
        // 2023-10-09T12:00:00Z
        let value = Value::text("1696852800000");
        assert_eq!(value.as_date(), NaiveDate::from_ymd_opt(2023, 10, 9));
        assert_eq!(Value::Int(1_696_852_800_000).as_date(), NaiveDate::from_ymd_opt(2023, 10, 9));
    }

    #[test]
    fn malformed_dates_are_none() {
        assert_eq!(Value::text("yesterday").as_date(), None);
        assert_eq!(Value::Int(2024).as_date(), None);
    }

    #[test]
    fn display_renders_null_as_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(), "2024-01-02");
    }

    #[test]
    fn serializes_to_plain_json_scalars() {
        let json = serde_json::to_string(&vec![
            Value::Null,
            Value::Int(3),
            Value::text("x"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,3,"x","2024-01-02"]"#);
    }
}
