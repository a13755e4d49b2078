//! Runtime values exchanged with the driver.
//!
//! [`Value`] is what column bindings carry on the write path and what rows
//! carry on the read path. [`ToValue`] and [`FromValue`] convert between Rust
//! types and values; [`Value::to_sql_literal`] renders the inline literal form
//! used by WHERE clauses and bulk inserts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Number of 100ns ticks in one microsecond.
const TICKS_PER_MICROSECOND: i64 = 10;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// A single SQL value. [`Value::Null`] is the NULL sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

impl Value {
    /// Whether this is the NULL sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type label used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Json(_) => "json",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Render this value as an inline SQL literal.
    ///
    /// Strings are wrapped in single quotes **without** escaping embedded
    /// quotes; callers embedding untrusted text must bind it instead.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Text(s) => format!("'{s}'"),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Json(json) => format!("'{json}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Uuid(u) => write!(f, "{u}"),
            Value::Json(json) => write!(f, "{json}"),
            Value::Bytes(bytes) => {
                f.write_str("0x")?;
                for b in bytes {
                    write!(f, "{b:02X}")?;
                }
                Ok(())
            }
        }
    }
}

/// Error produced when a [`Value`] cannot be converted into a Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueError {
    pub expected: &'static str,
    pub found: String,
}

impl ValueError {
    pub fn new(expected: &'static str, found: &Value) -> Self {
        Self {
            expected,
            found: format!("{} `{}`", found.type_name(), found),
        }
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert {} to {}", self.found, self.expected)
    }
}

impl std::error::Error for ValueError {}

// ── write side ───────────────────────────────────────────────────────────────

/// Conversion of a Rust value into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

macro_rules! int_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for u64 {
    fn to_value(&self) -> Value {
        match i64::try_from(*self) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Text(self.to_string()),
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::DateTime(self.and_time(NaiveTime::MIN))
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::DateTime(self.naive_utc())
    }
}

impl ToValue for Uuid {
    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::Json(self.clone())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

// ── read side ────────────────────────────────────────────────────────────────

/// Conversion of a raw [`Value`] into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn value_to_i64(value: &Value, expected: &'static str) -> Result<i64, ValueError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(x) if x.is_finite() => Ok(x.round() as i64),
        Value::Text(s) => s.trim().parse().map_err(|_| ValueError::new(expected, value)),
        _ => Err(ValueError::new(expected, value)),
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Result<Self, ValueError> {
                    let wide = value_to_i64(value, stringify!($t))?;
                    <$t>::try_from(wide).map_err(|_| ValueError::new(stringify!($t), value))
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => s.trim().parse().map_err(|_| ValueError::new("f64", value)),
            _ => Err(ValueError::new("f64", value)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        f64::from_value(value).map(|x| x as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            Value::Float(x) => Ok(*x != 0.0),
            Value::Text(s) => match s.trim() {
                t if t.eq_ignore_ascii_case("true") || t == "1" => Ok(true),
                t if t.eq_ignore_ascii_case("false") || t == "0" => Ok(false),
                _ => Err(ValueError::new("bool", value)),
            },
            _ => Err(ValueError::new("bool", value)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Err(ValueError::new("String", value)),
            Value::Text(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

/// Date/time values are read back as a tick count, not parsed from text.
impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::Int(ticks) => datetime_from_ticks(*ticks)
                .ok_or_else(|| ValueError::new("NaiveDateTime", value)),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(datetime_from_ticks)
                .ok_or_else(|| ValueError::new("NaiveDateTime", value)),
            _ => Err(ValueError::new("NaiveDateTime", value)),
        }
    }
}

impl FromValue for Uuid {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Uuid(u) => Ok(*u),
            Value::Text(s) => Uuid::parse_str(s.trim()).map_err(|_| ValueError::new("Uuid", value)),
            Value::Bytes(b) => Uuid::from_slice(b).map_err(|_| ValueError::new("Uuid", value)),
            _ => Err(ValueError::new("Uuid", value)),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Json(json) => Ok(json.clone()),
            Value::Text(s) => serde_json::from_str(s).map_err(|_| ValueError::new("json", value)),
            _ => Err(ValueError::new("json", value)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            Value::Text(s) => Ok(s.as_bytes().to_vec()),
            _ => Err(ValueError::new("bytes", value)),
        }
    }
}

// ── ticks ────────────────────────────────────────────────────────────────────

fn tick_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1, 1, 1).map(|d| d.and_time(NaiveTime::MIN))
}

/// Build a date/time from a count of 100ns ticks since 0001-01-01T00:00:00.
pub fn datetime_from_ticks(ticks: i64) -> Option<NaiveDateTime> {
    if ticks < 0 {
        return None;
    }
    let micros = ticks / TICKS_PER_MICROSECOND;
    let nanos = (ticks % TICKS_PER_MICROSECOND) * 100;
    let delta = TimeDelta::microseconds(micros).checked_add(&TimeDelta::nanoseconds(nanos))?;
    tick_epoch()?.checked_add_signed(delta)
}

/// Count of 100ns ticks since 0001-01-01T00:00:00 for the given date/time.
pub fn datetime_to_ticks(dt: NaiveDateTime) -> Option<i64> {
    let delta = dt.signed_duration_since(tick_epoch()?);
    delta
        .num_seconds()
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(i64::from(delta.subsec_nanos()) / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_quoting_rules() {
        assert_eq!(Value::Null.to_sql_literal(), "NULL");
        assert_eq!("Bob".to_value().to_sql_literal(), "'Bob'");
        assert_eq!(true.to_value().to_sql_literal(), "1");
        assert_eq!(false.to_value().to_sql_literal(), "0");
        assert_eq!(50i32.to_value().to_sql_literal(), "50");
        assert_eq!(2.5f64.to_value().to_sql_literal(), "2.5");
    }

    #[test]
    fn literal_strings_are_not_escaped() {
        assert_eq!("O'Brien".to_value().to_sql_literal(), "'O'Brien'");
    }

    #[test]
    fn literal_datetime_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(dt.to_value().to_sql_literal(), "'2024-03-09 07:05:01'");
    }

    #[test]
    fn literal_uuid_uses_plain_string_form() {
        let id = Uuid::nil();
        assert_eq!(
            id.to_value().to_sql_literal(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn option_none_is_null_sentinel() {
        assert_eq!(Option::<String>::None.to_value(), Value::Null);
        assert_eq!(Some(3i64).to_value(), Value::Int(3));
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(i32::from_value(&Value::Int(50)), Ok(50));
        assert_eq!(i32::from_value(&Value::Text(" 12 ".into())), Ok(12));
        assert_eq!(i64::from_value(&Value::Float(2.6)), Ok(3));
        assert!(u8::from_value(&Value::Int(300)).is_err());
        assert!(i32::from_value(&Value::Text("abc".into())).is_err());
    }

    #[test]
    fn bool_conversions() {
        assert_eq!(bool::from_value(&Value::Int(1)), Ok(true));
        assert_eq!(bool::from_value(&Value::Int(0)), Ok(false));
        assert_eq!(bool::from_value(&Value::Text("True".into())), Ok(true));
        assert!(bool::from_value(&Value::Text("yes".into())).is_err());
    }

    #[test]
    fn string_conversion_uses_display_form() {
        assert_eq!(String::from_value(&Value::Int(7)), Ok("7".to_string()));
        assert!(String::from_value(&Value::Null).is_err());
    }

    #[test]
    fn nullable_unwraps_to_underlying_type() {
        assert_eq!(Option::<i32>::from_value(&Value::Null), Ok(None));
        assert_eq!(Option::<i32>::from_value(&Value::Int(4)), Ok(Some(4)));
    }

    #[test]
    fn datetime_is_read_from_ticks() {
        // 2000-01-01T00:00:00 in .NET ticks
        let ticks = 630_822_816_000_000_000i64;
        let dt = NaiveDateTime::from_value(&Value::Int(ticks)).unwrap();
        assert_eq!(dt.to_string(), "2000-01-01 00:00:00");
        assert_eq!(datetime_to_ticks(dt), Some(ticks));
    }

    #[test]
    fn datetime_text_is_not_calendar_parsed() {
        assert!(NaiveDateTime::from_value(&Value::Text("2000-01-01 00:00:00".into())).is_err());
        assert!(NaiveDateTime::from_value(&Value::Text("630822816000000000".into())).is_ok());
    }

    #[test]
    fn tick_epoch_is_year_one() {
        assert_eq!(
            datetime_from_ticks(0).unwrap().to_string(),
            "0001-01-01 00:00:00"
        );
        assert_eq!(datetime_from_ticks(-1), None);
    }
}
