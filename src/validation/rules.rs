use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

use super::{Outcome, ValidationError};

pub type Payload = Map<String, Value>;

pub fn object(payload: &Value) -> Outcome<&Payload> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::new("\"value\" must be of type object"))
}

/// Fails with `message` when the key is absent. A present `null` is handed
/// on so the type rule can reject it.
pub fn required<'a>(obj: &'a Payload, key: &str, message: &str) -> Outcome<&'a Value> {
    obj.get(key).ok_or_else(|| ValidationError::new(message))
}

pub fn string<'a>(key: &str, value: &'a Value) -> Outcome<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(format!("\"{key}\" must be a string")))
}

/// A string that must not be `""`. Whitespace counts as content.
pub fn filled<'a>(key: &str, value: &'a Value, message: &str) -> Outcome<&'a str> {
    let s = string(key, value)?;
    if s.is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(s)
}

/// A string that must carry at least one non-blank character.
pub fn non_blank<'a>(key: &str, value: &'a Value, message: &str) -> Outcome<&'a str> {
    let s = string(key, value)?;
    if s.trim().is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(s)
}

pub fn min_chars(s: &str, min: usize, message: &str) -> Outcome<()> {
    if s.chars().count() < min {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

pub fn max_chars(s: &str, max: usize, message: &str) -> Outcome<()> {
    if s.chars().count() > max {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

pub fn email(s: &str, message: &str) -> Outcome<String> {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email regex is valid");
    }
    let normalized = s.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(ValidationError::new(message));
    }
    Ok(normalized)
}

/// Any value that does not name one of `T`'s variants fails with `message`.
pub fn one_of<T: FromStr>(value: &Value, message: &str) -> Outcome<T> {
    value
        .as_str()
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| ValidationError::new(message))
}

/// Numbers pass through; strings holding a finite number are coerced.
pub fn number(value: &Value, message: &str) -> Outcome<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::new(message))
}

/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates, zone-less
/// `YYYY-MM-DDTHH:MM:SS` (read as UTC) and epoch milliseconds, with any
/// fraction of a millisecond dropped. Years outside 0000-9999 cannot be
/// written back as RFC 3339 and are rejected.
pub fn date(value: &Value, message: &str) -> Outcome<OffsetDateTime> {
    let parsed = match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
        _ => None,
    };
    parsed
        .filter(|dt| WRITABLE_SECS.contains(&dt.unix_timestamp()))
        .map(|dt| dt.to_offset(UtcOffset::UTC))
        .ok_or_else(|| ValidationError::new(message))
}

// 0000-01-01T00:00:00Z ..= 9999-12-31T23:59:59Z
const WRITABLE_SECS: std::ops::RangeInclusive<i64> = -62_167_219_200..=253_402_300_799;

fn from_epoch_millis(ms: f64) -> Option<OffsetDateTime> {
    // beyond this OffsetDateTime is out of range anyway
    if !ms.is_finite() || ms.abs() > 1e15 {
        return None;
    }
    let nanos = (ms.trunc() as i128) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

fn parse_date_str(s: &str) -> Option<OffsetDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(dt.assume_utc());
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}
