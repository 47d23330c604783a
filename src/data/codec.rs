//! Field codecs for the listings CSV.
//!
//! Each submodule is a serde `with` adapter: `deserialize` applies the load
//! coercion for one column shape, `serialize` writes the value back in the
//! same textual form so an exported file loads again unchanged.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Cells that mean "no value".
fn is_absent(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "N/A"
}

fn parse_number<T, E>(raw: &str) -> Result<T, E>
where
    T: FromStr,
    T::Err: Display,
    E: serde::de::Error,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| E::custom(format!("'{raw}' is not a number: {e}")))
}

fn finite<E: serde::de::Error>(v: f64, raw: &str) -> Result<f64, E> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(E::custom(format!("'{raw}' is not a finite number")))
    }
}

fn parse_date<E: serde::de::Error>(raw: &str) -> Result<chrono::NaiveDate, E> {
    // ISO timestamps are accepted; only the calendar date is kept.
    let head = raw.trim().get(..10).unwrap_or(raw.trim());
    chrono::NaiveDate::parse_from_str(head, DATE_FORMAT)
        .map_err(|e| E::custom(format!("'{raw}' is not a date: {e}")))
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub mod opt_text {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok((!is_absent(&raw)).then_some(raw))
    }

    pub fn serialize<S: Serializer>(v: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(text) => s.serialize_str(text),
            None => s.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Booleans: "t" is true, anything else is false
// ---------------------------------------------------------------------------

pub mod flag {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(raw.trim() == "t")
    }

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *v { "t" } else { "f" })
    }
}

pub mod opt_flag {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok((!is_absent(&raw)).then(|| raw.trim() == "t"))
    }

    pub fn serialize<S: Serializer>(v: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(b) => super::flag::serialize(b, s),
            None => s.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

pub mod float {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(d)?;
        let v = parse_number::<f64, D::Error>(&raw)?;
        finite(v, &raw)
    }

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(*v)
    }
}

pub mod opt_float {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = String::deserialize(d)?;
        if is_absent(&raw) {
            return Ok(None);
        }
        let v = parse_number::<f64, D::Error>(&raw)?;
        finite(v, &raw).map(Some)
    }

    pub fn serialize<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(x) => s.serialize_f64(*x),
            None => s.serialize_none(),
        }
    }
}

pub mod opt_int {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        let raw = String::deserialize(d)?;
        if is_absent(&raw) {
            return Ok(None);
        }
        parse_number::<i64, D::Error>(&raw).map(Some)
    }

    pub fn serialize<S: Serializer>(v: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(x) => s.serialize_i64(*x),
            None => s.serialize_none(),
        }
    }
}

/// `"95%"` ↔ `0.95`.
pub mod opt_percent {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = String::deserialize(d)?;
        if is_absent(&raw) {
            return Ok(None);
        }
        let digits = raw.trim().trim_end_matches('%');
        let v = parse_number::<f64, D::Error>(digits)?;
        finite(v / 100.0, &raw).map(Some)
    }

    pub fn serialize<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(rate) => s.serialize_str(&format!("{}%", (rate * 100.0).round())),
            None => s.serialize_none(),
        }
    }
}

/// `"$1,234.00"` ↔ `1234.0`.
pub mod opt_currency {
    use super::*;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let raw = String::deserialize(d)?;
        if is_absent(&raw) {
            return Ok(None);
        }
        let digits: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        let v = parse_number::<f64, D::Error>(&digits)?;
        finite(v, &raw).map(Some)
    }

    pub fn serialize<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(price) => s.serialize_str(&format!("${price:.2}")),
            None => s.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

pub mod date {
    use super::*;
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw)
    }

    pub fn serialize<S: Serializer>(v: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&v.format(DATE_FORMAT))
    }
}

pub mod opt_date {
    use super::*;
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if is_absent(&raw) {
            return Ok(None);
        }
        parse_date(&raw).map(Some)
    }

    pub fn serialize<S: Serializer>(v: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(day) => s.collect_str(&day.format(DATE_FORMAT)),
            None => s.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// List literals: `["Wifi", "Kitchen"]` or `['email', 'phone']`
// ---------------------------------------------------------------------------

pub mod list {
    use super::*;
    use serde::de::Error as _;
    use serde::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_list(&raw).map_err(D::Error::custom)
    }

    pub fn serialize<S: Serializer>(v: &[String], s: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(v).map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    pub(crate) fn parse_list(raw: &str) -> Result<Vec<String>, String> {
        let trimmed = raw.trim();
        if is_absent(trimmed) {
            return Ok(Vec::new());
        }
        // JSON first: amenity names may legitimately contain apostrophes.
        serde_json::from_str::<Vec<String>>(trimmed)
            .or_else(|_| serde_json::from_str::<Vec<String>>(&trimmed.replace('\'', "\"")))
            .map_err(|e| format!("'{raw}' is not a list literal: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::list::parse_list;

    #[test]
    fn parses_python_style_list() {
        assert_eq!(
            parse_list("['email', 'phone']").unwrap(),
            vec!["email".to_string(), "phone".to_string()]
        );
    }

    #[test]
    fn parses_json_list_with_apostrophe() {
        assert_eq!(
            parse_list(r#"["Children's books", "Wifi"]"#).unwrap(),
            vec!["Children's books".to_string(), "Wifi".to_string()]
        );
    }

    #[test]
    fn empty_cell_is_empty_list() {
        assert!(parse_list("").unwrap().is_empty());
        assert!(parse_list("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_list("email, phone").is_err());
    }
}
