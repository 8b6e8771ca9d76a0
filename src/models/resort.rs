// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resort condition records as returned by the snow API.
//!
//! The upstream payload is loosely typed: lift/trail counts arrive as
//! `"open/total"` strings (or the literal `"n/a"`), ids may be strings or
//! numbers, and depth/snowfall fields carry inch marks. Everything is
//! normalized here so downstream code never touches raw strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::score::percent_open;

/// Upstream sentinel meaning "no data", equivalent to `0/0`.
pub const NOT_AVAILABLE: &str = "n/a";

const UNKNOWN_RESORT: &str = "Unknown Resort";

/// An `"open/total"` count such as `"12/20"` lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenRatio {
    pub open: u32,
    pub total: u32,
}

impl OpenRatio {
    pub fn new(open: u32, total: u32) -> Self {
        Self { open, total }
    }

    /// Parse an `"open/total"` string. `"n/a"` is treated as `0/0`.
    pub fn parse(raw: &str) -> Result<Self, RatioError> {
        let raw = raw.trim();
        if raw == NOT_AVAILABLE {
            return Ok(Self::default());
        }

        let (open, total) = raw
            .split_once('/')
            .ok_or_else(|| RatioError(raw.to_string()))?;
        let open = open
            .trim()
            .parse()
            .map_err(|_| RatioError(raw.to_string()))?;
        let total = total
            .trim()
            .parse()
            .map_err(|_| RatioError(raw.to_string()))?;

        Ok(Self { open, total })
    }

    /// Percentage open, `0` when the total is zero.
    pub fn percent(&self) -> f64 {
        percent_open(self.open, self.total)
    }
}

impl fmt::Display for OpenRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.open, self.total)
    }
}

impl FromStr for OpenRatio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for OpenRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OpenRatio {
    /// Lenient: anything unparseable becomes `0/0` rather than failing the
    /// whole snapshot.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(raw)) => OpenRatio::parse(&raw).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "Treating malformed ratio as 0/0");
                OpenRatio::default()
            }),
            Some(other) if !other.is_null() => {
                tracing::debug!(value = %other, "Treating non-string ratio as 0/0");
                OpenRatio::default()
            }
            _ => OpenRatio::default(),
        })
    }
}

/// Malformed `"open/total"` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid open/total ratio: {0:?}")]
pub struct RatioError(pub String);

/// Snow conditions for one resort on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResortRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    #[serde(default = "unknown_resort")]
    pub resort: String,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub region: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub open_lifts: OpenRatio,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub open_trails: OpenRatio,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub base_depth: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub snowfall24h: Option<String>,
}

impl ResortRecord {
    /// Minimal record, mostly useful in tests and fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resort: name.into(),
            state: None,
            region: None,
            open_lifts: OpenRatio::default(),
            open_trails: OpenRatio::default(),
            base_depth: None,
            snowfall24h: None,
        }
    }

    /// Parse every member of a snapshot array, skipping members without an id.
    pub fn list_from_value(value: &serde_json::Value) -> Vec<ResortRecord> {
        let Some(items) = value.as_array() else {
            tracing::warn!("Snapshot payload is not an array");
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match ResortRecord::deserialize(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed resort record");
                    None
                }
            })
            .collect()
    }

    /// First member of a snapshot array whose `id` matches `resort_id`.
    pub fn find_in_value(value: &serde_json::Value, resort_id: &str) -> Option<ResortRecord> {
        value
            .as_array()?
            .iter()
            .find(|item| match item.get("id") {
                Some(serde_json::Value::String(id)) => id == resort_id,
                Some(serde_json::Value::Number(id)) => id.to_string() == resort_id,
                _ => false,
            })
            .and_then(|item| ResortRecord::deserialize(item).ok())
    }

    /// New snow in the last 24h, in inches. Missing or unparseable is `0`.
    pub fn new_snow_inches(&self) -> f64 {
        self.snowfall24h
            .as_deref()
            .and_then(parse_inches)
            .unwrap_or(0.0)
    }

    /// Display value with the `"N/A"` fallback the dashboard uses.
    pub fn base_depth_display(&self) -> &str {
        self.base_depth.as_deref().unwrap_or("N/A")
    }
}

/// Parse values like `"3"`, `"3.5\""`, `"12 in"` into inches.
pub fn parse_inches(raw: &str) -> Option<f64> {
    let numeric: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric.parse().ok()
}

fn unknown_resort() -> String {
    UNKNOWN_RESORT.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ratio() {
        assert_eq!(OpenRatio::parse("12/20").unwrap(), OpenRatio::new(12, 20));
        assert_eq!(OpenRatio::parse(" 3 / 4 ").unwrap(), OpenRatio::new(3, 4));
        assert_eq!(OpenRatio::parse("n/a").unwrap(), OpenRatio::new(0, 0));
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        assert!(OpenRatio::parse("N/A").is_err());
        assert!(OpenRatio::parse("12").is_err());
        assert!(OpenRatio::parse("a/b").is_err());
    }

    #[test]
    fn test_record_defaults_and_sentinels() {
        let record: ResortRecord = serde_json::from_value(json!({
            "id": 42,
            "open_lifts": "n/a",
            "open_trails": "garbage",
            "snowfall24h": "4\"",
            "unexpected": true
        }))
        .unwrap();

        assert_eq!(record.id, "42");
        assert_eq!(record.resort, "Unknown Resort");
        assert_eq!(record.open_lifts, OpenRatio::default());
        assert_eq!(record.open_trails, OpenRatio::default());
        assert_eq!(record.new_snow_inches(), 4.0);
        assert_eq!(record.base_depth_display(), "N/A");
    }

    #[test]
    fn test_record_serializes_ratios_as_strings() {
        let mut record = ResortRecord::new("vail", "Vail");
        record.open_lifts = OpenRatio::new(5, 31);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["open_lifts"], "5/31");
        assert_eq!(value["open_trails"], "0/0");
    }

    #[test]
    fn test_list_skips_records_without_id() {
        let value = json!([
            {"id": "a", "resort": "Alpha"},
            {"resort": "No Id"},
            {"id": 7, "resort": "Seven"}
        ]);
        let records = ResortRecord::list_from_value(&value);

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "7"]);
        assert!(ResortRecord::list_from_value(&json!({"error": "x"})).is_empty());
    }

    #[test]
    fn test_find_in_value_takes_first_match() {
        let value = json!([
            {"id": "x", "resort": "Other"},
            {"id": 303, "resort": "First"},
            {"id": "303", "resort": "Second"}
        ]);

        let found = ResortRecord::find_in_value(&value, "303").unwrap();
        assert_eq!(found.resort, "First");
        assert!(ResortRecord::find_in_value(&value, "404").is_none());
    }

    #[test]
    fn test_parse_inches() {
        assert_eq!(parse_inches("3.5\""), Some(3.5));
        assert_eq!(parse_inches("12 in"), Some(12.0));
        assert_eq!(parse_inches("N/A"), None);
        assert_eq!(parse_inches(""), None);
    }
}
