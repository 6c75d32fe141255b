//! Filter lookups.
//!
//! Filter keys name a field and optionally a lookup modifier separated by a
//! colon: `Name` (exact), `Name:PartialMatch`, `Age:GreaterThan`. A filter
//! value may be a scalar or an array; an array matches when any element does.

use std::cmp::Ordering;

use serde_json::Value;

use adminplus_core::{AdminError, AdminResult};

/// A field-level comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Equal, compared as text.
    Exact,
    /// Case-insensitive substring match.
    PartialMatch,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
    /// Strictly greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterThanOrEqual,
    /// Strictly less than.
    LessThan,
    /// Less than or equal.
    LessThanOrEqual,
}

impl Lookup {
    /// Parses a modifier name. The empty modifier is [`Lookup::Exact`].
    pub fn from_modifier(modifier: &str) -> Option<Self> {
        match modifier {
            "" | "Exact" | "ExactMatch" => Some(Self::Exact),
            "PartialMatch" => Some(Self::PartialMatch),
            "StartsWith" => Some(Self::StartsWith),
            "EndsWith" => Some(Self::EndsWith),
            "GreaterThan" => Some(Self::GreaterThan),
            "GreaterThanOrEqual" => Some(Self::GreaterThanOrEqual),
            "LessThan" => Some(Self::LessThan),
            "LessThanOrEqual" => Some(Self::LessThanOrEqual),
            _ => None,
        }
    }

    /// Returns the modifier name used in filter keys.
    pub const fn modifier(self) -> &'static str {
        match self {
            Self::Exact => "ExactMatch",
            Self::PartialMatch => "PartialMatch",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
        }
    }

    /// Tests a record value against a single (non-array) needle.
    pub fn matches(self, value: Option<&Value>, needle: &Value) -> bool {
        let Some(value) = value else {
            return needle.is_null() || value_to_text(needle).is_empty();
        };
        match self {
            Self::Exact => value_to_text(value) == value_to_text(needle),
            Self::PartialMatch => lower(value).contains(&lower(needle)),
            Self::StartsWith => lower(value).starts_with(&lower(needle)),
            Self::EndsWith => lower(value).ends_with(&lower(needle)),
            Self::GreaterThan => compare_values(value, needle) == Ordering::Greater,
            Self::GreaterThanOrEqual => compare_values(value, needle) != Ordering::Less,
            Self::LessThan => compare_values(value, needle) == Ordering::Less,
            Self::LessThanOrEqual => compare_values(value, needle) != Ordering::Greater,
        }
    }
}

/// A parsed filter criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// The record field.
    pub field: String,
    /// The comparison.
    pub lookup: Lookup,
    /// The value to compare against. Arrays match when any element matches.
    pub value: Value,
}

impl FilterSpec {
    /// Creates a criterion.
    pub fn new(field: impl Into<String>, lookup: Lookup, value: Value) -> Self {
        Self {
            field: field.into(),
            lookup,
            value,
        }
    }

    /// Parses a `Field[:Modifier]` key.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::BadRequest`] for an empty field name or an unknown
    /// modifier.
    pub fn parse(key: &str, value: Value) -> AdminResult<Self> {
        let (field, modifier) = key.split_once(':').unwrap_or((key, ""));
        if field.is_empty() {
            return Err(AdminError::BadRequest(format!("Invalid filter key '{key}'")));
        }
        let lookup = Lookup::from_modifier(modifier).ok_or_else(|| {
            AdminError::BadRequest(format!("Unknown filter modifier '{modifier}' in '{key}'"))
        })?;
        Ok(Self::new(field, lookup, value))
    }

    /// Returns the `Field:Modifier` key for this criterion.
    pub fn key(&self) -> String {
        if self.lookup == Lookup::Exact {
            self.field.clone()
        } else {
            format!("{}:{}", self.field, self.lookup.modifier())
        }
    }

    /// Tests a record against this criterion.
    pub fn matches(&self, record: &serde_json::Map<String, Value>) -> bool {
        let value = record.get(&self.field);
        match &self.value {
            Value::Array(needles) => needles.iter().any(|n| self.lookup.matches(value, n)),
            needle => self.lookup.matches(value, needle),
        }
    }
}

/// Renders a JSON value as the text a form would submit.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        other => other.to_string(),
    }
}

fn lower(value: &Value) -> String {
    value_to_text(value).to_lowercase()
}

/// Orders two JSON values: numerically when both read as numbers, textually otherwise.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (ta, tb) = (value_to_text(a), value_to_text(b));
    match (ta.parse::<f64>(), tb.parse::<f64>()) {
        (Ok(na), Ok(nb)) => na.partial_cmp(&nb).unwrap_or(Ordering::Equal),
        _ => ta.cmp(&tb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> serde_json::Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_plain_key() {
        let spec = FilterSpec::parse("Name", json!("Mark")).unwrap();
        assert_eq!(spec.field, "Name");
        assert_eq!(spec.lookup, Lookup::Exact);
        assert_eq!(spec.key(), "Name");
    }

    #[test]
    fn test_parse_modifier() {
        let spec = FilterSpec::parse("Name:PartialMatch", json!("ar")).unwrap();
        assert_eq!(spec.lookup, Lookup::PartialMatch);
        assert_eq!(spec.key(), "Name:PartialMatch");
    }

    #[test]
    fn test_parse_errors() {
        assert!(FilterSpec::parse(":PartialMatch", json!("x")).is_err());
        assert!(FilterSpec::parse("Name:Fuzzy", json!("x")).is_err());
    }

    #[test]
    fn test_exact_compares_text() {
        let r = record(json!({"Age": 30, "Active": true, "Name": "Mark"}));
        assert!(FilterSpec::parse("Age", json!("30")).unwrap().matches(&r));
        assert!(FilterSpec::parse("Active", json!("1")).unwrap().matches(&r));
        assert!(!FilterSpec::parse("Name", json!("mark")).unwrap().matches(&r));
    }

    #[test]
    fn test_partial_match_case_insensitive() {
        let r = record(json!({"Name": "Mark Smith"}));
        assert!(FilterSpec::parse("Name:PartialMatch", json!("SMITH")).unwrap().matches(&r));
        assert!(FilterSpec::parse("Name:StartsWith", json!("mark")).unwrap().matches(&r));
        assert!(FilterSpec::parse("Name:EndsWith", json!("ith")).unwrap().matches(&r));
    }

    #[test]
    fn test_array_value_matches_any() {
        let r = record(json!({"Status": "Open"}));
        let spec = FilterSpec::parse("Status", json!(["Closed", "Open"])).unwrap();
        assert!(spec.matches(&r));
    }

    #[test]
    fn test_comparisons() {
        let r = record(json!({"Age": 30, "Joined": "2020-05-01"}));
        assert!(FilterSpec::parse("Age:GreaterThan", json!(9)).unwrap().matches(&r));
        assert!(!FilterSpec::parse("Age:LessThan", json!("30")).unwrap().matches(&r));
        assert!(FilterSpec::parse("Age:LessThanOrEqual", json!("30")).unwrap().matches(&r));
        assert!(FilterSpec::parse("Joined:GreaterThanOrEqual", json!("2020-01-01"))
            .unwrap()
            .matches(&r));
    }

    #[test]
    fn test_missing_field() {
        let r = record(json!({}));
        assert!(FilterSpec::parse("Name", json!("")).unwrap().matches(&r));
        assert!(!FilterSpec::parse("Name", json!("Mark")).unwrap().matches(&r));
    }
}
