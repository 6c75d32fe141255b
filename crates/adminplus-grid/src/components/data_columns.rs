//! Data columns: one column per displayed model field.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use adminplus_db::Record;

use crate::component::GridComponent;
use crate::grid_field::GridField;

/// A custom cell formatter: receives the raw value and the whole record.
pub type CellFormatter = Arc<dyn Fn(&Value, &Record) -> Value + Send + Sync>;

/// How a column's raw value is turned into cell content.
#[derive(Clone)]
pub enum ColumnFormatter {
    /// Parses a stored date or datetime and renders it with a `chrono` format.
    /// Values that do not parse are shown unchanged.
    ShortDate {
        /// The `chrono` format string.
        format: String,
    },
    /// An arbitrary formatter.
    Custom(CellFormatter),
}

impl ColumnFormatter {
    /// Formats one value.
    pub fn format(&self, value: &Value, record: &Record) -> Value {
        match self {
            Self::ShortDate { format } => value
                .as_str()
                .and_then(parse_stored_date)
                .map_or_else(|| value.clone(), |dt| Value::from(dt.format(format).to_string())),
            Self::Custom(f) => f(value, record),
        }
    }
}

impl fmt::Debug for ColumnFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortDate { format } => f.debug_struct("ShortDate").field("format", format).finish(),
            Self::Custom(_) => f.debug_tuple("Custom").finish(),
        }
    }
}

/// Parses the storage formats of date and datetime fields.
fn parse_stored_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Shows model fields as columns.
///
/// Without explicit display fields the model's summary fields are shown.
#[derive(Debug, Clone, Default)]
pub struct GridFieldDataColumns {
    display_fields: Option<Vec<(String, String)>>,
    field_formatting: HashMap<String, ColumnFormatter>,
}

impl GridFieldDataColumns {
    /// Creates the component with the model's summary fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the displayed `(field, label)` pairs.
    pub fn set_display_fields(&mut self, fields: Vec<(String, String)>) {
        self.display_fields = Some(fields);
    }

    /// Returns the displayed `(field, label)` pairs for a grid.
    pub fn get_display_fields(&self, grid: &GridField) -> Vec<(String, String)> {
        self.display_fields
            .clone()
            .unwrap_or_else(|| grid.model().summary_field_labels())
    }

    /// Sets the formatter of one field.
    pub fn set_field_formatting(&mut self, field: impl Into<String>, formatter: ColumnFormatter) {
        self.field_formatting.insert(field.into(), formatter);
    }

    /// Returns the formatter of one field.
    pub fn field_formatting(&self, field: &str) -> Option<&ColumnFormatter> {
        self.field_formatting.get(field)
    }
}

impl GridComponent for GridFieldDataColumns {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "DataColumns"
    }

    fn augment_columns(&self, grid: &GridField, columns: &mut Vec<String>) {
        columns.extend(self.get_display_fields(grid).into_iter().map(|(name, _)| name));
    }

    fn column_label(&self, grid: &GridField, column: &str) -> Option<String> {
        self.get_display_fields(grid)
            .into_iter()
            .find(|(name, _)| name == column)
            .map(|(_, label)| label)
    }

    fn column_content(&self, grid: &GridField, record: &Record, column: &str) -> Option<Value> {
        if !self.get_display_fields(grid).iter().any(|(name, _)| name == column) {
            return None;
        }
        let raw = record.get(column).cloned().unwrap_or(Value::Null);
        Some(match self.field_formatting.get(column) {
            Some(formatter) => formatter.format(&raw, record),
            None => raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        json!({"Born": "1990-07-04", "Seen": "2024-03-01 18:30:00", "Bad": "soon"})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_short_date_formats() {
        let date = ColumnFormatter::ShortDate { format: "%d/%m/%Y".into() };
        let r = record();
        assert_eq!(date.format(&r["Born"], &r), json!("04/07/1990"));
        assert_eq!(date.format(&r["Seen"], &r), json!("01/03/2024"));
        assert_eq!(date.format(&r["Bad"], &r), json!("soon"));
        assert_eq!(date.format(&Value::Null, &r), Value::Null);
    }

    #[test]
    fn test_rfc3339() {
        let formatter = ColumnFormatter::ShortDate { format: "%d/%m/%Y %H:%M".into() };
        let r = record();
        assert_eq!(
            formatter.format(&json!("2024-03-01T18:30:00+00:00"), &r),
            json!("01/03/2024 18:30")
        );
    }

    #[test]
    fn test_custom_formatter() {
        let upper = ColumnFormatter::Custom(Arc::new(|v: &Value, _: &Record| {
            Value::from(v.as_str().unwrap_or_default().to_uppercase())
        }));
        let r = record();
        assert_eq!(upper.format(&r["Bad"], &r), json!("SOON"));
        assert!(format!("{upper:?}").contains("Custom"));
    }
}
