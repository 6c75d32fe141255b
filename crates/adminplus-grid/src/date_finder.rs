//! Short-date formatting for date columns.

use adminplus_db::FieldType;

use crate::components::{ColumnFormatter, GridFieldDataColumns};
use crate::grid_field::GridField;

/// Finds the date and datetime columns of a grid and formats them as short
/// dates.
#[derive(Debug)]
pub struct GridFieldDateFinder<'a> {
    grid: &'a mut GridField,
}

impl<'a> GridFieldDateFinder<'a> {
    /// Wraps a grid.
    pub fn new(grid: &'a mut GridField) -> Self {
        Self { grid }
    }

    /// Returns the displayed columns backed by date or datetime fields.
    pub fn date_columns(&self) -> Vec<(String, FieldType)> {
        let Some(columns) = self.grid.get_config().get_component_by_type::<GridFieldDataColumns>()
        else {
            return Vec::new();
        };
        let model = self.grid.model();
        columns
            .get_display_fields(self.grid)
            .into_iter()
            .filter_map(|(name, _)| {
                let field_type = model.field_type(&name)?;
                field_type.is_date_like().then(|| (name, field_type.clone()))
            })
            .collect()
    }

    /// Formats date columns with `date_format` and datetime columns with
    /// `datetime_format`. Returns the number of columns converted; zero when
    /// the grid has no data columns.
    pub fn convert_date_fields(&mut self, date_format: &str, datetime_format: &str) -> usize {
        let date_columns = self.date_columns();
        let Some(columns) = self
            .grid
            .get_config_mut()
            .get_component_by_type_mut::<GridFieldDataColumns>()
        else {
            return 0;
        };

        for (name, field_type) in &date_columns {
            let format = match field_type {
                FieldType::Datetime => datetime_format,
                _ => date_format,
            };
            columns.set_field_formatting(
                name.clone(),
                ColumnFormatter::ShortDate {
                    format: format.to_string(),
                },
            );
        }
        tracing::debug!(columns = date_columns.len(), "converted date columns");
        date_columns.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::GridFieldConfig;
    use adminplus_db::{DataList, ModelClass};
    use serde_json::json;

    fn grid(config: GridFieldConfig) -> GridField {
        let model = Arc::new(
            ModelClass::new("app::Contact")
                .field("Surname", FieldType::Varchar)
                .field("Born", FieldType::Date)
                .field("LastSeen", FieldType::Datetime),
        );
        let records = vec![json!({
            "ID": 1, "Surname": "Smith", "Born": "1990-07-04", "LastSeen": "2024-03-01 18:30:00"
        })
        .as_object()
        .cloned()
        .unwrap()];
        GridField::new("app-Contact", "Contacts", DataList::new(model, records), config)
    }

    #[test]
    fn test_converts_date_columns() {
        let mut grid = grid(GridFieldConfig::record_editor(15));
        let converted = GridFieldDateFinder::new(&mut grid).convert_date_fields("%d/%m/%Y", "%d/%m/%Y %H:%M");
        assert_eq!(converted, 2);

        let rendered = grid.render().unwrap();
        let cells = &rendered["rows"][0]["cells"];
        assert_eq!(cells["Born"], "04/07/1990");
        assert_eq!(cells["LastSeen"], "01/03/2024 18:30");
        assert_eq!(cells["Surname"], "Smith");
    }

    #[test]
    fn test_untouched_without_conversion() {
        let grid = grid(GridFieldConfig::record_editor(15));
        let rendered = grid.render().unwrap();
        assert_eq!(rendered["rows"][0]["cells"]["Born"], "1990-07-04");
    }

    #[test]
    fn test_no_data_columns() {
        let mut grid = grid(GridFieldConfig::new());
        let mut finder = GridFieldDateFinder::new(&mut grid);
        assert!(finder.date_columns().is_empty());
        assert_eq!(finder.convert_date_fields("%d/%m/%Y", "%d/%m/%Y %H:%M"), 0);
    }
}
