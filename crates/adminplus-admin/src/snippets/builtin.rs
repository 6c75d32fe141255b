//! Built-in snippets.

use std::any::Any;

use serde_json::{json, Value};

use adminplus_grid::{Fragment, GridComponent, GridField, RenderContext};

use super::ModelAdminSnippet;

/// Shows how many records the current search matches.
#[derive(Debug, Clone)]
pub struct RecordCountSnippet {
    fragment: String,
}

impl RecordCountSnippet {
    /// The registry identifier.
    pub const IDENTIFIER: &'static str = "record-count";

    /// Creates the snippet in `fragment`.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    /// Registry constructor.
    pub fn create(fragment: &str) -> Box<dyn ModelAdminSnippet> {
        Box::new(Self::new(fragment))
    }
}

impl GridComponent for RecordCountSnippet {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "RecordCountSnippet"
    }

    fn fragments(&self, _grid: &GridField, ctx: &RenderContext) -> Vec<Fragment> {
        let count = ctx.total_items;
        let text = if count == 1 {
            "1 record".to_string()
        } else {
            format!("{count} records")
        };
        vec![Fragment::new(
            self.fragment.clone(),
            json!({ "type": "snippet", "snippet": Self::IDENTIFIER, "count": count, "text": text }),
        )]
    }
}

impl ModelAdminSnippet for RecordCountSnippet {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn fragment(&self) -> &str {
        &self.fragment
    }

    fn order(&self) -> i32 {
        10
    }
}

/// Lists the criteria the grid is currently filtered by, with a link that
/// clears the stored search. Renders nothing when no criteria apply.
#[derive(Debug, Clone)]
pub struct ActiveFiltersSnippet {
    fragment: String,
}

impl ActiveFiltersSnippet {
    /// The registry identifier.
    pub const IDENTIFIER: &'static str = "active-filters";

    /// Creates the snippet in `fragment`.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    /// Registry constructor.
    pub fn create(fragment: &str) -> Box<dyn ModelAdminSnippet> {
        Box::new(Self::new(fragment))
    }
}

impl GridComponent for ActiveFiltersSnippet {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "ActiveFiltersSnippet"
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let filters: Vec<Value> = grid
            .state()
            .filter_columns()
            .into_iter()
            .map(|(field, value)| {
                json!({ "field": field, "label": grid.model().field_label(&field), "value": value })
            })
            .collect();
        if filters.is_empty() {
            return Vec::new();
        }
        vec![Fragment::new(
            self.fragment.clone(),
            json!({
                "type": "snippet",
                "snippet": Self::IDENTIFIER,
                "filters": filters,
                "clearUrl": format!("{}?clear=1", grid.link("")),
            }),
        )]
    }
}

impl ModelAdminSnippet for ActiveFiltersSnippet {
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    fn fragment(&self) -> &str {
        &self.fragment
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use adminplus_db::{DataList, FieldType, ModelClass};
    use adminplus_forms::Form;
    use adminplus_grid::{GridFieldConfig, GridFieldFilterHeader};

    fn grid() -> GridField {
        let model = Arc::new(ModelClass::new("app::Contact").field("Surname", FieldType::Varchar));
        let records = (1..=3)
            .filter_map(|i| json!({"ID": i, "Surname": format!("S{i}")}).as_object().cloned())
            .collect();
        let mut config = GridFieldConfig::new();
        config
            .add_component(GridFieldFilterHeader::new())
            .add_component(RecordCountSnippet::new("snippets-before"))
            .add_component(ActiveFiltersSnippet::new("snippets-before"));
        let mut grid = GridField::new("app-Contact", "Contacts", DataList::new(model, records), config);
        grid.set_form(&Form::new("EditForm", "/admin/contacts/app-Contact"));
        grid
    }

    #[test]
    fn test_record_count() {
        let rendered = grid().render().unwrap();
        let snippets = rendered["fragments"]["snippets-before"].as_array().unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0]["count"], 3);
        assert_eq!(snippets[0]["text"], "3 records");
    }

    #[test]
    fn test_active_filters() {
        let mut grid = grid();
        let criteria = json!({"Surname": "S2", "Email": ""});
        grid.state_mut()
            .set_filter_columns(criteria.as_object().cloned().unwrap());
        let rendered = grid.render().unwrap();
        let snippets = rendered["fragments"]["snippets-before"].as_array().unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[1]["filters"][0]["field"], "Surname");
        assert_eq!(snippets[1]["clearUrl"], "/admin/contacts/app-Contact?clear=1");
        assert_eq!(snippets[0]["text"], "1 record");
    }
}
