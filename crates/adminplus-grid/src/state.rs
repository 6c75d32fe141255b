//! Grid state.
//!
//! The client keeps a grid's state (filter columns, sort, page) as a JSON
//! document and sends it back in the `gridState-<grid name>-0` parameter.
//! The document is keyed by component, then by setting:
//!
//! ```json
//! {
//!   "GridFieldFilterHeader": { "Columns": { "Surname": "Smith" } },
//!   "GridFieldSortableHeader": { "SortColumn": "Surname", "SortDirection": "desc" },
//!   "GridFieldPaginator": { "currentPage": 2, "itemsPerPage": 30 }
//! }
//! ```

use serde_json::{Map, Value};

use adminplus_db::lookup::value_to_text;
use adminplus_http::QueryDict;

const FILTER_HEADER: &str = "GridFieldFilterHeader";
const SORTABLE_HEADER: &str = "GridFieldSortableHeader";
const PAGINATOR: &str = "GridFieldPaginator";

/// The state of one grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    data: Map<String, Value>,
}

impl GridState {
    /// Returns the request parameter that carries the state of the named grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use adminplus_grid::GridState;
    ///
    /// assert_eq!(GridState::state_key("app-Contact"), "gridState-app-Contact-0");
    /// ```
    pub fn state_key(grid_name: &str) -> String {
        format!("gridState-{grid_name}-0")
    }

    /// Parses a state document. Anything but a JSON object yields an empty state.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(data)) => Self { data },
            Ok(_) | Err(_) => {
                tracing::debug!(raw, "ignoring malformed grid state");
                Self::default()
            }
        }
    }

    /// Reads the named grid's state from request parameters.
    pub fn from_vars(grid_name: &str, vars: &QueryDict) -> Self {
        vars.get(&Self::state_key(grid_name))
            .map(Self::from_json)
            .unwrap_or_default()
    }

    /// Returns a component setting.
    pub fn get(&self, component: &str, key: &str) -> Option<&Value> {
        self.data.get(component)?.get(key)
    }

    /// Sets a component setting.
    pub fn set(&mut self, component: &str, key: &str, value: Value) {
        let entry = self
            .data
            .entry(component.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), value);
        }
    }

    /// Returns the filter header's non-empty filter columns.
    pub fn filter_columns(&self) -> Map<String, Value> {
        match self.get(FILTER_HEADER, "Columns") {
            Some(Value::Object(columns)) => columns
                .iter()
                .filter(|(_, v)| !value_to_text(v).is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => Map::new(),
        }
    }

    /// Replaces the filter header's filter columns.
    pub fn set_filter_columns(&mut self, columns: Map<String, Value>) {
        self.set(FILTER_HEADER, "Columns", Value::Object(columns));
    }

    /// Returns the sort column and whether it sorts descending.
    pub fn sort(&self) -> Option<(String, bool)> {
        let column = self.get(SORTABLE_HEADER, "SortColumn")?.as_str()?;
        if column.is_empty() {
            return None;
        }
        let descending = self
            .get(SORTABLE_HEADER, "SortDirection")
            .and_then(Value::as_str)
            .is_some_and(|d| d.eq_ignore_ascii_case("desc"));
        Some((column.to_string(), descending))
    }

    /// Sets the sort column.
    pub fn set_sort(&mut self, column: &str, descending: bool) {
        self.set(SORTABLE_HEADER, "SortColumn", Value::from(column));
        self.set(
            SORTABLE_HEADER,
            "SortDirection",
            Value::from(if descending { "desc" } else { "asc" }),
        );
    }

    /// Returns the current page, counting from 1.
    pub fn current_page(&self) -> usize {
        self.get(PAGINATOR, "currentPage")
            .and_then(|v| value_to_text(v).parse::<usize>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Sets the current page.
    pub fn set_current_page(&mut self, page: usize) {
        self.set(PAGINATOR, "currentPage", Value::from(page));
    }

    /// Returns the page size the user picked, if any.
    pub fn items_per_page(&self) -> Option<usize> {
        self.get(PAGINATOR, "itemsPerPage")
            .and_then(|v| value_to_text(v).parse::<usize>().ok())
            .filter(|n| *n > 0)
    }

    /// Returns the state as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Returns `true` if no setting is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
