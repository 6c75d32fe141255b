//! Layout rows: containers that open named regions for other components.

use std::any::Any;

use serde_json::json;

use crate::component::{Fragment, GridComponent, RenderContext};
use crate::grid_field::GridField;

/// A row of buttons. Opens the `buttons-<target>-left` and
/// `buttons-<target>-right` regions.
#[derive(Debug, Clone)]
pub struct GridFieldButtonRow {
    target_fragment: String,
}

impl GridFieldButtonRow {
    /// Creates a button row rendered into `target_fragment`.
    pub fn new(target_fragment: impl Into<String>) -> Self {
        Self {
            target_fragment: target_fragment.into(),
        }
    }
}

impl GridComponent for GridFieldButtonRow {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "ButtonRow"
    }

    fn fragments(&self, _grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        let t = &self.target_fragment;
        vec![Fragment::new(
            t.clone(),
            json!({
                "type": "buttonRow",
                "regions": [format!("buttons-{t}-left"), format!("buttons-{t}-right")],
            }),
        )]
    }
}

/// The toolbar above the column headings. Opens `toolbar-header-left` and
/// `toolbar-header-right`.
#[derive(Debug, Clone, Default)]
pub struct GridFieldToolbarHeader;

impl GridFieldToolbarHeader {
    /// Creates the toolbar header.
    pub const fn new() -> Self {
        Self
    }
}

impl GridComponent for GridFieldToolbarHeader {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "ToolbarHeader"
    }

    fn fragments(&self, grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        vec![Fragment::new(
            "header",
            json!({
                "type": "toolbarHeader",
                "title": grid.title(),
                "regions": ["toolbar-header-left", "toolbar-header-right"],
            }),
        )]
    }
}

/// A row above the button row that holds snippets. Opens `snippets-before`.
#[derive(Debug, Clone, Default)]
pub struct GridFieldSnippetRow;

impl GridFieldSnippetRow {
    /// The region snippets render into.
    pub const FRAGMENT: &'static str = "snippets-before";

    /// Creates the snippet row.
    pub const fn new() -> Self {
        Self
    }
}

impl GridComponent for GridFieldSnippetRow {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn component_name(&self) -> &'static str {
        "SnippetRow"
    }

    fn fragments(&self, _grid: &GridField, _ctx: &RenderContext) -> Vec<Fragment> {
        vec![Fragment::new(
            "before",
            json!({ "type": "snippetRow", "regions": [Self::FRAGMENT] }),
        )]
    }
}
