//! Extension hooks.
//!
//! A [`Hook`] is an ordered list of named callbacks that receive `&mut` of a
//! value under construction. [`AdminExtensions`] holds the hooks the admin
//! runs: after assembling snippets, after resolving export fields, and after
//! building the filter header's search context and search form.
//!
//! ```
//! use std::sync::Arc;
//! use adminplus_admin::extensions::Hook;
//!
//! let mut hook: Hook<Vec<String>> = Hook::new();
//! hook.connect("append", Arc::new(|v: &mut Vec<String>| v.push("b".into())));
//!
//! let mut value = vec!["a".to_string()];
//! hook.run(&mut value);
//! assert_eq!(value, vec!["a", "b"]);
//! ```

use std::fmt;
use std::sync::Arc;

use adminplus_forms::Form;
use adminplus_grid::SearchContext;

use crate::snippets::ModelAdminSnippet;

/// A hook callback.
pub type HookCallback<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// Ordered callbacks run against a value.
pub struct Hook<T: ?Sized> {
    callbacks: Vec<(String, HookCallback<T>)>,
}

impl<T: ?Sized> Hook<T> {
    /// Creates a hook with no callbacks.
    pub const fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Connects a callback. A callback with the same ID is replaced in place.
    pub fn connect(&mut self, id: impl Into<String>, callback: HookCallback<T>) -> &mut Self {
        let id = id.into();
        if let Some(entry) = self.callbacks.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = callback;
        } else {
            self.callbacks.push((id, callback));
        }
        self
    }

    /// Disconnects a callback. Returns whether it was connected.
    pub fn disconnect(&mut self, id: &str) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| existing != id);
        self.callbacks.len() < before
    }

    /// Runs every callback in connection order.
    pub fn run(&self, value: &mut T) {
        for (_, callback) in &self.callbacks {
            callback(value);
        }
    }

    /// Returns the number of connected callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns `true` when no callback is connected.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T: ?Sized> Default for Hook<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Hook<T> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.callbacks.iter().map(|(id, _)| id))
            .finish()
    }
}

/// The hooks an admin runs while building a request's grid.
#[derive(Debug, Clone, Default)]
pub struct AdminExtensions {
    /// Runs after the snippets are created and sorted.
    pub update_snippets: Hook<Vec<Box<dyn ModelAdminSnippet>>>,
    /// Runs after the export `(field, label)` columns are resolved.
    pub update_export_fields: Hook<Vec<(String, String)>>,
    /// Runs after the filter header builds its search context.
    pub update_search_context: Hook<SearchContext>,
    /// Runs after the filter header builds its search form.
    pub update_search_form: Hook<Form>,
}

impl AdminExtensions {
    /// Creates an empty set of hooks.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_order() {
        let mut hook: Hook<Vec<u32>> = Hook::new();
        hook.connect("one", Arc::new(|v: &mut Vec<u32>| v.push(1)));
        hook.connect("two", Arc::new(|v: &mut Vec<u32>| v.push(2)));
        let mut value = Vec::new();
        hook.run(&mut value);
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn test_connect_replaces_same_id() {
        let mut hook: Hook<Vec<u32>> = Hook::new();
        hook.connect("a", Arc::new(|v: &mut Vec<u32>| v.push(1)));
        hook.connect("b", Arc::new(|v: &mut Vec<u32>| v.push(2)));
        hook.connect("a", Arc::new(|v: &mut Vec<u32>| v.push(3)));
        assert_eq!(hook.len(), 2);
        let mut value = Vec::new();
        hook.run(&mut value);
        assert_eq!(value, vec![3, 2]);
    }

    #[test]
    fn test_disconnect() {
        let mut hook: Hook<String> = Hook::new();
        hook.connect("upper", Arc::new(|s: &mut String| *s = s.to_uppercase()));
        assert!(hook.disconnect("upper"));
        assert!(!hook.disconnect("upper"));
        assert!(hook.is_empty());
        let mut value = "x".to_string();
        hook.run(&mut value);
        assert_eq!(value, "x");
    }

    #[test]
    fn test_debug_lists_ids() {
        let mut extensions = AdminExtensions::new();
        extensions
            .update_export_fields
            .connect("drop-email", Arc::new(|f: &mut Vec<(String, String)>| f.retain(|(n, _)| n != "Email")));
        assert!(format!("{extensions:?}").contains("drop-email"));
    }
}
