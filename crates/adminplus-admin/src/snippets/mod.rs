//! Snippets: small widgets rendered above a grid's button row.
//!
//! A snippet is a [`GridComponent`] with an identifier and an order. The
//! `registered_snippets` setting names the snippets to show, globally or per
//! model class; identifiers resolve through a [`SnippetRegistry`] of
//! constructors, checked once at startup by [`SnippetRegistry::validate`].

pub mod builtin;

use std::fmt;

use adminplus_core::{AdminError, AdminResult, SnippetEntry};
use adminplus_core::utils::text::sanitise_class_name;
use adminplus_grid::{GridComponent, IntoGridComponent};

pub use builtin::{ActiveFiltersSnippet, RecordCountSnippet};

/// A widget shown in the grid's snippet row.
pub trait ModelAdminSnippet: GridComponent + IntoGridComponent {
    /// The identifier the snippet is registered under.
    fn identifier(&self) -> &'static str;

    /// The fragment the snippet renders into.
    fn fragment(&self) -> &str;

    /// Snippets with a higher order are shown first.
    fn order(&self) -> i32 {
        0
    }
}

/// Creates a snippet that renders into the given fragment.
pub type SnippetConstructor = fn(&str) -> Box<dyn ModelAdminSnippet>;

/// Snippet constructors by identifier.
#[derive(Clone)]
pub struct SnippetRegistry {
    entries: Vec<(&'static str, SnippetConstructor)>,
}

impl SnippetRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry holding the built-in snippets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register(RecordCountSnippet::IDENTIFIER, RecordCountSnippet::create)
            .register(ActiveFiltersSnippet::IDENTIFIER, ActiveFiltersSnippet::create);
        registry
    }

    /// Registers a constructor, replacing one with the same identifier.
    pub fn register(&mut self, identifier: &'static str, constructor: SnippetConstructor) -> &mut Self {
        match self.entries.iter_mut().find(|(id, _)| *id == identifier) {
            Some(entry) => entry.1 = constructor,
            None => self.entries.push((identifier, constructor)),
        }
        self
    }

    /// Returns whether an identifier is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.iter().any(|(id, _)| *id == identifier)
    }

    /// Returns the registered identifiers, in registration order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(id, _)| *id).collect()
    }

    /// Creates a snippet.
    pub fn create(&self, identifier: &str, fragment: &str) -> AdminResult<Box<dyn ModelAdminSnippet>> {
        self.entries
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, construct)| construct(fragment))
            .ok_or_else(|| unknown_snippet(identifier))
    }

    /// Checks that every configured identifier is registered.
    pub fn validate(&self, entries: &[SnippetEntry]) -> AdminResult<()> {
        for entry in entries {
            let identifiers: &[String] = match entry {
                SnippetEntry::Global(id) => std::slice::from_ref(id),
                SnippetEntry::Scoped { snippets, .. } => snippets,
            };
            if let Some(missing) = identifiers.iter().find(|id| !self.contains(id)) {
                return Err(unknown_snippet(missing));
            }
        }
        Ok(())
    }

    /// Creates the snippets configured for a model class, highest order
    /// first. Snippets of equal order keep their configured order.
    pub fn build(
        &self,
        entries: &[SnippetEntry],
        model_class: &str,
        fragment: &str,
    ) -> AdminResult<Vec<Box<dyn ModelAdminSnippet>>> {
        let mut snippets = applicable_snippets(entries, model_class)
            .into_iter()
            .map(|id| self.create(id, fragment))
            .collect::<AdminResult<Vec<_>>>()?;
        snippets.sort_by_key(|s| std::cmp::Reverse(s.order()));
        tracing::debug!(
            model = model_class,
            snippets = ?snippets.iter().map(|s| s.identifier()).collect::<Vec<_>>(),
            "resolved snippets"
        );
        Ok(snippets)
    }
}

impl Default for SnippetRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for SnippetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnippetRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

/// Returns the identifiers that apply to a model class, in configured order.
/// A scoped entry applies when its model matches the class name, either
/// verbatim or sanitised.
pub fn applicable_snippets<'a>(entries: &'a [SnippetEntry], model_class: &str) -> Vec<&'a str> {
    let sanitised = sanitise_class_name(model_class);
    let mut identifiers = Vec::new();
    for entry in entries {
        match entry {
            SnippetEntry::Global(id) => identifiers.push(id.as_str()),
            SnippetEntry::Scoped { model, snippets } => {
                if model == model_class || sanitise_class_name(model) == sanitised {
                    identifiers.extend(snippets.iter().map(String::as_str));
                }
            }
        }
    }
    identifiers
}

fn unknown_snippet(identifier: &str) -> AdminError {
    AdminError::ImproperlyConfigured(format!("unknown snippet '{identifier}'"))
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use adminplus_grid::GridFieldSnippetRow;

    #[derive(Debug)]
    struct Ranked {
        fragment: String,
    }

    impl GridComponent for Ranked {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn component_name(&self) -> &'static str {
            "Ranked"
        }
    }

    impl ModelAdminSnippet for Ranked {
        fn identifier(&self) -> &'static str {
            "ranked"
        }

        fn fragment(&self) -> &str {
            &self.fragment
        }

        fn order(&self) -> i32 {
            100
        }
    }

    fn ranked(fragment: &str) -> Box<dyn ModelAdminSnippet> {
        Box::new(Ranked {
            fragment: fragment.to_string(),
        })
    }

    fn entries() -> Vec<SnippetEntry> {
        vec![
            SnippetEntry::Global("active-filters".into()),
            SnippetEntry::Global("record-count".into()),
            SnippetEntry::Scoped {
                model: "app::Contact".into(),
                snippets: vec!["ranked".into()],
            },
        ]
    }

    #[test]
    fn test_builtins_registered() {
        let registry = SnippetRegistry::default();
        assert_eq!(registry.identifiers(), vec!["record-count", "active-filters"]);
    }

    #[test]
    fn test_validate() {
        let mut registry = SnippetRegistry::with_builtins();
        assert!(matches!(
            registry.validate(&entries()),
            Err(AdminError::ImproperlyConfigured(msg)) if msg.contains("ranked")
        ));
        registry.register("ranked", ranked);
        assert!(registry.validate(&entries()).is_ok());
    }

    #[test]
    fn test_applicable_snippets_scoping() {
        let entries = entries();
        assert_eq!(
            applicable_snippets(&entries, "app::Contact"),
            vec!["active-filters", "record-count", "ranked"]
        );
        assert_eq!(
            applicable_snippets(&entries, "app-Contact"),
            vec!["active-filters", "record-count", "ranked"]
        );
        assert_eq!(
            applicable_snippets(&entries, "app::Company"),
            vec!["active-filters", "record-count"]
        );
    }

    #[test]
    fn test_build_sorts_descending_and_stable() {
        let mut registry = SnippetRegistry::with_builtins();
        registry.register("ranked", ranked);
        let snippets = registry
            .build(&entries(), "app::Contact", GridFieldSnippetRow::FRAGMENT)
            .unwrap();
        let ids: Vec<_> = snippets.iter().map(|s| s.identifier()).collect();
        assert_eq!(ids, vec!["ranked", "record-count", "active-filters"]);
        assert!(snippets.iter().all(|s| s.fragment() == "snippets-before"));
    }

    #[test]
    fn test_build_unknown_fails() {
        let registry = SnippetRegistry::new();
        assert!(registry.build(&entries(), "app::Company", "x").is_err());
    }
}
