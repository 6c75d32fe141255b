//! Query string dictionary for HTTP request parameters.
//!
//! [`QueryDict`] keeps the submitted `key=value` pairs in order and supports
//! several values per key. Form libraries submit nested data with bracketed
//! keys (`filter[Name]=Mark`); [`QueryDict::contains_root`] and
//! [`QueryDict::nested`] understand that convention.

use std::collections::HashMap;

/// An ordered, multi-value dictionary for query string and form data.
///
/// # Examples
///
/// ```
/// use adminplus_http::QueryDict;
///
/// let qd = QueryDict::parse("filter%5BName%5D=Mark&page=2&page=3");
/// assert_eq!(qd.get("page"), Some("3"));
/// assert_eq!(qd.get_list("page"), vec!["2", "3"]);
/// assert!(qd.contains_root("filter"));
/// assert_eq!(qd.nested("filter").get("Name").map(String::as_str), Some("Mark"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDict {
    pairs: Vec<(String, String)>,
}

impl QueryDict {
    /// Creates a new, empty `QueryDict`.
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parses a URL query string or form-encoded body into a `QueryDict`.
    ///
    /// Handles percent-encoding and `+` for spaces.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        let pairs = url::form_urlencoded::parse(query_string.as_bytes())
            .into_owned()
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { pairs }
    }

    /// Builds a `QueryDict` from explicit pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the last value for the given key, or `None` if not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all values for the given key, in submission order.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns `true` if the exact key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns `true` if the key is present either plainly or as the root of
    /// a bracketed key (`root[...]`).
    pub fn contains_root(&self, root: &str) -> bool {
        self.pairs.iter().any(|(k, _)| root_of(k) == root)
    }

    /// Collects the values submitted under `root[<name>]` (and `root[<name>][]`)
    /// into a map keyed by `<name>`. The last value wins.
    pub fn nested(&self, root: &str) -> HashMap<String, String> {
        let prefix = format!("{root}[");
        self.pairs
            .iter()
            .filter_map(|(k, v)| {
                let rest = k.strip_prefix(&prefix)?;
                let (name, _) = rest.split_once(']')?;
                (!name.is_empty()).then(|| (name.to_string(), v.clone()))
            })
            .collect()
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Sets a single value for the given key, replacing any existing values.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Removes every value for the given key, returning whether any existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() < before
    }

    /// Returns a copy without the given key.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.remove(key);
        copy
    }

    /// Returns the distinct root keys, in first-seen order.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for (k, _) in &self.pairs {
            let root = root_of(k);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots
    }

    /// Returns the number of distinct root keys.
    pub fn len(&self) -> usize {
        self.roots().len()
    }

    /// Returns `true` if no parameters were submitted.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over all `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the dictionary back into a query string.
    pub fn urlencode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Returns the part of a key before its first `[`.
fn root_of(key: &str) -> &str {
    key.split_once('[').map_or(key, |(root, _)| root)
}
