//! An ordered list of form fields addressable by name.

use crate::fields::FormField;

/// An ordered list of form fields.
#[derive(Debug, Clone, Default)]
pub struct FieldList {
    fields: Vec<FormField>,
}

impl FieldList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field, replacing any field with the same name in place.
    pub fn push(&mut self, field: FormField) {
        if let Some(existing) = self.field_by_name_mut(&field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    /// Inserts a field before the named field, or appends it when that field
    /// does not exist.
    pub fn insert_before(&mut self, before: &str, field: FormField) {
        self.remove_by_name(&field.name);
        match self.fields.iter().position(|f| f.name == before) {
            Some(index) => self.fields.insert(index, field),
            None => self.fields.push(field),
        }
    }

    /// Replaces the named field, returning `false` when it does not exist.
    pub fn replace(&mut self, name: &str, field: FormField) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(slot) => {
                *slot = field;
                true
            }
            None => false,
        }
    }

    /// Removes the named field and returns it.
    pub fn remove_by_name(&mut self, name: &str) -> Option<FormField> {
        let index = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(index))
    }

    /// Looks up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by name, mutably.
    pub fn field_by_name_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Returns the field names in order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Iterates over the fields.
    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.fields.iter()
    }

    /// Iterates mutably over the fields.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FormField> {
        self.fields.iter_mut()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FormField> for FieldList {
    fn from_iter<T: IntoIterator<Item = FormField>>(iter: T) -> Self {
        let mut list = Self::new();
        for field in iter {
            list.push(field);
        }
        list
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
