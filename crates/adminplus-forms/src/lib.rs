//! # adminplus-forms
//!
//! Forms for modeladmin-plus: the search form shown in a grid's filter header
//! and the admin's edit form. Fields are data, not widgets; a form renders to
//! JSON for the client to draw.
//!
//! ## Modules
//!
//! - [`fields`] - [`FormField`] and its kinds, including autocomplete
//! - [`field_list`] - [`FieldList`], an ordered, name-addressable list of fields
//! - [`form`] - [`Form`]

pub mod field_list;
pub mod fields;
pub mod form;

pub use field_list::FieldList;
pub use fields::{AutoCompleteSource, FormField, FormFieldType, Suggestion};
pub use form::Form;
