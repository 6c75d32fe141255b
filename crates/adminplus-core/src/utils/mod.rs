//! Utility helpers.
//!
//! - [`text`] - Class-name sanitising and label helpers

pub mod text;

pub use text::{capfirst, name_to_label, sanitise_class_name};
