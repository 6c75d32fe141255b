//! # adminplus-test
//!
//! Testing utilities for modeladmin-plus: a [`TestClient`] that drives an
//! axum router in-process and keeps cookies between requests, and fixtures
//! that build a seeded contact store.
//!
//! ## Modules
//!
//! - [`client`] - [`TestClient`] and [`TestResponse`]
//! - [`fixtures`] - A contact model and a seeded in-memory store

pub mod client;
pub mod fixtures;

pub use client::{TestClient, TestResponse};
pub use fixtures::{contact_model, contact_store, CONTACT_CLASS};
