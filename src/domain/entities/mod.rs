//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A long URL, its short token, and its click counter

pub mod url_record;

pub use url_record::UrlRecord;
