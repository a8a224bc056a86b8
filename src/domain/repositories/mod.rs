//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interface that abstracts data access
//! following the Repository pattern, plus the store error taxonomy shared by
//! all implementations.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod url_repository;

pub use url_repository::{StoreError, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
