//! Repository implementations.
//!
//! Concrete implementations of the domain repository trait.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryUrlRepository`] - process-local maps, the fallback when no
//!   database is configured and the backing store for integration tests

pub mod in_memory_url_repository;
pub mod pg_url_repository;

pub use in_memory_url_repository::InMemoryUrlRepository;
pub use pg_url_repository::PgUrlRepository;
