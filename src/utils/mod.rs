//! Utility functions for token generation, URL checking, and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`token_generator`] - Short token generation and syntax checking
//! - [`url_check`] - Syntactic validation of long URLs
//! - [`client_ip`] - Client identity extraction for rate limiting

pub mod client_ip;
pub mod token_generator;
pub mod url_check;
