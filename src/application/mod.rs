//! Application layer implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and business rules. Services consume repository traits
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Get-or-create shortening
//! - [`services::redirect_service::RedirectService`] - Token resolution with click recording
//! - [`services::analytics_service::AnalyticsService`] - Click counter lookups
//!
//! The [`rate_limiter`] module provides the fixed-window admission checks
//! enforced by the HTTP middleware.

pub mod rate_limiter;
pub mod services;
