use std::sync::Arc;

use crate::application::rate_limiter::{RateLimiter, RatePolicies};
use crate::application::services::{AnalyticsService, RedirectService, ShortenerService};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;

/// Shared state handed to every handler and middleware.
///
/// The rate limiter counters are the only mutable state in here; everything
/// else is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub redirector: Arc<RedirectService>,
    pub analytics: Arc<AnalyticsService>,
    pub limiter: Arc<RateLimiter>,
    pub rate_policies: RatePolicies,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(repository: Arc<dyn UrlRepository>, config: &Config) -> Self {
        Self {
            shortener: Arc::new(ShortenerService::new(
                Arc::clone(&repository),
                &config.base_url,
            )),
            redirector: Arc::new(RedirectService::new(Arc::clone(&repository))),
            analytics: Arc::new(AnalyticsService::new(repository)),
            limiter: Arc::new(RateLimiter::new()),
            rate_policies: config.rate_policies(),
            behind_proxy: config.behind_proxy,
        }
    }
}
