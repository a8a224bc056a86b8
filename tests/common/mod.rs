#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ConnectInfo;
use minilink::application::rate_limiter::{RateLimiter, RatePolicies, RatePolicy};
use minilink::application::services::{AnalyticsService, RedirectService, ShortenerService};
use minilink::domain::repositories::UrlRepository;
use minilink::infrastructure::persistence::InMemoryUrlRepository;
use minilink::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// The default production policies.
pub fn default_policies() -> RatePolicies {
    RatePolicies {
        global: RatePolicy::new("global", 100, Duration::from_secs(900)),
        shorten: RatePolicy::new("shorten", 10, Duration::from_secs(600)),
    }
}

/// Quotas high enough that functional tests never trip the limiter.
pub fn generous_policies() -> RatePolicies {
    RatePolicies {
        global: RatePolicy::new("global", 100_000, Duration::from_secs(900)),
        shorten: RatePolicy::new("shorten", 100_000, Duration::from_secs(600)),
    }
}

pub fn create_test_state() -> AppState {
    create_test_state_with(generous_policies(), false)
}

pub fn create_test_state_with(rate_policies: RatePolicies, behind_proxy: bool) -> AppState {
    let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());

    AppState {
        shortener: Arc::new(ShortenerService::new(
            Arc::clone(&repository),
            TEST_BASE_URL,
        )),
        redirector: Arc::new(RedirectService::new(Arc::clone(&repository))),
        analytics: Arc::new(AnalyticsService::new(repository)),
        limiter: Arc::new(RateLimiter::new()),
        rate_policies,
        behind_proxy,
    }
}

/// Injects a fixed peer address, standing in for what
/// `into_make_service_with_connect_info` provides in production.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
