// ABOUTME: Rate limiting engine for API request throttling and abuse prevention
// ABOUTME: Implements fixed-window per-client limits with tiered policies and HTTP headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # Unified Rate Limiting System
//!
//! Fixed-window request limiting keyed by client IP. Each protected route
//! group gets its own [`RateLimiter`] tier; all tiers stamp standard
//! `X-RateLimit-*` headers on their responses and reject with `429` plus
//! `Retry-After` once a window is exhausted.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::errors::AppError;
use crate::logging::AppLogger;

/// HTTP header names for rate limiting
pub mod headers {
    /// Maximum requests allowed in the current window
    pub const X_RATE_LIMIT_LIMIT: &str = "X-RateLimit-Limit";
    /// Requests remaining in the current window
    pub const X_RATE_LIMIT_REMAINING: &str = "X-RateLimit-Remaining";
    /// Unix timestamp when the current window resets
    pub const X_RATE_LIMIT_RESET: &str = "X-RateLimit-Reset";
    /// Seconds to wait before retrying, sent with 429 responses
    pub const RETRY_AFTER: &str = "Retry-After";
}

// Tier policies. Windows are fixed, not sliding: the first request from a
// client opens a window, and the count resets when it expires.
const GENERAL_MAX_REQUESTS: u32 = 100;
const AI_MAX_REQUESTS: u32 = 20;
const AUTH_MAX_REQUESTS: u32 = 5;
const CREATE_MAX_REQUESTS: u32 = 30;
const DEFAULT_WINDOW_SECS: i64 = 15 * 60;
const CREATE_WINDOW_SECS: i64 = 5 * 60;

/// Which responses count against the client's window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// Every request counts
    All,
    /// Requests answered with 4xx/5xx are refunded
    SkipFailed,
    /// Requests answered below 400 are refunded; only failures count
    SkipSuccessful,
}

/// Rate limit snapshot for one client at one request
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the window
    pub limit: u32,
    /// Remaining requests in the window
    pub remaining: u32,
    /// When the current window resets
    pub reset_at: DateTime<Utc>,
}

/// Outcome of registering one request against a limiter
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Header values describing the window state after this request
    pub info: RateLimitInfo,
}

#[derive(Debug)]
struct WindowState {
    window_start: DateTime<Utc>,
    count: u32,
}

/// Fixed-window per-client request limiter for one route tier
pub struct RateLimiter {
    tier: &'static str,
    max_requests: u32,
    window: Duration,
    mode: CountMode,
    windows: DashMap<String, WindowState>,
}

impl RateLimiter {
    /// Creates a limiter with an explicit policy
    #[must_use]
    pub fn new(tier: &'static str, max_requests: u32, window: Duration, mode: CountMode) -> Self {
        Self {
            tier,
            max_requests,
            window,
            mode,
            windows: DashMap::new(),
        }
    }

    /// Baseline tier for the whole API: 100 requests per 15 minutes
    #[must_use]
    pub fn general() -> Self {
        Self::new(
            "general",
            GENERAL_MAX_REQUESTS,
            Duration::seconds(DEFAULT_WINDOW_SECS),
            CountMode::All,
        )
    }

    /// AI generation tier: 20 requests per 15 minutes, failures refunded
    #[must_use]
    pub fn ai() -> Self {
        Self::new(
            "ai",
            AI_MAX_REQUESTS,
            Duration::seconds(DEFAULT_WINDOW_SECS),
            CountMode::SkipFailed,
        )
    }

    /// Account creation tier: 5 requests per 15 minutes, successes refunded
    #[must_use]
    pub fn auth() -> Self {
        Self::new(
            "auth",
            AUTH_MAX_REQUESTS,
            Duration::seconds(DEFAULT_WINDOW_SECS),
            CountMode::SkipSuccessful,
        )
    }

    /// Data entry tier: 30 requests per 5 minutes
    #[must_use]
    pub fn create() -> Self {
        Self::new(
            "create",
            CREATE_MAX_REQUESTS,
            Duration::seconds(CREATE_WINDOW_SECS),
            CountMode::All,
        )
    }

    /// Tier name used in logs
    #[must_use]
    pub const fn tier(&self) -> &'static str {
        self.tier
    }

    /// Counts one request against the client's current window
    pub fn register(&self, client: &str) -> RateLimitDecision {
        self.register_at(client, Utc::now())
    }

    fn register_at(&self, client: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut entry = self
            .windows
            .entry(client.to_owned())
            .or_insert_with(|| WindowState {
                window_start: now,
                count: 0,
            });

        if now - entry.window_start >= self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count = entry.count.saturating_add(1);
        let allowed = entry.count <= self.max_requests;
        let info = RateLimitInfo {
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_at: entry.window_start + self.window,
        };
        RateLimitDecision { allowed, info }
    }

    /// Refunds the most recent request, used when the response status
    /// falls outside this tier's counting mode
    pub fn forgive(&self, client: &str) {
        if let Some(mut entry) = self.windows.get_mut(client) {
            entry.count = entry.count.saturating_sub(1);
        }
    }

    /// Whether a finished response should be refunded under this tier's mode
    #[must_use]
    pub fn should_forgive(&self, status: StatusCode) -> bool {
        let failed = status.is_client_error() || status.is_server_error();
        match self.mode {
            CountMode::All => false,
            CountMode::SkipFailed => failed,
            CountMode::SkipSuccessful => !failed,
        }
    }

    /// Drops windows that have already expired
    pub fn prune_expired(&self) {
        let now = Utc::now();
        self.windows
            .retain(|_, state| now - state.window_start < self.window);
    }

    /// Number of clients with live windows
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

/// All limiter tiers the server runs, one instance each
#[derive(Clone)]
pub struct RateLimitTiers {
    /// Baseline tier applied to the whole `/api` surface
    pub general: Arc<RateLimiter>,
    /// AI generation endpoints
    pub ai: Arc<RateLimiter>,
    /// Account creation
    pub auth: Arc<RateLimiter>,
    /// Data entry endpoints
    pub create: Arc<RateLimiter>,
}

impl RateLimitTiers {
    /// Creates the standard tier set
    #[must_use]
    pub fn new() -> Self {
        Self {
            general: Arc::new(RateLimiter::general()),
            ai: Arc::new(RateLimiter::ai()),
            auth: Arc::new(RateLimiter::auth()),
            create: Arc::new(RateLimiter::create()),
        }
    }

    /// Drops expired windows across every tier
    pub fn prune_expired(&self) {
        self.general.prune_expired();
        self.ai.prune_expired();
        self.auth.prune_expired();
        self.create.prune_expired();
    }
}

impl Default for RateLimitTiers {
    fn default() -> Self {
        Self::new()
    }
}

// ================================================================================================
// HTTP Integration
// ================================================================================================

/// Stamps the standard rate limit headers onto a response.
///
/// Headers already present are left untouched: when tiers nest, the
/// innermost tier stamps first and its more specific window wins.
pub fn apply_rate_limit_headers(headers: &mut HeaderMap, info: &RateLimitInfo) {
    if let Ok(value) = HeaderValue::from_str(&info.limit.to_string()) {
        headers.entry(headers::X_RATE_LIMIT_LIMIT).or_insert(value);
    }
    if let Ok(value) = HeaderValue::from_str(&info.remaining.to_string()) {
        headers
            .entry(headers::X_RATE_LIMIT_REMAINING)
            .or_insert(value);
    }
    if let Ok(value) = HeaderValue::from_str(&info.reset_at.timestamp().to_string()) {
        headers.entry(headers::X_RATE_LIMIT_RESET).or_insert(value);
    }
}

/// Adds `Retry-After` with the seconds until the window resets
pub fn apply_retry_after_header(headers: &mut HeaderMap, info: &RateLimitInfo) {
    let retry_after = (info.reset_at - Utc::now()).num_seconds().max(0);
    if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
        headers.insert(headers::RETRY_AFTER, value);
    }
}

/// Client key for window bucketing: first `X-Forwarded-For` hop, then the
/// socket peer address, then a shared fallback bucket
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return forwarded.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_owned(), |info| info.0.ip().to_string())
}

/// Wraps a router's already-registered routes with one limiter tier.
///
/// When limiting is disabled by configuration the router comes back
/// unchanged, with no middleware in the path.
pub fn attach(router: Router, enabled: bool, limiter: &Arc<RateLimiter>) -> Router {
    if enabled {
        router.route_layer(middleware::from_fn_with_state(Arc::clone(limiter), enforce))
    } else {
        router
    }
}

/// Axum middleware enforcing one limiter tier.
///
/// Attach per route group with `middleware::from_fn_with_state`.
pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);
    let decision = limiter.register(&client);

    if !decision.allowed {
        AppLogger::log_rate_limit_event(&client, limiter.tier(), request.uri().path());
        let error = AppError::rate_limit_exceeded(decision.info.limit, decision.info.reset_at);
        let mut response = error.into_response();
        apply_rate_limit_headers(response.headers_mut(), &decision.info);
        apply_retry_after_header(response.headers_mut(), &decision.info);
        return response;
    }

    let mut response = next.run(request).await;
    if limiter.should_forgive(response.status()) {
        limiter.forgive(&client);
    }
    apply_rate_limit_headers(response.headers_mut(), &decision.info);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_limiter(mode: CountMode) -> RateLimiter {
        RateLimiter::new("test", 2, Duration::seconds(60), mode)
    }

    #[test]
    fn allows_until_limit_then_rejects() {
        let limiter = tiny_limiter(CountMode::All);

        assert!(limiter.register("1.2.3.4").allowed);
        assert!(limiter.register("1.2.3.4").allowed);
        let third = limiter.register("1.2.3.4");

        assert!(!third.allowed);
        assert_eq!(third.info.limit, 2);
        assert_eq!(third.info.remaining, 0);
    }

    #[test]
    fn clients_have_independent_windows() {
        let limiter = tiny_limiter(CountMode::All);

        assert!(limiter.register("1.2.3.4").allowed);
        assert!(limiter.register("1.2.3.4").allowed);
        assert!(!limiter.register("1.2.3.4").allowed);
        assert!(limiter.register("5.6.7.8").allowed);
    }

    #[test]
    fn window_expiry_resets_the_count() {
        let limiter = tiny_limiter(CountMode::All);
        let start = Utc::now();

        assert!(limiter.register_at("1.2.3.4", start).allowed);
        assert!(limiter.register_at("1.2.3.4", start).allowed);
        assert!(!limiter.register_at("1.2.3.4", start).allowed);

        let later = start + Duration::seconds(61);
        let decision = limiter.register_at("1.2.3.4", later);

        assert!(decision.allowed);
        assert_eq!(decision.info.remaining, 1);
        assert_eq!(decision.info.reset_at, later + Duration::seconds(60));
    }

    #[test]
    fn remaining_counts_down() {
        let limiter = RateLimiter::new("test", 3, Duration::seconds(60), CountMode::All);

        assert_eq!(limiter.register("c").info.remaining, 2);
        assert_eq!(limiter.register("c").info.remaining, 1);
        assert_eq!(limiter.register("c").info.remaining, 0);
    }

    #[test]
    fn forgive_restores_capacity() {
        let limiter = tiny_limiter(CountMode::SkipFailed);

        assert!(limiter.register("c").allowed);
        assert!(limiter.register("c").allowed);
        limiter.forgive("c");
        assert!(limiter.register("c").allowed);
        assert!(!limiter.register("c").allowed);
    }

    #[test]
    fn skip_failed_refunds_error_responses_only() {
        let limiter = tiny_limiter(CountMode::SkipFailed);

        assert!(limiter.should_forgive(StatusCode::BAD_REQUEST));
        assert!(limiter.should_forgive(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!limiter.should_forgive(StatusCode::OK));
        assert!(!limiter.should_forgive(StatusCode::CREATED));
    }

    #[test]
    fn skip_successful_refunds_success_responses_only() {
        let limiter = tiny_limiter(CountMode::SkipSuccessful);

        assert!(limiter.should_forgive(StatusCode::CREATED));
        assert!(limiter.should_forgive(StatusCode::OK));
        assert!(!limiter.should_forgive(StatusCode::CONFLICT));
        assert!(!limiter.should_forgive(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn all_mode_never_refunds() {
        let limiter = tiny_limiter(CountMode::All);

        assert!(!limiter.should_forgive(StatusCode::OK));
        assert!(!limiter.should_forgive(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn prune_drops_only_expired_windows() {
        let limiter = tiny_limiter(CountMode::All);
        let old = Utc::now() - Duration::seconds(120);

        limiter.register_at("stale", old);
        limiter.register("fresh");
        assert_eq!(limiter.tracked_clients(), 2);

        limiter.prune_expired();

        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn tier_policies_match_the_published_limits() {
        let general = RateLimiter::general();
        let ai = RateLimiter::ai();
        let auth = RateLimiter::auth();
        let create = RateLimiter::create();

        assert_eq!(general.max_requests, 100);
        assert_eq!(general.mode, CountMode::All);
        assert_eq!(ai.max_requests, 20);
        assert_eq!(ai.mode, CountMode::SkipFailed);
        assert_eq!(auth.max_requests, 5);
        assert_eq!(auth.mode, CountMode::SkipSuccessful);
        assert_eq!(create.max_requests, 30);
        assert_eq!(create.window, Duration::seconds(300));
    }

    #[test]
    fn header_stamping_produces_numeric_values() {
        let mut headers = HeaderMap::new();
        let info = RateLimitInfo {
            limit: 100,
            remaining: 42,
            reset_at: Utc::now() + Duration::seconds(600),
        };

        apply_rate_limit_headers(&mut headers, &info);
        apply_retry_after_header(&mut headers, &info);

        assert_eq!(headers[headers::X_RATE_LIMIT_LIMIT], "100");
        assert_eq!(headers[headers::X_RATE_LIMIT_REMAINING], "42");
        assert!(headers.contains_key(headers::X_RATE_LIMIT_RESET));
        let retry: i64 = headers[headers::RETRY_AFTER].to_str().unwrap().parse().unwrap();
        assert!((0..=600).contains(&retry));
    }

    #[test]
    fn header_stamping_keeps_the_first_tier_that_wrote() {
        let mut headers = HeaderMap::new();
        let inner = RateLimitInfo {
            limit: 20,
            remaining: 3,
            reset_at: Utc::now() + Duration::seconds(300),
        };
        let outer = RateLimitInfo {
            limit: 100,
            remaining: 80,
            reset_at: Utc::now() + Duration::seconds(600),
        };

        apply_rate_limit_headers(&mut headers, &inner);
        apply_rate_limit_headers(&mut headers, &outer);

        assert_eq!(headers[headers::X_RATE_LIMIT_LIMIT], "20");
        assert_eq!(headers[headers::X_RATE_LIMIT_REMAINING], "3");
    }
}
