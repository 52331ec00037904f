// ABOUTME: HTTP server assembly combining routes, middleware, and lifecycle management
// ABOUTME: Builds the axum router, binds the listener, and runs until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # HTTP Server Module
//!
//! Assembles the REST API from the per-family route groups, wraps it in the
//! shared middleware stack, and drives the listener until a shutdown signal
//! arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::environment::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::rate_limiting;
use crate::resources::ServerResources;
use crate::routes::{
    AchievementRoutes, AlarmRoutes, CalorieRoutes, ChatRoutes, CheckInRoutes, HealthRoutes,
    MealPlanRoutes, PersonalRecordRoutes, ProgressRoutes, UserRoutes, WorkoutPlanRoutes,
};

/// Hard deadline for any single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on accepted request body size in bytes
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Cadence of the sweep that drops expired rate limit windows
const PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// HTTP server for the fitness API
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a server around the shared resource container
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete application router.
    ///
    /// Public so tests can drive the stack through `tower::Service` calls
    /// without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = &self.resources;

        let api = Router::new()
            .merge(UserRoutes::routes(resources.clone()))
            .merge(CheckInRoutes::routes(resources.clone()))
            .merge(WorkoutPlanRoutes::routes(resources.clone()))
            .merge(MealPlanRoutes::routes(resources.clone()))
            .merge(CalorieRoutes::routes(resources.clone()))
            .merge(AlarmRoutes::routes(resources.clone()))
            .merge(ProgressRoutes::routes(resources.clone()))
            .merge(AchievementRoutes::routes(resources.clone()))
            .merge(PersonalRecordRoutes::routes(resources.clone()))
            .merge(ChatRoutes::routes(resources.clone()));

        // Baseline tier wraps the whole API surface; stricter tiers are
        // attached inside the individual route groups.
        let api = rate_limiting::attach(
            api,
            resources.config.rate_limit.enabled,
            &resources.limits.general,
        );

        // The body limit layer is applied in its own `layer` call (innermost,
        // matching the original stack order) because `tower_http`'s `Timeout`
        // requires an inner response body implementing `Default`, which the
        // limit layer's `ResponseBody` does not provide inside a single
        // `ServiceBuilder` stack; axum re-boxes the body between `layer` calls.
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(api)
            .fallback(handle_not_found)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(middleware::from_fn(log_requests))
                    .layer(setup_cors(&resources.config))
                    .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
            )
    }

    /// Bind the configured address and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot bind or the server loop
    /// fails.
    pub async fn serve(self) -> AppResult<()> {
        let addr = self.resources.config.listen_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        self.spawn_prune_task();

        info!("🚀 FitGenius API listening on http://{addr}");

        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }

    /// Periodically drop rate limit windows whose reset time has passed,
    /// keeping the per-client maps from growing without bound.
    fn spawn_prune_task(&self) {
        let limits = self.resources.limits.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                limits.prune_expired();
            }
        });
    }
}

/// Emits one access log line per API request once the response is ready.
/// Non-API paths stay quiet.
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    if path.starts_with("/api") {
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_api_request(
            method.as_str(),
            &path,
            response.status().as_u16(),
            duration_ms,
            None,
        );
    }
    response
}

/// JSON 404 for paths outside the API surface
async fn handle_not_found() -> Response {
    AppError::not_found("Route").into_response()
}

/// Resolves when the process receives a shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install shutdown signal handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

/// Build the CORS layer from the configured origin list.
///
/// An empty list or a `*` entry opens the API to any origin, matching the
/// development default. Otherwise only the listed origins are allowed.
fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let wildcard = config.cors_origins.iter().any(|origin| origin == "*");
    let allow_origin = if config.cors_origins.is_empty() || wildcard {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            // Fallback to any if parsing failed
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("access-control-request-method"),
            HeaderName::from_static("access-control-request-headers"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_origins(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            cors_origins: origins.iter().map(|s| (*s).to_owned()).collect(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn router_builds_with_default_resources() {
        let resources = ServerResources::builder().build_arc().unwrap();
        let server = HttpServer::new(resources);

        // Route registration panics on conflicting paths, so building the
        // router at all proves the API surface merges cleanly.
        let _router = server.router();
    }

    #[test]
    fn cors_accepts_wildcard_and_origin_lists() {
        let _any = setup_cors(&config_with_origins(&["*"]));
        let _list = setup_cors(&config_with_origins(&[
            "http://localhost:3000",
            "https://app.example.com",
        ]));
        let _fallback = setup_cors(&config_with_origins(&[]));
    }
}
