//! # bizform-api — Axum API Service
//!
//! HTTP surface of the business formation assistant.
//!
//! ## API Surface
//!
//! | Prefix | Module | Caller identity |
//! |--------|--------|-----------------|
//! | `/v1/resolve/*`, `/v1/jurisdictions*` | [`routes::resolve`] | not needed |
//! | `/v1/business-types`, `/v1/licenses/*`, `/v1/banks`, `/v1/ein/*` | [`routes::catalog`] | not needed |
//! | `/v1/forms/*` | [`routes::forms`] | user or guest |
//! | `/v1/dashboard` | [`routes::dashboard`] | user or guest |
//! | `/health/*`, `/metrics` | this module | not needed |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - Sits at the top of the dependency DAG.
//! - No business logic in route handlers; controllers and the resolver
//!   own it.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod auth;
pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::trace::TraceLayer;

use bizform_core::FormKind;
use bizform_pack::validate_reference_tables;

pub use error::AppError;
pub use state::{AppConfig, AppState, FormStore};

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` sit outside the metrics middleware so
/// scrapes do not count themselves.
pub fn app(state: AppState) -> Router {
    let metrics_on = state.config.metrics_enabled;
    let metrics = state.metrics.clone();

    let mut api = Router::new()
        .merge(routes::resolve::router())
        .merge(routes::catalog::router())
        .merge(routes::forms::router())
        .merge(routes::dashboard::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(256 * 1024));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(axum::Extension(metrics));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        probes = probes.route("/metrics", axum::routing::get(prometheus_metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Refreshes the session gauge from `AppState` on each scrape, then
/// encodes every metric in Prometheus text format.
async fn prometheus_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let gauge = state.metrics.active_sessions();
    for kind in FormKind::all() {
        gauge
            .with_label_values(&[kind.as_str()])
            .set(state.sessions.count(*kind) as f64);
    }

    match state.metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe. Always 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
///
/// Checks:
/// - Reference tables pass validation.
/// - Database connection is healthy (when configured).
///
/// Returns 200 "ready" or 503 with a diagnostic message.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let problems = validate_reference_tables();
    if let Some(first) = problems.first() {
        tracing::error!(count = problems.len(), "reference tables invalid: {first}");
        return (StatusCode::SERVICE_UNAVAILABLE, "reference tables invalid").into_response();
    }

    if let FormStore::Postgres(gateway) = &state.store {
        if let Err(e) = sqlx::query("SELECT 1").execute(gateway.pool()).await {
            tracing::warn!("Database health check failed: {e}");
            return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
        }
    }

    (StatusCode::OK, "ready").into_response()
}
