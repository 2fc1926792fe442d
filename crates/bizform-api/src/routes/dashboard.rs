//! # Dashboard Endpoint
//!
//! The four formation steps in order, each marked with whether the caller
//! has a saved record for it. Guests never have saved records.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use bizform_core::FormKind;
use bizform_state::PersistenceGateway;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// One step on the dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardModule {
    /// 1-based position.
    pub step: usize,
    /// Form kind, usable in `/v1/forms/{form}`.
    pub kind: String,
    pub title: String,
    pub description: String,
    /// The caller has a saved record for this form.
    pub saved: bool,
}

/// The caller's dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub guest: bool,
    pub modules: Vec<DashboardModule>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(get_dashboard))
}

/// GET /v1/dashboard — Formation steps and their saved status.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = Dashboard),
        (status = 401, description = "No caller identity", body = crate::error::ErrorBody),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorBody),
    ),
    tag = "dashboard"
)]
pub(crate) async fn get_dashboard(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<Json<Dashboard>, AppError> {
    let mut modules = Vec::with_capacity(FormKind::all().len());
    for (i, &kind) in FormKind::all().iter().enumerate() {
        let saved = match caller.user() {
            Some(user) => state.store.load_latest(kind, user).await?.is_some(),
            None => false,
        };
        modules.push(DashboardModule {
            step: i + 1,
            kind: kind.as_str().to_string(),
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            saved,
        });
    }
    Ok(Json(Dashboard {
        guest: caller.is_guest(),
        modules,
    }))
}
