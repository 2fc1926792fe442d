//! # Jurisdiction Resolution Endpoints
//!
//! Read-only lookups over the reference tables. No caller identity needed.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/v1/resolve/zip/{zip}` | `resolve_zip` |
//! | `GET` | `/v1/jurisdictions` | `list_jurisdictions` |
//! | `GET` | `/v1/jurisdictions/{state}` | `get_jurisdiction` |

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use bizform_core::StateCode;
use bizform_pack::JurisdictionProfile;
use bizform_resolver::{resolve_jurisdiction_profile, resolve_profile_for_zip};

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Result of resolving a ZIP code.
#[derive(Debug, Serialize, ToSchema)]
pub struct ZipResolution {
    /// The ZIP code as given.
    pub zip: String,
    /// Detected state, when the prefix is known.
    #[schema(value_type = Option<String>, example = "CA")]
    pub state_code: Option<StateCode>,
    /// Display name of the detected state.
    pub state_name: Option<String>,
    /// LLC formation facts for the detected state, when it has any.
    #[schema(value_type = Option<Object>)]
    pub profile: Option<JurisdictionProfile>,
}

/// One entry in the jurisdiction list.
#[derive(Debug, Serialize, ToSchema)]
pub struct JurisdictionSummary {
    #[schema(value_type = String, example = "NY")]
    pub state_code: StateCode,
    pub state_name: String,
    /// False for DC and the territories.
    pub is_state: bool,
    /// Whether a formation profile exists.
    pub has_profile: bool,
}

/// A single jurisdiction with its profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct JurisdictionDetail {
    #[schema(value_type = String, example = "NY")]
    pub state_code: StateCode,
    pub state_name: String,
    #[schema(value_type = Option<Object>)]
    pub profile: Option<JurisdictionProfile>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the resolution router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/resolve/zip/{zip}", get(resolve_zip))
        .route("/v1/jurisdictions", get(list_jurisdictions))
        .route("/v1/jurisdictions/{state}", get(get_jurisdiction))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/resolve/zip/{zip} — Detect the state and profile for a ZIP code.
#[utoipa::path(
    get,
    path = "/v1/resolve/zip/{zip}",
    params(("zip" = String, Path, description = "ZIP code; only the first three characters are used")),
    responses(
        (status = 200, description = "Resolution result; fields are null when nothing matched", body = ZipResolution),
    ),
    tag = "resolve"
)]
pub(crate) async fn resolve_zip(Path(zip): Path<String>) -> Json<ZipResolution> {
    let (state_code, profile) = resolve_profile_for_zip(&zip);
    Json(ZipResolution {
        state_name: state_code.map(|s| s.name().to_string()),
        state_code,
        profile: profile.cloned(),
        zip,
    })
}

/// GET /v1/jurisdictions — All jurisdictions in dropdown order.
#[utoipa::path(
    get,
    path = "/v1/jurisdictions",
    responses(
        (status = 200, description = "Every state, DC, and territory", body = Vec<JurisdictionSummary>),
    ),
    tag = "resolve"
)]
pub(crate) async fn list_jurisdictions() -> Json<Vec<JurisdictionSummary>> {
    let list = StateCode::all()
        .iter()
        .map(|&code| JurisdictionSummary {
            state_code: code,
            state_name: code.name().to_string(),
            is_state: code.is_state(),
            has_profile: resolve_jurisdiction_profile(code).is_some(),
        })
        .collect();
    Json(list)
}

/// GET /v1/jurisdictions/{state} — One jurisdiction and its profile.
#[utoipa::path(
    get,
    path = "/v1/jurisdictions/{state}",
    params(("state" = String, Path, description = "Two-letter code, case-insensitive")),
    responses(
        (status = 200, description = "Jurisdiction found; profile is null when the state has none", body = JurisdictionDetail),
        (status = 422, description = "Unknown state code", body = crate::error::ErrorBody),
    ),
    tag = "resolve"
)]
pub(crate) async fn get_jurisdiction(
    Path(state): Path<String>,
) -> Result<Json<JurisdictionDetail>, AppError> {
    let code: StateCode = state.parse()?;
    Ok(Json(JurisdictionDetail {
        state_code: code,
        state_name: code.name().to_string(),
        profile: resolve_jurisdiction_profile(code).cloned(),
    }))
}
