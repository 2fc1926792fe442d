//! # Catalog Endpoints
//!
//! Business-type license checklists, the bank search, and the EIN
//! worksheet options. No caller identity needed.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/v1/business-types` | `list_business_types` |
//! | `GET` | `/v1/licenses/{business_type}` | `get_license_checklist` |
//! | `GET` | `/v1/banks` | `search_banks` |
//! | `GET` | `/v1/ein/options` | `ein_options` |

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use bizform_core::BusinessType;
use bizform_pack::{ein_entity_types, license_catalog, BankOption, IRS_EIN_URL};
use bizform_resolver::resolve_license_checklist;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A business category and its typical licenses.
#[derive(Debug, Serialize, ToSchema)]
pub struct LicenseChecklist {
    /// Resolved category key; unknown keys resolve to `other`.
    #[schema(value_type = String, example = "restaurant")]
    pub business_type: BusinessType,
    pub label: String,
    pub licenses: Vec<String>,
}

/// Query for the bank search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BankQuery {
    /// Five-character ZIP code.
    pub zip: Option<String>,
}

/// Bank search result.
#[derive(Debug, Serialize, ToSchema)]
pub struct BankSearchResponse {
    pub zip: String,
    #[schema(value_type = Vec<Object>)]
    pub banks: Vec<BankOption>,
}

/// Choices for the EIN worksheet.
#[derive(Debug, Serialize, ToSchema)]
pub struct EinOptions {
    pub entity_types: Vec<String>,
    /// Where the real application is filed.
    pub irs_url: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/business-types", get(list_business_types))
        .route("/v1/licenses/{business_type}", get(get_license_checklist))
        .route("/v1/banks", get(search_banks))
        .route("/v1/ein/options", get(ein_options))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/business-types — Every category with its checklist.
#[utoipa::path(
    get,
    path = "/v1/business-types",
    responses((status = 200, description = "Categories in display order", body = Vec<LicenseChecklist>)),
    tag = "catalog"
)]
pub(crate) async fn list_business_types() -> Json<Vec<LicenseChecklist>> {
    let catalog = license_catalog();
    let list = BusinessType::all()
        .iter()
        .filter_map(|ty| catalog.get(ty))
        .map(|category| LicenseChecklist {
            business_type: category.business_type,
            label: category.label.to_string(),
            licenses: category.licenses.iter().map(|l| l.to_string()).collect(),
        })
        .collect();
    Json(list)
}

/// GET /v1/licenses/{business_type} — Typical licenses for one category.
#[utoipa::path(
    get,
    path = "/v1/licenses/{business_type}",
    params(("business_type" = String, Path, description = "Category key, e.g. `restaurant`")),
    responses((status = 200, description = "Checklist", body = LicenseChecklist)),
    tag = "catalog"
)]
pub(crate) async fn get_license_checklist(Path(key): Path<String>) -> Json<LicenseChecklist> {
    let business_type = BusinessType::from_key_or_other(&key);
    Json(LicenseChecklist {
        business_type,
        label: business_type.label().to_string(),
        licenses: resolve_license_checklist(&key),
    })
}

/// GET /v1/banks?zip= — Business checking options near a ZIP code.
#[utoipa::path(
    get,
    path = "/v1/banks",
    params(BankQuery),
    responses(
        (status = 200, description = "Bank options", body = BankSearchResponse),
        (status = 422, description = "Missing or malformed ZIP code", body = crate::error::ErrorBody),
        (status = 503, description = "Bank directory unavailable", body = crate::error::ErrorBody),
    ),
    tag = "catalog"
)]
pub(crate) async fn search_banks(
    State(state): State<AppState>,
    Query(query): Query<BankQuery>,
) -> Result<Json<BankSearchResponse>, AppError> {
    let zip = query.zip.unwrap_or_default();
    if zip.chars().count() != 5 {
        return Err(AppError::Validation(
            "zip must be a 5-digit ZIP code".to_string(),
        ));
    }
    let banks = state
        .bank_directory
        .search(&zip)
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
    Ok(Json(BankSearchResponse { zip, banks }))
}

/// GET /v1/ein/options — Entity types and the IRS application link.
#[utoipa::path(
    get,
    path = "/v1/ein/options",
    responses((status = 200, description = "EIN worksheet options", body = EinOptions)),
    tag = "catalog"
)]
pub(crate) async fn ein_options() -> Json<EinOptions> {
    Json(EinOptions {
        entity_types: ein_entity_types().iter().map(|s| s.to_string()).collect(),
        irs_url: IRS_EIN_URL.to_string(),
    })
}
