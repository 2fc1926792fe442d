//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{GUEST_HEADER, USER_HEADER};
use crate::state::AppState;

/// Adds the caller identity headers as security schemes.
struct CallerHeadersAddon;

impl Modify for CallerHeadersAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "user_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    USER_HEADER,
                    "Registered user id, set by the upstream identity provider.",
                ))),
            );
            components.add_security_scheme(
                "guest_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    GUEST_HEADER,
                    "Guest session id. Guests can fill forms but not save them.",
                ))),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bizform API",
        description = "Business formation assistant.\n\nProvides:\n- **Jurisdiction resolution** from ZIP codes and state codes\n- **Catalogs** for business-type licenses, business banking, and EIN entity types\n- **Form sessions** for the LLC, EIN, license, and banking worksheets, with save and restore\n- **Dashboard** of formation steps\n\nForm and dashboard routes need an `x-user-id` or `x-guest-id` header. Resolution and catalog routes and health probes need none."
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // ── Resolution ───────────────────────────────────────────────────
        crate::routes::resolve::resolve_zip,
        crate::routes::resolve::list_jurisdictions,
        crate::routes::resolve::get_jurisdiction,
        // ── Catalogs ─────────────────────────────────────────────────────
        crate::routes::catalog::list_business_types,
        crate::routes::catalog::get_license_checklist,
        crate::routes::catalog::search_banks,
        crate::routes::catalog::ein_options,
        // ── Form sessions ────────────────────────────────────────────────
        crate::routes::forms::get_form,
        crate::routes::forms::apply_form_event,
        crate::routes::forms::save_form_session,
        crate::routes::forms::search_form,
        // ── Dashboard ────────────────────────────────────────────────────
        crate::routes::dashboard::get_dashboard,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::resolve::ZipResolution,
        crate::routes::resolve::JurisdictionSummary,
        crate::routes::resolve::JurisdictionDetail,
        crate::routes::catalog::LicenseChecklist,
        crate::routes::catalog::BankSearchResponse,
        crate::routes::catalog::EinOptions,
        crate::routes::forms::FormView,
        crate::routes::forms::SaveResponse,
        crate::routes::dashboard::Dashboard,
        crate::routes::dashboard::DashboardModule,
    )),
    modifiers(&CallerHeadersAddon),
    tags(
        (name = "resolve", description = "ZIP and state code to jurisdiction profile"),
        (name = "catalog", description = "License, bank, and EIN reference lists"),
        (name = "forms", description = "Per-caller form sessions"),
        (name = "dashboard", description = "Formation steps and saved status"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_every_route() {
        let spec = ApiDoc::openapi();
        for path in [
            "/v1/resolve/zip/{zip}",
            "/v1/jurisdictions",
            "/v1/jurisdictions/{state}",
            "/v1/business-types",
            "/v1/licenses/{business_type}",
            "/v1/banks",
            "/v1/ein/options",
            "/v1/forms/{form}",
            "/v1/forms/{form}/events",
            "/v1/forms/{form}/save",
            "/v1/forms/{form}/search",
            "/v1/dashboard",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn spec_has_caller_header_schemes() {
        let spec = ApiDoc::openapi();
        let schemes = &spec.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("user_id"));
        assert!(schemes.contains_key("guest_id"));
    }

    #[test]
    fn spec_serializes() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Bizform API"));
    }
}
