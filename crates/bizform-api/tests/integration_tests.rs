//! # Integration Tests for bizform-api
//!
//! Drives the assembled router with `oneshot` requests: health probes,
//! jurisdiction resolution, catalogs, form sessions with save/restore,
//! the dashboard, session bounds, and metrics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use bizform_api::auth::{GUEST_HEADER, USER_HEADER};
use bizform_api::state::{AppConfig, AppState, FormStore};
use bizform_core::{FormKind, GuestId, UserId};
use bizform_pack::BankOption;
use bizform_resolver::{BankDirectory, ProviderError, StaticLicenseDirectory};
use bizform_state::MemoryGateway;

/// Helper: in-memory app with static providers.
fn test_app() -> axum::Router {
    bizform_api::app(AppState::new())
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, header: &str, id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header, id)
        .body(Body::empty())
        .unwrap()
}

fn post_as(uri: &str, header: &str, id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header, id)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Resolution ---------------------------------------------------------------

#[tokio::test]
async fn test_resolve_san_francisco_zip() {
    let response = test_app()
        .oneshot(get("/v1/resolve/zip/94105"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["state_code"], "CA");
    assert_eq!(body["state_name"], "California");
    assert_eq!(body["profile"]["filing_fee"], "$70");
}

#[tokio::test]
async fn test_resolve_unmapped_zip_returns_nulls() {
    let response = test_app()
        .oneshot(get("/v1/resolve/zip/19101"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["zip"], "19101");
    assert!(body["state_code"].is_null());
    assert!(body["profile"].is_null());
}

#[tokio::test]
async fn test_list_jurisdictions() {
    let response = test_app().oneshot(get("/v1/jurisdictions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    let ny = list.iter().find(|j| j["state_code"] == "NY").unwrap();
    assert_eq!(ny["has_profile"], true);
    let oh = list.iter().find(|j| j["state_code"] == "OH").unwrap();
    assert_eq!(oh["has_profile"], false);
}

#[tokio::test]
async fn test_get_jurisdiction_lowercase() {
    let response = test_app()
        .oneshot(get("/v1/jurisdictions/ny"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["state_code"], "NY");
    assert_eq!(body["profile"]["publication_required"], true);
}

#[tokio::test]
async fn test_get_jurisdiction_without_profile() {
    let response = test_app()
        .oneshot(get("/v1/jurisdictions/OH"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["profile"].is_null());
}

#[tokio::test]
async fn test_get_jurisdiction_invalid_code_is_422() {
    let response = test_app()
        .oneshot(get("/v1/jurisdictions/ZZ"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// -- Catalogs -----------------------------------------------------------------

#[tokio::test]
async fn test_license_checklist_unknown_type_is_other() {
    let response = test_app()
        .oneshot(get("/v1/licenses/spaceport"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["business_type"], "other");
    assert_eq!(body["licenses"], json!(["Business License"]));
}

#[tokio::test]
async fn test_business_types_list() {
    let response = test_app().oneshot(get("/v1/business-types")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 13);
    assert_eq!(body[0]["business_type"], "restaurant");
}

#[tokio::test]
async fn test_bank_search() {
    let response = test_app()
        .oneshot(get("/v1/banks?zip=10001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["banks"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_bank_search_rejects_short_zip() {
    let response = test_app().oneshot(get("/v1/banks?zip=100")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

struct DownBanks;

impl BankDirectory for DownBanks {
    fn search(&self, _zip: &str) -> Result<Vec<BankOption>, ProviderError> {
        Err(ProviderError::Unavailable {
            reason: "maintenance".into(),
        })
    }

    fn provider_name(&self) -> &str {
        "down"
    }
}

#[tokio::test]
async fn test_bank_search_provider_down_is_503() {
    let state = AppState::new().with_directories(Arc::new(StaticLicenseDirectory), Arc::new(DownBanks));
    let response = bizform_api::app(state)
        .oneshot(get("/v1/banks?zip=10001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_string(response).await;
    assert!(!body.contains("maintenance"));
}

#[tokio::test]
async fn test_ein_options() {
    let response = test_app().oneshot(get("/v1/ein/options")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["entity_types"].as_array().unwrap().len(), 8);
    assert!(body["irs_url"].as_str().unwrap().starts_with("https://"));
}

// -- Form Sessions ------------------------------------------------------------

#[tokio::test]
async fn test_forms_require_caller_identity() {
    let response = test_app().oneshot(get("/v1/forms/llc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_form_is_404() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(get_as("/v1/forms/payroll", GUEST_HEADER, &guest))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_llc_zip_event_detects_state() {
    let app = test_app();
    let guest = GuestId::new().to_string();

    let response = app
        .clone()
        .oneshot(post_as(
            "/v1/forms/llc/events",
            GUEST_HEADER,
            &guest,
            json!({"type": "zip_changed", "zip": "10001"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["record"]["business_state"], "NY");
    assert_eq!(body["record"]["jurisdiction"]["filing_fee"], "$200");
    assert_eq!(body["notice"]["title"], "State Detected");

    // The session keeps the edit.
    let response = app
        .oneshot(get_as("/v1/forms/llc", GUEST_HEADER, &guest))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["record"]["business_zip"], "10001");
    assert!(body["notice"].is_null());
}

#[tokio::test]
async fn test_malformed_event_is_422() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(post_as(
            "/v1/forms/llc/events",
            GUEST_HEADER,
            &guest,
            json!({"type": "launch_rocket"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_field_is_422() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(post_as(
            "/v1/forms/ein/events",
            GUEST_HEADER,
            &guest,
            json!({"type": "set_field", "field": "shoe_size", "value": "9"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_guest_save_is_refused_with_notice() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(post_as("/v1/forms/llc/save", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["outcome"], "authentication_required");
    assert_eq!(body["saved"], false);
    assert_eq!(body["notice"]["title"], "Authentication Required");
}

#[tokio::test]
async fn test_user_save_then_restore_and_dashboard() {
    let state = AppState::new();
    let user = UserId::new().to_string();

    let app = bizform_api::app(state.clone());
    app.clone()
        .oneshot(post_as(
            "/v1/forms/ein/events",
            USER_HEADER,
            &user,
            json!({"type": "set_field", "field": "business_name", "value": "Acme LLC"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_as("/v1/forms/ein/save", USER_HEADER, &user, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["saved"], true);
    assert_eq!(body["notice"]["title"], "Data Saved");

    let response = app
        .oneshot(get_as("/v1/dashboard", USER_HEADER, &user))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["guest"], false);
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules[0]["kind"], "ein");
    assert_eq!(modules[0]["saved"], true);
    assert_eq!(modules[1]["saved"], false);

    // A fresh session set restores the saved record from the store.
    let fresh = AppState {
        sessions: Default::default(),
        ..state
    };
    let response = bizform_api::app(fresh)
        .oneshot(get_as("/v1/forms/ein", USER_HEADER, &user))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["record"]["business_name"], "Acme LLC");
}

#[tokio::test]
async fn test_guest_dashboard_has_nothing_saved() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(get_as("/v1/dashboard", GUEST_HEADER, &guest))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["guest"], true);
    let modules = body["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 4);
    assert!(modules.iter().all(|m| m["saved"] == false));
    assert_eq!(modules[3]["step"], 4);
}

#[tokio::test]
async fn test_license_search_flow() {
    let app = test_app();
    let guest = GuestId::new().to_string();

    let response = app
        .clone()
        .oneshot(post_as("/v1/forms/licenses/search", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["notice"]["title"], "Missing Information");

    for event in [
        json!({"type": "business_type_changed", "key": "restaurant"}),
        json!({"type": "set_field", "field": "business_state", "value": "TX"}),
    ] {
        let response = app
            .clone()
            .oneshot(post_as("/v1/forms/licenses/events", GUEST_HEADER, &guest, event))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(post_as("/v1/forms/licenses/search", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["notice"]["title"], "Licenses Found");
    assert_eq!(body["record"]["required_licenses"].as_array().unwrap().len(), 8);
    assert_eq!(
        body["record"]["license_links"][0],
        "https://tx.gov/business-licenses"
    );
}

#[tokio::test]
async fn test_banking_search_flow() {
    let app = test_app();
    let guest = GuestId::new().to_string();

    app.clone()
        .oneshot(post_as(
            "/v1/forms/banking/events",
            GUEST_HEADER,
            &guest,
            json!({"type": "zip_changed", "zip": "60601"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_as("/v1/forms/banking/search", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["notice"]["title"], "Banks Found");
    assert_eq!(body["record"]["bank_results"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_llc_has_no_search() {
    let guest = GuestId::new().to_string();
    let response = test_app()
        .oneshot(post_as("/v1/forms/llc/search", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_count_saves_and_sessions() {
    let app = test_app();
    let guest = GuestId::new().to_string();
    app.clone()
        .oneshot(post_as("/v1/forms/banking/save", GUEST_HEADER, &guest, json!({})))
        .await
        .unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("bizform_form_saves_total"));
    assert!(body.contains("authentication_required"));
    assert!(body.contains("bizform_active_sessions"));
}

#[tokio::test]
async fn test_path_keys_share_one_metric_series() {
    let app = test_app();
    for i in 0..12 {
        let response = app
            .clone()
            .oneshot(get(&format!("/v1/licenses/junk{i}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = body_string(app.oneshot(get("/metrics")).await.unwrap()).await;
    let series: Vec<&str> = body
        .lines()
        .filter(|line| line.starts_with("bizform_http_requests_total{") && line.contains("licenses"))
        .collect();
    assert_eq!(series.len(), 1, "{series:?}");
    assert!(series[0].contains(r#"path="/v1/licenses/{business_type}""#));
    assert!(series[0].ends_with(" 12"));
}

#[tokio::test]
async fn test_unrouted_paths_never_become_labels() {
    let app = test_app();
    for i in 0..5 {
        let response = app
            .clone()
            .oneshot(get(&format!("/no/such/route/{i}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let body = body_string(app.oneshot(get("/metrics")).await.unwrap()).await;
    assert!(!body.contains("/no/such/route"));
}

// -- Session Bounds -----------------------------------------------------------

#[tokio::test]
async fn test_fresh_guests_stay_under_session_cap() {
    let config = AppConfig {
        max_sessions: 5,
        ..AppConfig::default()
    };
    let state = AppState::with_config(config, FormStore::Memory(MemoryGateway::new()));
    let sessions = state.sessions.clone();
    let app = bizform_api::app(state);

    for _ in 0..40 {
        let guest = GuestId::new().to_string();
        let response = app
            .clone()
            .oneshot(get_as("/v1/forms/llc", GUEST_HEADER, &guest))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(sessions.count(FormKind::Llc) <= 5);
}

#[tokio::test]
async fn test_idle_guest_sessions_are_evicted() {
    let state = AppState::new();
    let sessions = state.sessions.clone();
    let app = bizform_api::app(state);

    for _ in 0..10 {
        let guest = GuestId::new().to_string();
        app.clone()
            .oneshot(get_as("/v1/forms/ein", GUEST_HEADER, &guest))
            .await
            .unwrap();
    }
    assert_eq!(sessions.count(FormKind::Ein), 10);

    let an_hour_later = Instant::now() + Duration::from_secs(3600);
    let dropped = sessions.sweep_idle_at(an_hour_later, Duration::from_secs(1800));
    assert_eq!(dropped, 10);
    assert_eq!(sessions.count(FormKind::Ein), 0);
}

#[tokio::test]
async fn test_evicted_user_session_restores_saved_record() {
    let state = AppState::new();
    let sessions = state.sessions.clone();
    let app = bizform_api::app(state);
    let user = UserId::new().to_string();

    app.clone()
        .oneshot(post_as(
            "/v1/forms/banking/events",
            USER_HEADER,
            &user,
            json!({"type": "zip_changed", "zip": "10001"}),
        ))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(post_as("/v1/forms/banking/save", USER_HEADER, &user, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let later = Instant::now() + Duration::from_secs(3600);
    sessions.sweep_idle_at(later, Duration::from_secs(1800));
    assert_eq!(sessions.count(FormKind::Banking), 0);

    let response = app
        .oneshot(get_as("/v1/forms/banking", USER_HEADER, &user))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["record"]["zip_code"], "10001");
}

#[tokio::test]
async fn test_openapi_json() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/v1/forms/{form}/save"].is_object());
}
