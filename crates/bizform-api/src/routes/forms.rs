//! # Form Session Endpoints
//!
//! Per-caller form sessions. The first request for a form restores the
//! caller's last saved record (registered users only) or starts empty;
//! later requests edit the in-memory controller. Nothing is persisted
//! until an explicit save. Idle or least recently used sessions may be
//! evicted (see [`crate::state`]).
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/v1/forms/{form}` | `get_form` |
//! | `POST` | `/v1/forms/{form}/events` | `apply_form_event` |
//! | `POST` | `/v1/forms/{form}/save` | `save_form_session` |
//! | `POST` | `/v1/forms/{form}/search` | `search_form` |
//!
//! `{form}` is one of `llc`, `ein`, `licenses`, `banking`. Search exists
//! only for `licenses` and `banking`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use bizform_core::{Caller, FormKind};
use bizform_state::{
    restore_controller, save_form, BankingController, EinController, FormController,
    LicenseController, LlcController, Notice, SaveOutcome,
};

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::state::{make_room, AppState, SessionForm, Tracked};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The caller's current form record.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormView {
    /// Form kind, e.g. `llc`.
    pub form: String,
    /// The full record as the controller holds it.
    #[schema(value_type = Object)]
    pub record: serde_json::Value,
    /// Notice produced by the last edit or search, if any.
    #[schema(value_type = Option<Object>)]
    pub notice: Option<Notice>,
}

/// Result of a save attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveResponse {
    pub form: String,
    /// `saved`, `authentication_required`, or `failed`.
    pub outcome: String,
    pub saved: bool,
    #[schema(value_type = Object)]
    pub notice: Notice,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the form session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/forms/{form}", get(get_form))
        .route("/v1/forms/{form}/events", post(apply_form_event))
        .route("/v1/forms/{form}/save", post(save_form_session))
        .route("/v1/forms/{form}/search", post(search_form))
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

fn parse_kind(form: &str) -> Result<FormKind, AppError> {
    form.parse()
        .map_err(|_| AppError::NotFound(format!("form {form:?}")))
}

/// Make sure the caller has a live controller for `C`, restoring the last
/// saved record on first use.
async fn ensure_session<C: SessionForm>(state: &AppState, caller: Caller) {
    if C::sessions(&state.sessions).contains_key(&caller) {
        return;
    }
    let restored: C = restore_controller::<C, _>(&state.store, &caller).await;
    let sessions = C::sessions(&state.sessions);
    make_room(sessions, state.config.max_sessions);
    sessions.entry(caller).or_insert(Tracked::new(restored));
}

/// Run `f` against the caller's controller and mark the session used. The
/// shard lock is held only for the duration of `f`.
async fn with_session<C, R>(state: &AppState, caller: Caller, f: impl FnOnce(&mut C) -> R + Send) -> R
where
    C: SessionForm,
{
    ensure_session::<C>(state, caller).await;
    let mut entry = C::sessions(&state.sessions)
        .entry(caller)
        .or_insert_with(|| Tracked::new(C::new()));
    entry.touch();
    f(&mut entry.controller)
}

async fn view<C: SessionForm>(state: &AppState, caller: Caller) -> Result<serde_json::Value, AppError> {
    with_session::<C, _>(state, caller, |c| serde_json::to_value(c.record()))
        .await
        .map_err(AppError::from)
}

async fn apply_event<C: SessionForm>(
    state: &AppState,
    caller: Caller,
    body: serde_json::Value,
) -> Result<(serde_json::Value, Option<Notice>), AppError> {
    let event: C::Event = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("invalid {} event: {e}", C::KIND)))?;
    with_session::<C, _>(state, caller, move |c| -> Result<_, AppError> {
        let notice = c.apply(event)?;
        Ok((serde_json::to_value(c.record())?, notice))
    })
    .await
}

async fn save<C: SessionForm>(state: &AppState, caller: Caller) -> Result<SaveOutcome, AppError> {
    let payload = with_session::<C, _>(state, caller, |c| c.payload()).await?;
    Ok(save_form(&state.store, C::KIND, &caller, payload).await)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/forms/{form} — The caller's current record.
#[utoipa::path(
    get,
    path = "/v1/forms/{form}",
    params(("form" = String, Path, description = "llc, ein, licenses, or banking")),
    responses(
        (status = 200, description = "Current record", body = FormView),
        (status = 401, description = "No caller identity", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown form", body = crate::error::ErrorBody),
    ),
    tag = "forms"
)]
pub(crate) async fn get_form(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(form): Path<String>,
) -> Result<Json<FormView>, AppError> {
    let kind = parse_kind(&form)?;
    let record = match kind {
        FormKind::Llc => view::<LlcController>(&state, caller).await?,
        FormKind::Ein => view::<EinController>(&state, caller).await?,
        FormKind::Licenses => view::<LicenseController>(&state, caller).await?,
        FormKind::Banking => view::<BankingController>(&state, caller).await?,
    };
    Ok(Json(FormView {
        form: kind.as_str().to_string(),
        record,
        notice: None,
    }))
}

/// POST /v1/forms/{form}/events — Apply one edit.
///
/// The body is the form's event, tagged by `type`, e.g.
/// `{"type": "zip_changed", "zip": "94105"}`.
#[utoipa::path(
    post,
    path = "/v1/forms/{form}/events",
    params(("form" = String, Path, description = "llc, ein, licenses, or banking")),
    request_body(content = Object, description = "Form event tagged by `type`"),
    responses(
        (status = 200, description = "Updated record and any notice", body = FormView),
        (status = 401, description = "No caller identity", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown form", body = crate::error::ErrorBody),
        (status = 422, description = "Malformed or rejected event", body = crate::error::ErrorBody),
    ),
    tag = "forms"
)]
pub(crate) async fn apply_form_event(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(form): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<FormView>, AppError> {
    let kind = parse_kind(&form)?;
    let (record, notice) = match kind {
        FormKind::Llc => apply_event::<LlcController>(&state, caller, body).await?,
        FormKind::Ein => apply_event::<EinController>(&state, caller, body).await?,
        FormKind::Licenses => apply_event::<LicenseController>(&state, caller, body).await?,
        FormKind::Banking => apply_event::<BankingController>(&state, caller, body).await?,
    };
    Ok(Json(FormView {
        form: kind.as_str().to_string(),
        record,
        notice,
    }))
}

/// POST /v1/forms/{form}/save — Persist the caller's record.
///
/// Guests get 401 with a sign-up notice. A storage failure gets 503 with
/// an error notice; the session keeps its record either way.
#[utoipa::path(
    post,
    path = "/v1/forms/{form}/save",
    params(("form" = String, Path, description = "llc, ein, licenses, or banking")),
    responses(
        (status = 200, description = "Saved", body = SaveResponse),
        (status = 401, description = "Guest caller; sign-up required", body = SaveResponse),
        (status = 404, description = "Unknown form", body = crate::error::ErrorBody),
        (status = 503, description = "Storage failed", body = SaveResponse),
    ),
    tag = "forms"
)]
pub(crate) async fn save_form_session(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(form): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let kind = parse_kind(&form)?;
    let outcome = match kind {
        FormKind::Llc => save::<LlcController>(&state, caller).await?,
        FormKind::Ein => save::<EinController>(&state, caller).await?,
        FormKind::Licenses => save::<LicenseController>(&state, caller).await?,
        FormKind::Banking => save::<BankingController>(&state, caller).await?,
    };
    state.metrics.record_save(kind.as_str(), outcome.as_str());

    let status = match outcome {
        SaveOutcome::Saved => StatusCode::OK,
        SaveOutcome::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        SaveOutcome::Failed { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    let body = SaveResponse {
        form: kind.as_str().to_string(),
        outcome: outcome.as_str().to_string(),
        saved: outcome == SaveOutcome::Saved,
        notice: outcome.notice(kind),
    };
    Ok((status, Json(body)))
}

/// POST /v1/forms/{form}/search — Run the form's provider search.
///
/// The result lands in the session record; problems such as missing
/// inputs or an unavailable provider come back as a notice, not an error.
#[utoipa::path(
    post,
    path = "/v1/forms/{form}/search",
    params(("form" = String, Path, description = "licenses or banking")),
    responses(
        (status = 200, description = "Updated record and the search notice", body = FormView),
        (status = 401, description = "No caller identity", body = crate::error::ErrorBody),
        (status = 404, description = "Form has no search", body = crate::error::ErrorBody),
    ),
    tag = "forms"
)]
pub(crate) async fn search_form(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(form): Path<String>,
) -> Result<Json<FormView>, AppError> {
    let kind = parse_kind(&form)?;
    let (record, notice) = match kind {
        FormKind::Licenses => {
            let directory = state.license_directory.clone();
            with_session::<LicenseController, _>(&state, caller, move |c| {
                let notice = c.search(directory.as_ref());
                serde_json::to_value(c.record()).map(|record| (record, notice))
            })
            .await?
        }
        FormKind::Banking => {
            let directory = state.bank_directory.clone();
            with_session::<BankingController, _>(&state, caller, move |c| {
                let notice = c.search(directory.as_ref());
                serde_json::to_value(c.record()).map(|record| (record, notice))
            })
            .await?
        }
        FormKind::Llc | FormKind::Ein => {
            return Err(AppError::NotFound(format!("{kind} form has no search")));
        }
    };
    Ok(Json(FormView {
        form: kind.as_str().to_string(),
        record,
        notice: Some(notice),
    }))
}
