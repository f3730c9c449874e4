//! Axum route handlers for form sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::form::notices::Notice;
use crate::form::orchestrator::{FormOrchestrator, FormState};
use crate::form::validation::{Section, ValidationFailure};
use crate::gateway::handlers::SeqQuery;
use crate::models::recruit::{Applicant, PhoneParts};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OpenFormRequest {
    pub seq: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct FormView {
    pub form_id: Uuid,
    pub state: FormState,
    pub applicant: Applicant,
    pub phone: PhoneParts,
    pub highlight: Option<ValidationFailure>,
    pub notices: Vec<Notice>,
}

impl FormView {
    fn of(form_id: Uuid, form: &FormOrchestrator) -> Self {
        Self {
            form_id,
            state: form.state(),
            applicant: form.applicant().clone(),
            phone: form.applicant().phone_parts(),
            highlight: form.highlight().cloned(),
            notices: form.notices(Utc::now()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RowAdded {
    pub row_index: usize,
    pub form: FormView,
}

#[derive(Debug, Serialize)]
pub struct RowsDeleted {
    pub removed: usize,
    pub form: FormView,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub form: FormView,
    pub backend: Value,
}

fn section_param(raw: &str) -> Result<Section, AppError> {
    raw.parse().map_err(AppError::Validation)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forms
///
/// Fetches the application from the backend and opens an editable form.
pub async fn handle_open_form(
    State(state): State<AppState>,
    Json(req): Json<OpenFormRequest>,
) -> Result<(StatusCode, Json<FormView>), AppError> {
    let seq = SeqQuery { seq: Some(req.seq) }.require()?;
    let applicant = state.gateway.fetch_application(&seq).await?;
    let form = FormOrchestrator::new(applicant, state.config.notice_ttl());
    let form_id = state.sessions.open(form).await;
    info!(%form_id, %seq, "Form opened");
    let view = state
        .sessions
        .with(form_id, |form| FormView::of(form_id, form))
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/forms/:id
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<FormView>, AppError> {
    let view = state
        .sessions
        .with(form_id, |form| FormView::of(form_id, form))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/forms/:id
pub async fn handle_close_form(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(form_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Form {form_id} not found")))
    }
}

/// PATCH /api/v1/forms/:id/applicant
pub async fn handle_update_applicant(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<FormView>, AppError> {
    let view = state
        .sessions
        .with(form_id, |form| {
            form.update_applicant(&req.field, req.value)?;
            Ok::<_, AppError>(FormView::of(form_id, form))
        })
        .await??;
    Ok(Json(view))
}

/// POST /api/v1/forms/:id/applicant/validate
pub async fn handle_validate_applicant(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<FormView>, AppError> {
    validate(&state, form_id, Section::Applicant).await
}

/// POST /api/v1/forms/:id/sections/:section/rows
pub async fn handle_add_row(
    State(state): State<AppState>,
    Path((form_id, section)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<RowAdded>), AppError> {
    let section = section_param(&section)?;
    let added = state
        .sessions
        .with(form_id, |form| {
            let row_index = form.add_row(section)?;
            Ok::<_, AppError>(RowAdded {
                row_index,
                form: FormView::of(form_id, form),
            })
        })
        .await??;
    Ok((StatusCode::CREATED, Json(added)))
}

/// DELETE /api/v1/forms/:id/sections/:section/rows
///
/// Removes every row currently marked as selected.
pub async fn handle_delete_selected(
    State(state): State<AppState>,
    Path((form_id, section)): Path<(Uuid, String)>,
) -> Result<Json<RowsDeleted>, AppError> {
    let section = section_param(&section)?;
    let deleted = state
        .sessions
        .with(form_id, |form| {
            let removed = form.delete_selected_rows(section)?;
            Ok::<_, AppError>(RowsDeleted {
                removed,
                form: FormView::of(form_id, form),
            })
        })
        .await??;
    Ok(Json(deleted))
}

/// PATCH /api/v1/forms/:id/sections/:section/rows/:index
pub async fn handle_update_row(
    State(state): State<AppState>,
    Path((form_id, section, row_index)): Path<(Uuid, String, usize)>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<FormView>, AppError> {
    let section = section_param(&section)?;
    let view = state
        .sessions
        .with(form_id, |form| {
            form.update_row(section, row_index, &req.field, req.value)?;
            Ok::<_, AppError>(FormView::of(form_id, form))
        })
        .await??;
    Ok(Json(view))
}

/// POST /api/v1/forms/:id/sections/:section/rows/:index/toggle
pub async fn handle_toggle_row(
    State(state): State<AppState>,
    Path((form_id, section, row_index)): Path<(Uuid, String, usize)>,
) -> Result<Json<FormView>, AppError> {
    let section = section_param(&section)?;
    let view = state
        .sessions
        .with(form_id, |form| {
            form.toggle_selected(section, row_index)?;
            Ok::<_, AppError>(FormView::of(form_id, form))
        })
        .await??;
    Ok(Json(view))
}

/// POST /api/v1/forms/:id/sections/:section/validate
pub async fn handle_validate_section(
    State(state): State<AppState>,
    Path((form_id, section)): Path<(Uuid, String)>,
) -> Result<Json<FormView>, AppError> {
    let section = section_param(&section)?;
    validate(&state, form_id, section).await
}

async fn validate(state: &AppState, form_id: Uuid, section: Section) -> Result<Json<FormView>, AppError> {
    let view = state
        .sessions
        .with(form_id, |form| {
            form.validate_section(section, Utc::now())?;
            Ok::<_, AppError>(FormView::of(form_id, form))
        })
        .await??;
    Ok(Json(view))
}

/// POST /api/v1/forms/:id/submit
///
/// Validates the whole form, hands the cleaned payload to the backend and
/// only then marks the form submitted. The session lock is released while the
/// backend call is in flight; the form sits in `Submitting` meanwhile, so a
/// concurrent submit or edit gets a 409.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let payload = state
        .sessions
        .with(form_id, |form| form.prepare_submission(Utc::now()))
        .await??;

    let backend = match state.gateway.submit_application(&payload).await {
        Ok(ack) => ack,
        Err(err) => {
            warn!(%form_id, "Backend refused submission: {}", err);
            // the session may have been closed while the call was in flight
            if let Ok(Err(abort)) = state
                .sessions
                .with(form_id, |form| form.abort_submission())
                .await
            {
                warn!(%form_id, "Could not roll back submission: {}", abort);
            }
            return Err(err.into());
        }
    };

    let form = state
        .sessions
        .with(form_id, |form| {
            form.complete_submission(payload, Utc::now())?;
            Ok::<_, AppError>(FormView::of(form_id, form))
        })
        .await??;

    Ok(Json(SubmitResponse { form, backend }))
}

/// DELETE /api/v1/forms/:id/notices?key=
pub async fn handle_dismiss_notice(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Query(query): Query<NoticeQuery>,
) -> Result<StatusCode, AppError> {
    let dismissed = state
        .sessions
        .with(form_id, |form| form.dismiss_notice(&query.key))
        .await?;
    if dismissed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Notice '{}' is not active", query.key)))
    }
}
