//! Pass-through endpoints in front of the recruit backend.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::login::{LoginRequest, LoginResponse};
use crate::models::recruit::Applicant;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SeqQuery {
    #[serde(default)]
    pub seq: Option<String>,
}

impl SeqQuery {
    pub fn require(self) -> Result<String, AppError> {
        self.seq
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Seq is required".to_string()))
    }
}

/// POST /api/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = req.into_credentials()?;
    let response = state.gateway.login(&credentials).await?;
    info!(seq = %response.seq, "Applicant logged in");
    Ok(Json(response))
}

/// GET /api/form?seq=
pub async fn handle_fetch_form(
    State(state): State<AppState>,
    Query(query): Query<SeqQuery>,
) -> Result<Json<Applicant>, AppError> {
    let seq = query.require()?;
    let applicant = state.gateway.fetch_application(&seq).await?;
    Ok(Json(applicant))
}
