use axum::Json;

use crate::models::options::{form_options, FormOptions};

/// GET /api/v1/options
/// Choice lists for the form's select inputs.
pub async fn options_handler() -> Json<FormOptions> {
    Json(form_options())
}
