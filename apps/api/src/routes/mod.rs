pub mod health;
pub mod options;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::form::handlers;
use crate::gateway::handlers as proxy;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Backend pass-through
        .route("/api/login", post(proxy::handle_login))
        .route("/api/form", get(proxy::handle_fetch_form))
        // Form sessions
        .route("/api/v1/options", get(options::options_handler))
        .route("/api/v1/forms", post(handlers::handle_open_form))
        .route(
            "/api/v1/forms/:id",
            get(handlers::handle_get_form).delete(handlers::handle_close_form),
        )
        .route(
            "/api/v1/forms/:id/applicant",
            patch(handlers::handle_update_applicant),
        )
        .route(
            "/api/v1/forms/:id/applicant/validate",
            post(handlers::handle_validate_applicant),
        )
        .route(
            "/api/v1/forms/:id/sections/:section/rows",
            post(handlers::handle_add_row).delete(handlers::handle_delete_selected),
        )
        .route(
            "/api/v1/forms/:id/sections/:section/rows/:index",
            patch(handlers::handle_update_row),
        )
        .route(
            "/api/v1/forms/:id/sections/:section/rows/:index/toggle",
            post(handlers::handle_toggle_row),
        )
        .route(
            "/api/v1/forms/:id/sections/:section/validate",
            post(handlers::handle_validate_section),
        )
        .route("/api/v1/forms/:id/submit", post(handlers::handle_submit))
        .route(
            "/api/v1/forms/:id/notices",
            delete(handlers::handle_dismiss_notice),
        )
        .with_state(state)
}
