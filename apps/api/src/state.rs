use std::sync::Arc;

use crate::config::Config;
use crate::form::sessions::FormSessions;
use crate::gateway::BackendGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Backend gateway. Default: HttpGateway; tests swap in an in-memory fake.
    pub gateway: Arc<dyn BackendGateway>,
    pub sessions: FormSessions,
    pub config: Config,
}
