//! In-memory backend used by router and handler tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::gateway::{BackendGateway, GatewayError};
use crate::models::login::{Credentials, LoginResponse};
use crate::models::recruit::Applicant;

#[derive(Default)]
pub struct FakeGateway {
    accounts: HashMap<(String, String), String>,
    applications: HashMap<String, Applicant>,
    reject_submissions: bool,
    submit_delay: Option<Duration>,
    pub submitted: Mutex<Vec<Applicant>>,
}

impl FakeGateway {
    /// Registers an applicant reachable by its own name and phone.
    pub fn with_applicant(mut self, applicant: Applicant) -> Self {
        self.accounts.insert(
            (applicant.name.clone(), applicant.phone.clone()),
            applicant.seq.clone(),
        );
        self.applications.insert(applicant.seq.clone(), applicant);
        self
    }

    pub fn rejecting_submissions(mut self) -> Self {
        self.reject_submissions = true;
        self
    }

    /// Holds every submission for `delay` before answering.
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let key = (credentials.name.clone(), credentials.phone.clone());
        match self.accounts.get(&key) {
            Some(seq) => Ok(LoginResponse {
                seq: seq.clone(),
                success: Some(true),
                message: None,
            }),
            None => Err(GatewayError::Backend {
                status: 404,
                details: json!({ "message": "applicant not found" }),
            }),
        }
    }

    async fn fetch_application(&self, seq: &str) -> Result<Applicant, GatewayError> {
        self.applications
            .get(seq)
            .cloned()
            .ok_or_else(|| GatewayError::Backend {
                status: 404,
                details: json!({ "message": format!("no application {seq}") }),
            })
    }

    async fn submit_application(&self, application: &Applicant) -> Result<Value, GatewayError> {
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject_submissions {
            return Err(GatewayError::Backend {
                status: 503,
                details: json!({ "message": "backend unavailable" }),
            });
        }
        self.submitted
            .lock()
            .expect("submitted lock")
            .push(application.clone());
        Ok(json!({ "success": true }))
    }
}
