//! Backend gateway — the only module that talks to the recruit backend.
//!
//! Calls are made once: no retries and no caching. A non-success status is
//! returned as `GatewayError::Backend` with whatever JSON the backend sent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::login::{Credentials, LoginReply, LoginResponse};
use crate::models::recruit::Applicant;

pub mod handlers;

#[cfg(test)]
pub mod fake;

const LOGIN_PATH: &str = "/next/recruit/login";
const FORM_PATH: &str = "/next/recruit/form";
const SUBMIT_PATH: &str = "/next/recruit/submit";

/// Status reported when the backend answers a lookup but turns it down.
const LOGIN_REJECTED_STATUS: u16 = 401;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}")]
    Backend { status: u16, details: Value },

    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Looks up the application id for a name/phone pair.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError>;

    async fn fetch_application(&self, seq: &str) -> Result<Applicant, GatewayError>;

    /// Hands a validated application to the backend. Returns its acknowledgement.
    async fn submit_application(&self, application: &Applicant) -> Result<Value, GatewayError>;
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, GatewayError> {
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await?;
        let reply: LoginReply = read_json(response).await?;
        login_outcome(reply)
    }

    async fn fetch_application(&self, seq: &str) -> Result<Applicant, GatewayError> {
        let response = self
            .client
            .get(self.url(FORM_PATH))
            .query(&[("seq", seq)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn submit_application(&self, application: &Applicant) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(self.url(SUBMIT_PATH))
            .json(application)
            .send()
            .await?;
        read_json(response).await
    }
}

/// Decodes a success body, or captures a failure body as error details.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let url = response.url().path().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Backend {} returned {}: {}", url, status, body);
        return Err(GatewayError::Backend {
            status: status.as_u16(),
            details: error_details(body),
        });
    }

    let body = response.text().await?;
    debug!("Backend {} returned {} ({} bytes)", url, status, body.len());
    if body.trim().is_empty() {
        // an empty acknowledgement still decodes for `Value` targets
        return serde_json::from_value(Value::Null)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()));
    }
    serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

/// A rejected lookup keeps the backend's reason so the caller can show it.
fn login_outcome(reply: LoginReply) -> Result<LoginResponse, GatewayError> {
    reply.into_response().map_err(|message| match message {
        Some(message) => {
            debug!("Backend rejected login: {}", message);
            GatewayError::Backend {
                status: LOGIN_REJECTED_STATUS,
                details: json!({ "message": message }),
            }
        }
        None => GatewayError::InvalidResponse("login reply carried no seq".to_string()),
    })
}

fn error_details(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
