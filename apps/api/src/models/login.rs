use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z가-힣\s]+$").expect("valid name pattern"));

const MAX_PHONE_DIGITS: usize = 11;

/// Body accepted by `POST /api/login`. Both fields are optional on the wire so
/// a missing value yields a 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Validated lookup key forwarded to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub name: String,
    pub phone: String,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<Credentials, AppError> {
        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        let phone = self.phone.map(|p| p.trim().to_string()).unwrap_or_default();

        if name.is_empty() || phone.is_empty() {
            return Err(AppError::Validation(
                "Name and phone are required".to_string(),
            ));
        }
        if !NAME_PATTERN.is_match(&name) {
            return Err(AppError::Validation(
                "Name may only contain letters and spaces".to_string(),
            ));
        }
        if !phone.chars().all(|c| c.is_ascii_digit()) || phone.len() > MAX_PHONE_DIGITS {
            return Err(AppError::Validation(format!(
                "Phone must be at most {MAX_PHONE_DIGITS} digits"
            )));
        }

        Ok(Credentials { name, phone })
    }
}

/// Normalized login lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub seq: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The backend answers either with the bare application id or with an
/// object carrying it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoginReply {
    Detailed {
        #[serde(default)]
        seq: Option<Value>,
        #[serde(default)]
        success: Option<bool>,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Value),
}

impl LoginReply {
    /// A reply without a usable id, or one flagged `success: false`, is a
    /// rejection. The backend's message, if any, is handed back as the error.
    pub fn into_response(self) -> Result<LoginResponse, Option<String>> {
        let (seq, success, message) = match self {
            LoginReply::Detailed {
                seq,
                success,
                message,
            } => (seq, success, message),
            LoginReply::Bare(seq) => (Some(seq), None, None),
        };
        if success == Some(false) {
            return Err(message);
        }
        let seq = match seq {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(message),
        };
        Ok(LoginResponse {
            seq,
            success,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, phone: &str) -> LoginRequest {
        LoginRequest {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    #[test]
    fn test_valid_credentials() {
        let creds = request(" John Doe ", "01012345678")
            .into_credentials()
            .unwrap();
        assert_eq!(creds.name, "John Doe");
        assert_eq!(creds.phone, "01012345678");
    }

    #[test]
    fn test_hangul_name_allowed() {
        assert!(request("홍길동", "01012345678").into_credentials().is_ok());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let req = LoginRequest {
            name: Some("John".to_string()),
            phone: None,
        };
        assert!(matches!(req.into_credentials(), Err(AppError::Validation(_))));
        assert!(request("", "010").into_credentials().is_err());
    }

    #[test]
    fn test_name_with_digits_rejected() {
        assert!(request("John2", "01012345678").into_credentials().is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(request("John", "010-1234").into_credentials().is_err());
        assert!(request("John", "010123456789").into_credentials().is_err());
        assert!(request("John", "0101234567").into_credentials().is_ok());
    }

    #[test]
    fn test_login_reply_bare_string() {
        let reply: LoginReply = serde_json::from_value(json!("123")).unwrap();
        assert_eq!(reply.into_response().unwrap().seq, "123");
    }

    #[test]
    fn test_login_reply_bare_number() {
        let reply: LoginReply = serde_json::from_value(json!(123)).unwrap();
        assert_eq!(reply.into_response().unwrap().seq, "123");
    }

    #[test]
    fn test_login_reply_object() {
        let reply: LoginReply = serde_json::from_value(json!({
            "seq": "123",
            "success": true,
            "message": "welcome"
        }))
        .unwrap();
        let response = reply.into_response().unwrap();
        assert_eq!(response.seq, "123");
        assert_eq!(response.success, Some(true));
        assert_eq!(response.message.as_deref(), Some("welcome"));
    }

    #[test]
    fn test_login_reply_without_seq() {
        let reply: LoginReply =
            serde_json::from_value(json!({ "success": false, "message": "no match" })).unwrap();
        assert_eq!(reply.into_response(), Err(Some("no match".to_string())));
    }

    #[test]
    fn test_login_reply_flagged_unsuccessful_is_rejected() {
        let reply: LoginReply = serde_json::from_value(json!({
            "seq": "123",
            "success": false,
            "message": "phone does not match"
        }))
        .unwrap();
        assert_eq!(
            reply.into_response(),
            Err(Some("phone does not match".to_string()))
        );
    }

    #[test]
    fn test_login_reply_blank_id_carries_no_message() {
        let reply: LoginReply = serde_json::from_value(json!("  ")).unwrap();
        assert_eq!(reply.into_response(), Err(None));
    }
}
