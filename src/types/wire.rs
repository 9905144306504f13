use serde::{Deserialize, Serialize};

use crate::db::CredentialRow;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const LOGIN_SERVER_ERROR: &str = "Server error";
pub const USER_CREATED: &str = "User created successfully";

/// `/login` reply. The `status` tag is always present; the rest depends on the outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoginResponse {
    Success { user: CredentialRow },
    Failure { message: String },
    Error { message: String },
}

impl LoginResponse {
    pub fn invalid_credentials() -> Self {
        Self::Failure {
            message: INVALID_CREDENTIALS.to_string(),
        }
    }

    pub fn server_error() -> Self {
        Self::Error {
            message: LOGIN_SERVER_ERROR.to_string(),
        }
    }
}

/// `{ "status": ..., "message": ... }` body used by `/signup` and by rejections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusBody {
    pub status: String,
    pub message: String,
}

impl StatusBody {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_success_carries_plural_row_fields() {
        let resp = LoginResponse::Success {
            user: CredentialRow {
                username: "alice".to_string(),
                password: "hunter2".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&resp).expect("serialize"),
            json!({
                "status": "success",
                "user": { "usernames": "alice", "passwords": "hunter2" }
            })
        );
    }

    #[test]
    fn login_failure_shape() {
        assert_eq!(
            serde_json::to_value(LoginResponse::invalid_credentials()).expect("serialize"),
            json!({ "status": "failure", "message": "Invalid credentials" })
        );
        assert_eq!(
            serde_json::to_value(LoginResponse::server_error()).expect("serialize"),
            json!({ "status": "error", "message": "Server error" })
        );
    }
}
