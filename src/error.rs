use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

use crate::types::wire::StatusBody;

#[derive(Debug, ThisError)]
pub enum LoginsError {
    #[error("Username and password required")]
    MissingCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Store call timed out after {0:?}")]
    StoreTimeout(Duration),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Request entity too large")]
    PayloadTooLarge,
}

impl LoginsError {
    /// True for connectivity, query and timeout failures of the credential store.
    pub fn is_store_fault(&self) -> bool {
        matches!(
            self,
            LoginsError::DatabaseError(_) | LoginsError::StoreTimeout(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            LoginsError::MissingCredentials | LoginsError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            LoginsError::UsernameTaken => StatusCode::CONFLICT,
            LoginsError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            LoginsError::DatabaseError(_) | LoginsError::StoreTimeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for LoginsError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        // Store details stay in the server log; clients get a generic message.
        let message = match self {
            LoginsError::DatabaseError(_) | LoginsError::StoreTimeout(_) => {
                "Internal server error"
            }
            LoginsError::MissingCredentials => "Username and password required",
            LoginsError::UsernameTaken => "Username already exists",
            LoginsError::MalformedBody(_) => "Malformed JSON body",
            LoginsError::PayloadTooLarge => "Request entity too large",
        };
        (status, Json(StatusBody::error(message))).into_response()
    }
}
