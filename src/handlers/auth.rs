use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info};

use crate::error::LoginsError;
use crate::middleware::credentials_body::CredentialsBody;
use crate::router::LoginsState;
use crate::service::gateway::LoginOutcome;
use crate::types::wire::{LoginResponse, StatusBody, USER_CREATED};

/// POST /login -> 200 with `success` or `failure`, 500 on store fault.
///
/// A body missing either field binds nothing that could match, so it is
/// answered as invalid credentials without a store round trip.
pub async fn login(State(state): State<LoginsState>, body: CredentialsBody) -> Response {
    let (Some(username), Some(password)) = (body.usernames.as_deref(), body.passwords.as_deref())
    else {
        debug!("login body missing usernames or passwords");
        return Json(LoginResponse::invalid_credentials()).into_response();
    };

    match state.gateway.authenticate(username, password).await {
        Ok(LoginOutcome::Success(user)) => {
            info!(username = %user.username, "login succeeded");
            Json(LoginResponse::Success { user }).into_response()
        }
        Ok(LoginOutcome::InvalidCredentials) => {
            info!("login failed: invalid credentials");
            Json(LoginResponse::invalid_credentials()).into_response()
        }
        Err(e) => {
            error!(error = %e, "login error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(LoginResponse::server_error()),
            )
                .into_response()
        }
    }
}

/// POST /signup -> 201 on insert, 400 on missing field, 409 on duplicate, 500 on store fault.
pub async fn signup(
    State(state): State<LoginsState>,
    body: CredentialsBody,
) -> Result<(StatusCode, Json<StatusBody>), LoginsError> {
    let username = body.usernames.unwrap_or_default();
    let password = body.passwords.unwrap_or_default();

    state
        .gateway
        .register(&username, &password)
        .await
        .inspect_err(|e| {
            if e.is_store_fault() {
                error!(error = %e, "signup error");
            }
        })?;

    Ok((StatusCode::CREATED, Json(StatusBody::success(USER_CREATED))))
}
