use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Number, Value};

use crate::error::LoginsError;

/// `{ usernames, passwords }` pulled from a JSON body.
///
/// Parsing is lenient the way a plain JSON body parser is: a missing body or a
/// non-JSON content type yields an empty body, and a field that is absent, the
/// number zero, or not a string/number comes through as `None`. Only objects
/// and arrays are accepted at the top level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsBody {
    pub usernames: Option<String>,
    pub passwords: Option<String>,
}

impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = LoginsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => LoginsError::PayloadTooLarge,
                _ => LoginsError::MalformedBody(rejection.body_text()),
            })?;

        if !is_json || bytes.is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| LoginsError::MalformedBody(e.to_string()))?;
        if !(value.is_object() || value.is_array()) {
            return Err(LoginsError::MalformedBody(
                "top-level JSON must be an object or array".to_string(),
            ));
        }

        Ok(Self {
            usernames: scalar_field(&value, "usernames"),
            passwords: scalar_field(&value, "passwords"),
        })
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn scalar_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => number_field(n),
        _ => None,
    }
}

/// Renders a number the way JavaScript's `String()` does for the common cases:
/// zero is falsy and dropped, integral floats lose their `.0`.
fn number_field(n: &Number) -> Option<String> {
    if let Some(i) = n.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 1e21 {
        return Some(format!("{f:.0}"));
    }
    Some(f.to_string())
}
