use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::auth::{login, signup};
use crate::service::gateway::CredentialGateway;

#[derive(Clone)]
pub struct LoginsState {
    pub gateway: CredentialGateway,
}

impl LoginsState {
    pub fn new(gateway: CredentialGateway) -> Self {
        Self { gateway }
    }
}

/// `/login` and `/signup` behind permissive CORS and request tracing.
pub fn logins_router(state: LoginsState, body_limit: usize) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
