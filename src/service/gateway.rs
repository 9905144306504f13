use crate::db::models::CredentialRow;
use crate::db::store::{CredentialStore, InsertOutcome};
use crate::error::LoginsError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Result of `authenticate`. A miss is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(CredentialRow),
    InvalidCredentials,
}

/// Verifies and creates credential rows through an injected store.
///
/// Holds no state of its own beyond the shared store handle; every call is a
/// fresh round trip bounded by `store_timeout`.
#[derive(Clone)]
pub struct CredentialGateway {
    store: Arc<dyn CredentialStore>,
    store_timeout: Duration,
}

impl CredentialGateway {
    pub fn new(store: Arc<dyn CredentialStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Exact plaintext match on both fields. Inputs are not validated.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, LoginsError> {
        let row = self
            .bounded(self.store.find_matching(username, password))
            .await?;
        match row {
            Some(row) => Ok(LoginOutcome::Success(row)),
            None => {
                debug!("no credential row matched");
                Ok(LoginOutcome::InvalidCredentials)
            }
        }
    }

    /// Create a row for `username`. Empty fields are rejected before any store access.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), LoginsError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginsError::MissingCredentials);
        }

        if self.bounded(self.store.username_exists(username)).await? {
            info!(username, "signup rejected: username already exists");
            return Err(LoginsError::UsernameTaken);
        }

        // A concurrent signup can pass the check above; the unique constraint catches it.
        match self.bounded(self.store.insert(username, password)).await? {
            InsertOutcome::Inserted => {
                info!(username, "user created");
                Ok(())
            }
            InsertOutcome::Duplicate => {
                info!(username, "signup lost race on unique username");
                Err(LoginsError::UsernameTaken)
            }
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, LoginsError>>,
    ) -> Result<T, LoginsError> {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .map_err(|_| LoginsError::StoreTimeout(self.store_timeout))?
    }
}
