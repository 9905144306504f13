use async_trait::async_trait;

use crate::db::models::CredentialRow;
use crate::error::LoginsError;

/// Result of an insert attempt against the unique `usernames` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Parameterized access to the credential table.
///
/// Implementations must be safe to share across concurrent requests and must
/// bind every user-supplied value as a query parameter.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// First row whose username and password both equal the inputs.
    async fn find_matching(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<CredentialRow>, LoginsError>;

    async fn username_exists(&self, username: &str) -> Result<bool, LoginsError>;

    async fn insert(&self, username: &str, password: &str) -> Result<InsertOutcome, LoginsError>;
}
