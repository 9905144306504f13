use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `LogIns` table. Column and wire names are plural.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct CredentialRow {
    #[serde(rename = "usernames")]
    #[sqlx(rename = "usernames")]
    pub username: String,
    #[serde(rename = "passwords")]
    #[sqlx(rename = "passwords")]
    pub password: String,
}
