use crate::db::models::CredentialRow;
use crate::db::schema::SQLITE_INIT;
use crate::db::store::{CredentialStore, InsertOutcome};
use crate::error::LoginsError;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct LoginsStorage {
    pool: SqlitePool,
}

impl LoginsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool on `database_url`, creating the database file if missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, LoginsError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_opts)
            .await?;
        Ok(Self::new(pool))
    }

    /// Single-connection in-memory database with the schema applied.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, LoginsError> {
        let connect_opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), LoginsError> {
        sqlx::query(SQLITE_INIT).execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
impl LoginsStorage {
    pub(crate) async fn count_rows(&self, username: &str) -> Result<i64, LoginsError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM LogIns WHERE usernames = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }
}

#[async_trait]
impl CredentialStore for LoginsStorage {
    async fn find_matching(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<CredentialRow>, LoginsError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT usernames, passwords FROM LogIns WHERE usernames = ? AND passwords = ?",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, LoginsError> {
        let hit: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM LogIns WHERE usernames = ? LIMIT 1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hit.is_some())
    }

    async fn insert(&self, username: &str, password: &str) -> Result<InsertOutcome, LoginsError> {
        let result = sqlx::query("INSERT INTO LogIns (usernames, passwords) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!("insert rejected by unique constraint on usernames");
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }
}
