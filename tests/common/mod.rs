use logins_api::db::LoginsStorage;

/// Rows stored under `username`, read straight from the pool.
pub async fn count_rows(storage: &LoginsStorage, username: &str) -> i64 {
    let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM LogIns WHERE usernames = ?")
        .bind(username)
        .fetch_one(storage.pool())
        .await
        .expect("count query failed");
    rec.0
}
