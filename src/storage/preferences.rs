use anyhow::Result;

use super::schema::Database;

impl Database {
    // ========================================================================
    // Key-Value Operations
    // ========================================================================

    /// Get a single value by key, or `None` if the key was never written.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a value (UPSERT), refreshing `updated_at`.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
