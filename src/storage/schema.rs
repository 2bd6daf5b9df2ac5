use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use super::types::{is_lock_message, DatabaseError};

// ============================================================================
// Database
// ============================================================================

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Open a database connection and run migrations
    ///
    /// Pass `":memory:"` for a throwaway database (tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InstanceLocked` if another instance of boomer
    /// has the database locked (SQLITE_BUSY, SQLITE_LOCKED, SQLITE_CANTOPEN).
    /// Returns `DatabaseError::Other` for other database errors.
    pub async fn open(path: &str) -> Result<Self, DatabaseError> {
        let url = format!("sqlite:{}?mode=rwc", path);

        // Pre-create the file as 0600: favorites and onboarding state are per-user.
        #[cfg(unix)]
        if path != ":memory:" {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            let db_path = std::path::Path::new(path);
            if db_path.exists() {
                let perms = std::fs::Permissions::from_mode(0o600);
                if let Err(e) = std::fs::set_permissions(path, perms) {
                    tracing::warn!(path = %path, error = %e, "Failed to set database file permissions");
                }
            } else if db_path.parent().is_some_and(|p| p.exists()) {
                // If creation fails, SQLite reports the error at connect_with.
                let _file = std::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .mode(0o600)
                    .open(db_path)
                    .ok();
            }
        }

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(DatabaseError::from_sqlx)?
            .pragma("busy_timeout", "5000");
        // An in-memory database exists per connection, so tests need a single one.
        let max_connections = if path == ":memory:" { 1 } else { 2 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(DatabaseError::from_sqlx)?;

        let db = Self { pool };
        db.migrate().await.map_err(|e| {
            if is_lock_message(&e.to_string()) {
                DatabaseError::InstanceLocked
            } else {
                DatabaseError::Migration(e.to_string())
            }
        })?;
        Ok(db)
    }

    /// Create the key-value table. Idempotent.
    async fn migrate(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
        "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!("Database schema ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_database() {
        let db = Database::open(":memory:").await.unwrap();
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'user_preferences'",
        )
        .fetch_one(&db.pool)
        .await
        .unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::open(":memory:").await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_file_database_persists() {
        let dir = std::env::temp_dir().join("boomer_schema_test_persist");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.db");
        let _ = std::fs::remove_file(&path);
        let path_str = path.to_str().unwrap();

        {
            let db = Database::open(path_str).await.unwrap();
            db.set_preference("onboarded_v1", "1").await.unwrap();
            db.pool.close().await;
        }

        let db = Database::open(path_str).await.unwrap();
        assert_eq!(
            db.get_preference("onboarded_v1").await.unwrap().as_deref(),
            Some("1")
        );
        db.pool.close().await;

        std::fs::remove_dir_all(&dir).ok();
    }
}
