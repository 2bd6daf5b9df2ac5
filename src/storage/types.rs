use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors with user-friendly messages
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Another instance of the application has locked the database
    #[error("Another instance of boomer appears to be running. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Classify a sqlx error, mapping SQLite lock conditions to `InstanceLocked`.
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if is_lock_message(&err.to_string()) {
            return DatabaseError::InstanceLocked;
        }
        DatabaseError::Other(err)
    }
}

/// SQLITE_BUSY, SQLITE_LOCKED and SQLITE_CANTOPEN all mean "someone else has it".
pub(crate) fn is_lock_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("database is locked")
        || lower.contains("database table is locked")
        || lower.contains("sqlite_busy")
        || lower.contains("sqlite_locked")
        || lower.contains("unable to open database file")
}

// ============================================================================
// Persisted User State
// ============================================================================

/// The three durable values the app keeps between runs.
///
/// Loaded once at startup. Each field falls back to its default independently
/// when the key is absent, unparsable, or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub onboarded: bool,
    pub favorites: Vec<String>,
    pub notif_enabled: bool,
}
