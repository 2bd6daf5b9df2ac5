//! Persistence facade for the user's onboarding, favorites and digest state.
//!
//! Three independent keys in `user_preferences`; there is no transaction
//! spanning them. Reads never fail: an absent, unparsable or unreadable value
//! yields its default so a damaged store degrades to a fresh install.

use anyhow::{Context, Result};

use super::schema::Database;
use super::types::UserState;

/// `"1"` once onboarding has been completed; absent before.
pub const KEY_ONBOARDED: &str = "onboarded_v1";
/// JSON array of favorite trend ids, in the order they were added.
pub const KEY_FAVORITES: &str = "favorites_v1";
/// `"1"` when the daily digest is on, `"0"` when off.
pub const KEY_NOTIF_ENABLED: &str = "notif_enabled_v1";

impl Database {
    /// Read all three values, defaulting each one independently.
    pub async fn load_user_state(&self) -> UserState {
        let onboarded = self
            .read_or_none(KEY_ONBOARDED)
            .await
            .is_some_and(|v| !v.is_empty());

        let favorites = match self.read_or_none(KEY_FAVORITES).await {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored favorites are not a JSON string array, ignoring");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let notif_enabled = self
            .read_or_none(KEY_NOTIF_ENABLED)
            .await
            .is_some_and(|v| v == "1");

        tracing::debug!(
            onboarded,
            favorites = favorites.len(),
            notif_enabled,
            "Loaded user state"
        );

        UserState {
            onboarded,
            favorites,
            notif_enabled,
        }
    }

    /// Record that onboarding has been completed. There is no way back.
    pub async fn set_onboarded(&self) -> Result<()> {
        self.set_preference(KEY_ONBOARDED, "1")
            .await
            .context("Failed to persist onboarding state")
    }

    /// Replace the stored favorites with `favorites`.
    pub async fn set_favorites(&self, favorites: &[String]) -> Result<()> {
        let encoded = serde_json::to_string(favorites)?;
        self.set_preference(KEY_FAVORITES, &encoded)
            .await
            .context("Failed to persist favorites")
    }

    pub async fn set_notif_enabled(&self, enabled: bool) -> Result<()> {
        self.set_preference(KEY_NOTIF_ENABLED, if enabled { "1" } else { "0" })
            .await
            .context("Failed to persist notification setting")
    }

    /// Storage failures are indistinguishable from "absent" for the facade.
    async fn read_or_none(&self, key: &str) -> Option<String> {
        match self.get_preference(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read user state, using default");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_fresh_store_loads_defaults() {
        let db = test_db().await;
        assert_eq!(db.load_user_state().await, UserState::default());
    }

    #[tokio::test]
    async fn test_round_trip_all_keys() {
        let db = test_db().await;
        db.set_onboarded().await.unwrap();
        db.set_favorites(&["ratio".to_string(), "brat-summer".to_string()])
            .await
            .unwrap();
        db.set_notif_enabled(true).await.unwrap();

        assert_eq!(
            db.load_user_state().await,
            UserState {
                onboarded: true,
                favorites: vec!["ratio".to_string(), "brat-summer".to_string()],
                notif_enabled: true,
            }
        );
    }

    #[tokio::test]
    async fn test_wire_encoding() {
        let db = test_db().await;
        db.set_onboarded().await.unwrap();
        db.set_favorites(&["ratio".to_string()]).await.unwrap();
        db.set_notif_enabled(false).await.unwrap();

        assert_eq!(
            db.get_preference(KEY_ONBOARDED).await.unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(
            db.get_preference(KEY_FAVORITES).await.unwrap().as_deref(),
            Some(r#"["ratio"]"#)
        );
        assert_eq!(
            db.get_preference(KEY_NOTIF_ENABLED).await.unwrap().as_deref(),
            Some("0")
        );
    }

    #[tokio::test]
    async fn test_unparsable_favorites_default_to_empty() {
        let db = test_db().await;
        db.set_preference(KEY_FAVORITES, "{not json").await.unwrap();
        db.set_notif_enabled(true).await.unwrap();

        let state = db.load_user_state().await;
        assert!(state.favorites.is_empty());
        // Other keys are unaffected
        assert!(state.notif_enabled);
    }

    #[tokio::test]
    async fn test_favorites_of_wrong_shape_default_to_empty() {
        let db = test_db().await;
        db.set_preference(KEY_FAVORITES, "[1, 2, 3]").await.unwrap();
        assert!(db.load_user_state().await.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_notif_value_other_than_one_is_off() {
        let db = test_db().await;
        db.set_preference(KEY_NOTIF_ENABLED, "yes").await.unwrap();
        assert!(!db.load_user_state().await.notif_enabled);
    }

    #[tokio::test]
    async fn test_empty_favorites_array_is_stored_verbatim() {
        let db = test_db().await;
        db.set_favorites(&[]).await.unwrap();
        assert_eq!(
            db.get_preference(KEY_FAVORITES).await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
