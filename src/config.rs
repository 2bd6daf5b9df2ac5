//! Configuration file parser for ~/.config/boomer/config.toml.
//!
//! The config file is optional; a missing or empty file yields
//! `Config::default()`. Unknown keys are accepted but logged, since they are
//! usually typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::notify::Permission;
use crate::trends::DEFAULT_SOURCE_URL;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

const KNOWN_KEYS: &[&str] = &[
    "theme",
    "source_url",
    "fetch_on_startup",
    "request_timeout_secs",
    "max_retries",
    "notification_permission",
    "haptics",
    "keybindings",
];

/// Top-level application configuration.
///
/// Any subset of keys may be given; the rest come from `Default`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Listing endpoint for refreshed trends.
    pub source_url: String,

    /// Fetch once right after start. `--offline` overrides this.
    pub fetch_on_startup: bool,

    pub request_timeout_secs: u64,

    /// Retries on 429/5xx before giving up on a refresh.
    pub max_retries: u32,

    /// What the terminal answers when the app asks to send notifications.
    pub notification_permission: Permission,

    /// Ring the terminal bell on favorite and notification toggles.
    pub haptics: bool,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_on_startup: true,
            request_timeout_secs: 15,
            max_retries: 2,
            notification_permission: Permission::Granted,
            haptics: true,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML or wrong value types → `Err(ConfigError::Parse)`
    /// - Larger than 1 MB → `Err(ConfigError::TooLarge)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            theme = %config.theme,
            source = %config.source_url,
            permission = ?config.notification_permission,
            "Loaded configuration"
        );
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("boomer_config_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert!(config.fetch_on_startup);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.notification_permission, Permission::Granted);
        assert!(config.haptics);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/boomer_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_temp("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::parse("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.fetch_on_startup);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_full_config() {
        let path = write_temp(
            "full",
            r#"
theme = "light"
source_url = "https://example.test/top.json"
fetch_on_startup = false
request_timeout_secs = 5
max_retries = 0
notification_permission = "denied"
haptics = false

[keybindings]
quit = "Ctrl+q"
refresh = "F5"
"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.source_url, "https://example.test/top.json");
        assert!(!config.fetch_on_startup);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.notification_permission, Permission::Denied);
        assert!(!config.haptics);
        assert_eq!(
            config.keybindings.get("quit").map(String::as_str),
            Some("Ctrl+q")
        );
        assert_eq!(
            config.keybindings.get("refresh").map(String::as_str),
            Some("F5")
        );

        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::parse(
            r#"
theme = "dark"
totally_fake_key = "should not fail"
"#,
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::parse("max_retries = \"lots\"\n").is_err());
        assert!(Config::parse("notification_permission = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_provisional_permission() {
        let config = Config::parse("notification_permission = \"provisional\"\n").unwrap();
        assert_eq!(config.notification_permission, Permission::Provisional);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_temp("too_large", &"a".repeat(1_048_577));

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        cleanup(&path);
    }
}
