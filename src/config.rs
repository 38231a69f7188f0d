//! Configuration file parser for ~/.config/yna-search/config.toml.
//!
//! The config file is optional. A missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos. The feed catalog itself is not configurable.
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::feed::{Period, DEFAULT_USER_AGENT};
use crate::search::{DEFAULT_DESCRIPTION_LIMIT, KST_OFFSET_SECS};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A key parsed but holds a value outside its allowed range.
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-feed request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every feed request.
    pub user_agent: String,

    /// Reference civil timezone as minutes east of UTC (540 = KST).
    pub utc_offset_minutes: i32,

    /// Period used when `--period` is not given (e.g. "24h", "3d", "all").
    pub default_period: String,

    /// Characters of description shown per result before "...".
    pub description_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            utc_offset_minutes: KST_OFFSET_SECS / 60,
            default_period: "24h".to_string(),
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "timeout_secs",
        "user_agent",
        "utc_offset_minutes",
        "default_period",
        "description_limit",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Out-of-range values → `Err(ConfigError::Invalid)`
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading so a corrupted file can't exhaust memory
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
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        self.reference_zone()?;
        self.period()?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The reference civil timezone as a fixed offset.
    pub fn reference_zone(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                key: "utc_offset_minutes",
                reason: format!("{} is not a valid UTC offset", self.utc_offset_minutes),
            })
    }

    /// The configured default period.
    pub fn period(&self) -> Result<Period, ConfigError> {
        Period::from_name(&self.default_period).ok_or_else(|| ConfigError::Invalid {
            key: "default_period",
            reason: format!(
                "unknown period {:?} (expected all, 1h, 3h, 6h, 12h, 24h, 3d or 7d)",
                self.default_period
            ),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("yna_search_config_test_{name}"));
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
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(
            config.reference_zone().unwrap().local_minus_utc(),
            9 * 3600
        );
        assert_eq!(config.period().unwrap(), Period::Hours24);
        assert_eq!(config.description_limit, 200);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/yna_search_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_period, "24h");
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "default_period = \"3d\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.period().unwrap(), Period::Days3);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.utc_offset_minutes, 540);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
timeout_secs = 5
user_agent = "yna-search/0.1"
utc_offset_minutes = 0
default_period = "all"
description_limit = 80
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.user_agent, "yna-search/0.1");
        assert_eq!(config.reference_zone().unwrap().local_minus_utc(), 0);
        assert_eq!(config.period().unwrap(), Period::All);
        assert_eq!(config.description_limit, 80);
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        cleanup(&path);
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let path = write_config("wrongtype", "timeout_secs = \"ten\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let path = write_config("unknown", "theme = \"dark\"\ntimeout_secs = 3\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.timeout_secs, 3);
        cleanup(&path);
    }

    #[test]
    fn test_unknown_period_rejected() {
        let path = write_config("badperiod", "default_period = \"fortnight\"\n");
        match Config::load(&path) {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "default_period"),
            other => panic!("Expected Invalid default_period, got {:?}", other),
        }
        cleanup(&path);
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let path = write_config("badoffset", "utc_offset_minutes = 1500\n");
        match Config::load(&path) {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "utc_offset_minutes"),
            other => panic!("Expected Invalid utc_offset_minutes, got {:?}", other),
        }
        cleanup(&path);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let path = write_config("zerotimeout", "timeout_secs = 0\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Invalid { key: "timeout_secs", .. })
        ));
        cleanup(&path);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }
}
