//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::DEFAULT_INSIGHT_LIMIT;
use crate::insights::MAX_WINDOW_DAYS;
use crate::store::{ShellConfig, StalePolicy};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub demo: DemoConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Credentials used by the boot sequence
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_demo_user")]
    pub username: String,

    #[serde(default = "default_demo_user")]
    pub password: String,
}

fn default_demo_user() -> String {
    "demo".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            username: default_demo_user(),
            password: default_demo_user(),
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_insight_limit")]
    pub insight_limit: u32,

    #[serde(default = "default_window_days")]
    pub window_days: i64,

    #[serde(default)]
    pub stale_responses: StalePolicy,
}

fn default_insight_limit() -> u32 {
    DEFAULT_INSIGHT_LIMIT
}

fn default_window_days() -> i64 {
    7
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            insight_limit: default_insight_limit(),
            window_days: default_window_days(),
            stale_responses: StalePolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        let days = self.dashboard.window_days;
        if !(1..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(format!(
                "dashboard.window_days must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS, days
            ));
        }
        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("signal-noise").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("SIGNAL_API_URL") {
            self.api.base_url = url;
        }

        if let Some(username) = var("SIGNAL_DEMO_USERNAME") {
            self.demo.username = username;
        }
        if let Some(password) = var("SIGNAL_DEMO_PASSWORD") {
            self.demo.password = password;
        }

        if let Some(limit) = var("SIGNAL_INSIGHT_LIMIT") {
            match limit.parse() {
                Ok(limit) => self.dashboard.insight_limit = limit,
                Err(_) => tracing::warn!("Ignoring invalid SIGNAL_INSIGHT_LIMIT: {}", limit),
            }
        }

        if let Some(level) = var("SIGNAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SIGNAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Inputs for the orchestration sequences
    pub fn shell(&self) -> ShellConfig {
        ShellConfig {
            username: self.demo.username.clone(),
            password: self.demo.password.clone(),
            insight_limit: self.dashboard.insight_limit,
            window_days: self.dashboard.window_days,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Signal > Noise Configuration
#
# Environment variables override these settings:
# - SIGNAL_API_URL
# - SIGNAL_DEMO_USERNAME
# - SIGNAL_DEMO_PASSWORD
# - SIGNAL_INSIGHT_LIMIT
# - SIGNAL_LOG_LEVEL
# - SIGNAL_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:8000"

[demo]
# Credentials used when the dashboard boots
username = "demo"
password = "demo"

[dashboard]
# Number of most recent insights to fetch
insight_limit = 10

# Length of the trailing window sent to the generate endpoint (days)
window_days = 7

# Overlapping actions: "last_write_wins" or "discard_stale"
stale_responses = "last_write_wins"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.shell(), ShellConfig::default());
        assert_eq!(config.dashboard.stale_responses, StalePolicy::LastWriteWins);
    }

    #[test]
    fn test_generated_default_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);
        assert_eq!(config.shell(), ShellConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://backend:9000\"\n\n[dashboard]\nstale_responses = \"discard_stale\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.dashboard.stale_responses, StalePolicy::DiscardStale);
        assert_eq!(config.dashboard.insight_limit, 10);
        assert_eq!(config.demo.username, "demo");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/signal-noise.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\nstale_responses = \"sometimes\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_window_days_out_of_range() {
        for days in ["0", "-7", "366", "9223372036854775"] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[dashboard]\nwindow_days = {}", days).unwrap();

            let err = Config::load(file.path()).unwrap_err();
            match err {
                ConfigError::Parse { error, .. } => assert!(error.contains("window_days")),
                other => panic!("expected parse error, got {other:?}"),
            }
        }

        let config = Config::parse("[dashboard]\nwindow_days = 30").unwrap();
        assert_eq!(config.shell().window_days, 30);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SIGNAL_API_URL", "http://override:1234"),
            ("SIGNAL_INSIGHT_LIMIT", "not-a-number"),
            ("SIGNAL_DEMO_PASSWORD", "s3cret"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://override:1234");
        assert_eq!(config.dashboard.insight_limit, 10);
        assert_eq!(config.demo.password, "s3cret");
        assert_eq!(config.demo.username, "demo");
    }
}
