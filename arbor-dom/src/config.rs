use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable selecting the build mode
pub const MODE_VAR: &str = "ARBOR_ENV";
/// Environment variable selecting the log level
pub const LOG_VAR: &str = "ARBOR_LOG";

/// Controls how verbose configuration errors are
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(BuildMode::Development),
            "production" | "prod" => Some(BuildMode::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: BuildMode,
    /// Level handed to the log filter; `"off"` disables logging setup
    pub log_level: String,
    /// Log a warning when rendering into something that is not a container
    pub warn_on_non_container: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::Development,
            log_level: "info".to_string(),
            warn_on_non_container: true,
        }
    }
}

impl RenderConfig {
    /// Load settings from the process environment, reading `.env` first
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded .env file from: {:?}", path),
            Err(e) => tracing::debug!("No .env file found: {}", e),
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup(MODE_VAR) {
            match BuildMode::parse(&value) {
                Some(mode) => config.mode = mode,
                None => tracing::warn!("ignoring unknown {} value {:?}", MODE_VAR, value),
            }
        }
        if let Some(level) = lookup(LOG_VAR) {
            config.log_level = level;
        }
        config
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).context("invalid render config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn production() -> Self {
        Self {
            mode: BuildMode::Production,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.mode, BuildMode::Development);
        assert_eq!(config.log_level, "info");
        assert!(config.warn_on_non_container);
    }

    #[test]
    fn test_from_vars() {
        let vars: HashMap<&str, &str> = [(MODE_VAR, "Production"), (LOG_VAR, "debug")].into();
        let config = RenderConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.mode, BuildMode::Production);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unknown_mode_keeps_default() {
        let config =
            RenderConfig::from_vars(|key| (key == MODE_VAR).then(|| "staging".to_string()));
        assert_eq!(config.mode, BuildMode::Development);
    }

    #[test]
    fn test_from_json_partial() {
        let value = serde_json::json!({ "mode": "production" });
        let config = RenderConfig::from_json(&value).unwrap();

        assert_eq!(config.mode, BuildMode::Production);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_from_json_rejects_bad_mode() {
        let value = serde_json::json!({ "mode": "staging" });
        assert!(RenderConfig::from_json(&value).is_err());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("arbor.json");
        std::fs::write(
            &path,
            r#"{ "log_level": "trace", "warn_on_non_container": false }"#,
        )
        .unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.log_level, "trace");
        assert!(!config.warn_on_non_container);
    }

    #[test]
    fn test_from_file_missing() {
        let err = RenderConfig::from_file("/nonexistent/arbor.json").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
