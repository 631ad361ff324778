use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cloudrag_engine::{ClientSettings, DEFAULT_API_BASE};
use engine_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "cloudrag.ron";
pub(crate) const CONFIG_PATH_ENV: &str = "CLOUDRAG_CONFIG";
pub(crate) const API_BASE_ENV: &str = "CLOUDRAG_API";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogTarget,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_response_bytes: client.max_bytes,
            log_destination: LogTarget::File,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./cloudrag.log"),
        }
    }
}

impl AppConfig {
    /// Override the backend address, e.g. from `CLOUDRAG_API`. Blank values are ignored.
    pub(crate) fn with_api_base_override(mut self, api_base: Option<String>) -> Self {
        if let Some(api_base) = api_base.filter(|value| !value.trim().is_empty()) {
            self.api_base = api_base.trim().to_string();
        }
        self
    }

    pub(crate) fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}

/// Config path from `CLOUDRAG_CONFIG`, else `./cloudrag.ron`.
pub(crate) fn config_path(from_env: Option<String>) -> PathBuf {
    from_env
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// Load the config file; a missing file yields the defaults.
pub(crate) fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_from(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cloudrag.ron");
        fs::write(
            &path,
            r#"(api_base: "http://logs.internal:9000", request_timeout_secs: 30, log_destination: Both)"#,
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.api_base, "http://logs.internal:9000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_destination, LogTarget::Both);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cloudrag.ron");
        fs::write(&path, "(api_base: ").unwrap();

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_override_replaces_api_base() {
        let config = AppConfig::default()
            .with_api_base_override(Some(" http://10.0.0.5:8000 ".to_string()));
        assert_eq!(config.api_base, "http://10.0.0.5:8000");

        let config = AppConfig::default().with_api_base_override(Some("   ".to_string()));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn client_settings_follow_config() {
        let config = AppConfig {
            request_timeout_secs: 5,
            max_response_bytes: 1024,
            ..AppConfig::default()
        };
        let settings = config.client_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.max_bytes, 1024);
        assert_eq!(settings.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn config_path_prefers_env() {
        assert_eq!(config_path(None), PathBuf::from("cloudrag.ron"));
        assert_eq!(
            config_path(Some("/etc/cloudrag.ron".to_string())),
            PathBuf::from("/etc/cloudrag.ron")
        );
    }
}
