use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use sentinel_engine::{ClientSettings, DEFAULT_ENDPOINT};
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sentinel.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from a RON file. Every field is optional in the file.
///
/// ```ron
/// (
///     endpoint: "http://127.0.0.1:5000",
///     request_timeout_ms: Some(30000),
///     log_destination: Both,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    /// Directory for the remembered-login file. Defaults to the working directory.
    pub state_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: None,
            request_timeout_ms: None,
            max_response_bytes: ClientSettings::default().max_response_bytes,
            log_destination: LogDestination::default(),
            state_dir: None,
        }
    }
}

impl AppConfig {
    /// An explicit path must exist. Without one, `sentinel.ron` is used when
    /// present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: AppConfig = ron::from_str("()").unwrap();
        assert_eq!(config, AppConfig::default());
        let settings = config.client_settings();
        assert_eq!(settings.endpoint, "http://127.0.0.1:5000");
        assert_eq!(settings.request_timeout, None);
        assert_eq!(settings.connect_timeout, None);
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config: AppConfig = ron::from_str(
            r#"(endpoint: "http://10.0.0.2:8080/api", request_timeout_ms: Some(2500), log_destination: File)"#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2:8080/api");
        assert_eq!(config.log_destination, LogDestination::File);
        assert_eq!(
            config.client_settings().request_timeout,
            Some(Duration::from_millis(2500))
        );
        assert_eq!(config.state_dir(), PathBuf::from("."));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn syntax_error_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        fs::write(&path, "(endpoint: ").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.ron"));
    }
}
