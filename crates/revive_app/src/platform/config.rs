use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use revive_core::{WorkflowSettings, DEFAULT_UPLOAD_HINT_BYTES};
use revive_engine::{EngineConfig, RestoreSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings loaded from `revive.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pre-provisioned key. `GEMINI_API_KEY` takes precedence when set.
    pub api_key: Option<String>,
    /// Where a key connected at runtime is kept. `None` keeps it in memory.
    pub key_file: Option<PathBuf>,
    pub endpoint: String,
    pub model: String,
    pub progress_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub download_dir: PathBuf,
    pub max_upload_hint_bytes: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    /// Log debug records as well.
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let restore = RestoreSettings::default();
        Self {
            api_key: None,
            key_file: Some(PathBuf::from(".revive_key")),
            endpoint: restore.endpoint,
            model: restore.model,
            progress_interval_ms: 3_000,
            request_timeout_secs: restore.request_timeout.as_secs(),
            download_dir: PathBuf::from("downloads"),
            max_upload_hint_bytes: DEFAULT_UPLOAD_HINT_BYTES,
            log_destination: LogDestination::File,
            log_file: PathBuf::from("revive.log"),
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Picks the key handed to the credential store: the environment first, then the file.
    pub fn provisioned_key(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .and_then(non_blank)
            .or_else(|| self.api_key.clone().and_then(non_blank))
    }

    pub fn engine_config(&self, provisioned_key: Option<String>) -> EngineConfig {
        let restore = RestoreSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            ..RestoreSettings::default()
        };
        EngineConfig {
            restore,
            progress_interval: Duration::from_millis(self.progress_interval_ms),
            download_dir: self.download_dir.clone(),
            provisioned_key,
            key_file: self.key_file.clone(),
        }
    }

    pub fn workflow_settings(&self, credential_provisioned: bool) -> WorkflowSettings {
        WorkflowSettings {
            credential_provisioned,
            upload_hint_bytes: self.max_upload_hint_bytes,
        }
    }
}

fn non_blank(key: String) -> Option<String> {
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
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
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("revive.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("revive.ron");
        fs::write(
            &path,
            r#"(
                api_key: Some("from-file"),
                progress_interval_ms: 1500,
                download_dir: "/tmp/restored",
                log_destination: Both,
                verbose: true,
            )"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.progress_interval_ms, 1500);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/restored"));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert!(config.verbose);
        assert_eq!(config.log_file, PathBuf::from("revive.log"));
        assert_eq!(config.model, AppConfig::default().model);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("revive.ron");
        fs::write(&path, "(progress_interval_ms: \"soon\")").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn environment_key_wins_over_file_key() {
        let config = AppConfig {
            api_key: Some("file".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.provisioned_key(Some(" env ".to_string())).as_deref(),
            Some("env")
        );
        assert_eq!(config.provisioned_key(None).as_deref(), Some("file"));
        assert_eq!(config.provisioned_key(Some("  ".into())).as_deref(), Some("file"));
        assert_eq!(AppConfig::default().provisioned_key(None), None);
    }

    #[test]
    fn engine_config_carries_settings() {
        let config = AppConfig {
            endpoint: "http://localhost:9000".to_string(),
            progress_interval_ms: 250,
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        let engine = config.engine_config(Some("k".to_string()));
        assert_eq!(engine.restore.endpoint, "http://localhost:9000");
        assert_eq!(engine.progress_interval, Duration::from_millis(250));
        assert_eq!(engine.restore.request_timeout, Duration::from_secs(1));
        assert_eq!(engine.provisioned_key.as_deref(), Some("k"));
        assert_eq!(engine.key_file, Some(PathBuf::from(".revive_key")));
    }
}
