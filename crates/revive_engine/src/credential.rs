use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use revive_logging::{redact_key, revive_info, revive_warn};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("api key is empty")]
    Empty,
    #[error("key file path has no file name: {0}")]
    InvalidKeyFile(PathBuf),
    #[error("failed to store api key: {0}")]
    Persist(#[from] PersistError),
    #[error("credential lock poisoned")]
    Poisoned,
}

/// Capability that reports and acquires the key used to call the restoration service.
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn has_credential(&self) -> bool;

    /// Accepts a key from the interactive connect flow.
    async fn request_credential(&self, key: &str) -> Result<(), CredentialError>;

    async fn api_key(&self) -> Option<String>;
}

/// Holds a pre-provisioned key from configuration and persists connected keys to a file.
#[derive(Debug)]
pub struct FileCredentialStore {
    key_file: Option<PathBuf>,
    key: RwLock<Option<String>>,
}

impl FileCredentialStore {
    pub fn new(provisioned: Option<String>, key_file: Option<PathBuf>) -> Self {
        let provisioned = provisioned
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let key = match provisioned {
            Some(key) => Some(key),
            None => key_file.as_deref().and_then(load_key_file),
        };
        Self {
            key_file,
            key: RwLock::new(key),
        }
    }

    fn current(&self) -> Option<String> {
        self.key.read().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait::async_trait]
impl CredentialProvider for FileCredentialStore {
    async fn has_credential(&self) -> bool {
        self.current().is_some()
    }

    async fn request_credential(&self, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        if let Some(path) = &self.key_file {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| CredentialError::InvalidKeyFile(path.clone()))?;
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            AtomicFileWriter::new(dir).write(file_name, key.as_bytes())?;
            revive_info!("Stored api key {} in {:?}", redact_key(key), path);
        }
        let mut guard = self.key.write().map_err(|_| CredentialError::Poisoned)?;
        *guard = Some(key.to_string());
        Ok(())
    }

    async fn api_key(&self) -> Option<String> {
        self.current()
    }
}

fn load_key_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let key = text.trim().to_string();
            (!key.is_empty()).then_some(key)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => {
            revive_warn!("Failed to read key file {:?}: {}", path, err);
            None
        }
    }
}
