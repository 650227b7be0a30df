use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::ImageId;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown image reference {0}")]
    Unknown(ImageId),
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image store lock poisoned")]
    Poisoned,
}

/// Where a session-local image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    /// A user-selected file, read lazily.
    File {
        path: PathBuf,
        mime_type: String,
        byte_len: u64,
    },
    /// Bytes produced during the session, such as a restored image.
    Memory {
        bytes: Arc<Vec<u8>>,
        mime_type: String,
    },
}

impl StoredImage {
    pub fn mime_type(&self) -> &str {
        match self {
            StoredImage::File { mime_type, .. } | StoredImage::Memory { mime_type, .. } => {
                mime_type
            }
        }
    }

    pub fn byte_len(&self) -> u64 {
        match self {
            StoredImage::File { byte_len, .. } => *byte_len,
            StoredImage::Memory { bytes, .. } => bytes.len() as u64,
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: ImageId,
    images: HashMap<ImageId, StoredImage>,
}

/// Registry of preview and result references, shared between UI and engine.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user-selected file. The MIME type is declared from the extension.
    pub fn register_file(&self, path: &Path) -> Result<ImageId, StoreError> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(StoreError::NotAFile(path.to_path_buf()));
        }
        let image = StoredImage::File {
            path: path.to_path_buf(),
            mime_type: mime_for_path(path).to_string(),
            byte_len: meta.len(),
        };
        self.insert(image)
    }

    pub fn register_bytes(
        &self,
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> Result<ImageId, StoreError> {
        self.insert(StoredImage::Memory {
            bytes: Arc::new(bytes),
            mime_type: mime_type.into(),
        })
    }

    pub fn get(&self, id: ImageId) -> Result<StoredImage, StoreError> {
        self.lock()?
            .images
            .get(&id)
            .cloned()
            .ok_or(StoreError::Unknown(id))
    }

    pub fn mime(&self, id: ImageId) -> Result<String, StoreError> {
        self.get(id).map(|image| image.mime_type().to_string())
    }

    /// Reads the full image bytes, hitting the filesystem for file-backed entries.
    pub fn read(&self, id: ImageId) -> Result<Vec<u8>, StoreError> {
        match self.get(id)? {
            StoredImage::File { path, .. } => Ok(fs::read(path)?),
            StoredImage::Memory { bytes, .. } => Ok(bytes.as_ref().clone()),
        }
    }

    /// Drops a reference. Returns false if it was already gone.
    pub fn release(&self, id: ImageId) -> bool {
        match self.lock() {
            Ok(mut inner) => inner.images.remove(&id).is_some(),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.images.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, image: StoredImage) -> Result<ImageId, StoreError> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.images.insert(id, image);
        Ok(id)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

/// Declared MIME type for a path, from its extension only.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg" | "jfif") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("tif" | "tiff") => "image/tiff",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::mime_for_path;
    use std::path::Path;

    #[test]
    fn mime_is_case_insensitive() {
        assert_eq!(mime_for_path(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.Tiff")), "image/tiff");
    }

    #[test]
    fn unknown_extension_is_not_rejected() {
        assert_eq!(mime_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }
}
