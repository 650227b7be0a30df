use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Upper bound on `name-N.ext` candidates before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("no free filename for {0}")]
    NameExhausted(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` when missing and checks that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )))
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        }
        Err(err) => return Err(PersistError::OutputDir(err.to_string())),
    }
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes files into one directory through a synced temp file and a rename.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `{dir}/{filename}`, replacing any existing file.
    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;
        let target = self.dir.join(filename);
        self.persist(&target, content)?;
        Ok(target)
    }

    /// Writes under `filename`, or `stem-1.ext`, `stem-2.ext`, ... if taken.
    pub fn write_new(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;
        let target = self.free_name(filename)?;
        self.persist(&target, content)?;
        Ok(target)
    }

    fn free_name(&self, filename: &str) -> Result<PathBuf, PersistError> {
        let first = self.dir.join(filename);
        if !first.exists() {
            return Ok(first);
        }
        let (stem, ext) = match filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (filename, None),
        };
        (1..=MAX_NAME_ATTEMPTS)
            .map(|n| match ext {
                Some(ext) => self.dir.join(format!("{stem}-{n}.{ext}")),
                None => self.dir.join(format!("{stem}-{n}")),
            })
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| PersistError::NameExhausted(filename.to_string()))
    }

    fn persist(&self, target: &Path, content: &[u8]) -> Result<(), PersistError> {
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file_mut().sync_all()?;
        // Rename replaces `target` in one step.
        staged
            .persist(target)
            .map(drop)
            .map_err(|err| PersistError::Io(err.error))
    }
}
