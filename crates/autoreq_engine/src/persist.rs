use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use autoreq_logging::autoreq_info;
use tempfile::NamedTempFile;
use thiserror::Error;

/// File name a saved manifest is written under.
pub const MANIFEST_FILENAME: &str = "requirements.txt";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure `dir` exists and is a directory, creating it when missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::OutputDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))
        }
        Err(err) => Err(PersistError::OutputDir(err.to_string())),
    }
}

/// Writes generated manifests into one directory.
///
/// Content goes to a temp file in the same directory first and is renamed over
/// the target, so a reader never observes a half-written manifest.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn target_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILENAME)
    }

    pub fn save(&self, manifest: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.target_path();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(manifest.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;

        autoreq_info!("Saved manifest ({} bytes) to {:?}", manifest.len(), target);
        Ok(target)
    }
}
