use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {0} missing or not writable")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| output_dir_error(dir, e))?;
        if !meta.is_dir() {
            return Err(output_dir_error(dir, "path is not a directory"));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| output_dir_error(dir, e))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| output_dir_error(dir, e))?;
    Ok(())
}

fn output_dir_error(dir: &Path, reason: impl fmt::Display) -> PersistError {
    PersistError::OutputDir(format!("{} ({reason})", dir.display()))
}

/// Writes `{dir}/{filename}` through a temp file and a rename, so readers
/// never observe a half-written target.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Copy everything `source` yields into the target. Returns the target
    /// path and the byte count.
    pub fn write_from(
        &self,
        filename: &str,
        source: &mut dyn Read,
    ) -> Result<(PathBuf, u64), PersistError> {
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        let written = io::copy(source, &mut tmp)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present; re-runs overwrite earlier output.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok((target, written))
    }
}
