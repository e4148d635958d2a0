use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::ArchiveError;

/// Check that `path` exists, is non-empty and has a readable zip central
/// directory. Entry contents are not inspected.
pub fn validate_archive(path: &Path) -> Result<(), ArchiveError> {
    let meta = fs::metadata(path).map_err(|source| ArchiveError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.len() == 0 {
        return Err(ArchiveError::Empty {
            path: path.to_path_buf(),
        });
    }

    let archive = open_archive(path)?;
    engine_debug!("{:?} holds {} entries", path, archive.len());
    Ok(())
}

/// `{archive stem}-{entry}`, e.g. `x.zip` + `Driver.jar` gives `x-Driver.jar`.
pub fn extracted_filename(archive_path: &Path, entry: &str) -> String {
    let stem = archive_path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    format!("{stem}-{entry}")
}

/// Copy the decompressed bytes of the entry named exactly `entry` into
/// `out_dir`. No file is created unless the entry exists and copies fully.
pub fn extract_entry(
    archive_path: &Path,
    out_dir: &Path,
    entry: &str,
) -> Result<PathBuf, ArchiveError> {
    let mut archive = open_archive(archive_path)?;
    let mut file = archive.by_name(entry).map_err(|err| match err {
        ZipError::FileNotFound => ArchiveError::EntryNotFound {
            archive: archive_path.to_path_buf(),
            entry: entry.to_string(),
        },
        other => corrupt(archive_path, other),
    })?;

    let mut source = ReadTracker::new(&mut file);
    let writer = AtomicFileWriter::new(out_dir.to_path_buf());
    let result = writer.write_from(&extracted_filename(archive_path, entry), &mut source);
    let read_failed = source.failed;
    let (target, written) = result.map_err(|err| match err {
        // CRC mismatches and broken deflate streams surface as read errors.
        PersistError::Io(io_err) if read_failed => corrupt(archive_path, ZipError::Io(io_err)),
        other => ArchiveError::Write {
            entry: entry.to_string(),
            source: other,
        },
    })?;

    engine_info!("Extracted {} ({} bytes) to {:?}", entry, written, target);
    Ok(target)
}

/// Remembers whether the wrapped reader ever failed, so a copy error can be
/// blamed on the archive rather than the destination.
struct ReadTracker<R> {
    inner: R,
    failed: bool,
}

impl<R: Read> ReadTracker<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            failed: false,
        }
    }
}

impl<R: Read> Read for ReadTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).inspect_err(|_| self.failed = true)
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let file = File::open(path).map_err(|source| ArchiveError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|err| corrupt(path, err))
}

fn corrupt(path: &Path, source: ZipError) -> ArchiveError {
    ArchiveError::Corrupt {
        path: path.to_path_buf(),
        source,
    }
}
