use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info};

use crate::LedgerError;

/// Append-only text file with one processed link per line.
///
/// The file is opened afresh for every lookup and append; nothing is cached
/// and no lock is taken, so only one process may use a ledger at a time.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    path: PathBuf,
}

impl HistoryLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `link` has a line of its own. A missing ledger file is an
    /// empty ledger.
    pub fn is_recorded(&self, link: &str) -> Result<bool, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                engine_debug!("No history file at {:?} yet", self.path);
                return Ok(false);
            }
            Err(source) => return Err(self.read_error(source)),
        };

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| self.read_error(source))?;
            if line.trim() == link {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Append `link` unless it is already recorded.
    pub fn record(&self, link: &str) -> Result<(), LedgerError> {
        if self.is_recorded(link)? {
            engine_debug!("{} already in history, not appending", link);
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.append_error(source))?;
        writeln!(file, "{link}").map_err(|source| self.append_error(source))?;
        engine_info!("Recorded {} in {:?}", link, self.path);
        Ok(())
    }

    fn read_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn append_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Append {
            path: self.path.clone(),
            source,
        }
    }
}
